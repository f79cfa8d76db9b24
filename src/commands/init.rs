//! Application configuration initialization command.
//!
//! Runs an interactive wizard that configures the user profile and the
//! defaults applied to new time entries.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    // Deletion mode resets the tool to its unconfigured state.
    if init_args.delete {
        Config::delete()?;
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
