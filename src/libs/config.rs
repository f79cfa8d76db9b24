//! Application configuration.
//!
//! Settings are stored as JSON in the platform data directory and edited
//! through an interactive wizard (`paylog init`). Each module is
//! optional: a missing module falls back to defaults, so the tool works
//! with no configuration at all.

use super::data_storage::DataStorage;
use crate::libs::currency::Currency;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Fallback user when no profile is configured.
pub const DEFAULT_USER: &str = "default";

/// Identity settings. Entries are keyed by user so data stays per-user
/// even without an authentication layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub user: String,
}

/// Prefill values for new time entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DefaultsConfig {
    pub hourly_rate: f64,
    pub currency: Currency,
    pub break_minutes: i64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            hourly_rate: 0.0,
            currency: Currency::Usd,
            break_minutes: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when none
    /// exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Deletes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// The active user name, from the profile module or the fallback.
    pub fn user(&self) -> String {
        self.profile.as_ref().map(|p| p.user.clone()).unwrap_or_else(|| DEFAULT_USER.to_string())
    }

    /// Entry defaults, from the defaults module or zeros.
    pub fn entry_defaults(&self) -> DefaultsConfig {
        self.defaults.clone().unwrap_or_default()
    }

    /// Runs the interactive configuration wizard. Existing values are
    /// offered as prompt defaults so re-running only changes what the
    /// user touches.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = ["Profile", "Defaults"];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for &selection in &selected {
            match modules[selection] {
                "Profile" => {
                    let default = config.profile.clone().unwrap_or(ProfileConfig {
                        user: DEFAULT_USER.to_string(),
                    });
                    msg_print!(Message::ConfigModuleProfile);
                    config.profile = Some(ProfileConfig {
                        user: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUserName.to_string())
                            .default(default.user)
                            .interact_text()?,
                    });
                }
                "Defaults" => {
                    let default = config.defaults.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleDefaults);

                    let hourly_rate = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultRate.to_string())
                        .default(default.hourly_rate)
                        .validate_with(|input: &f64| -> Result<(), String> {
                            if *input >= 0.0 {
                                Ok(())
                            } else {
                                Err(Message::RateNegative.to_string())
                            }
                        })
                        .interact_text()?;

                    let currency_names: Vec<String> = Currency::ALL.iter().map(|c| format!("{} {}", c.symbol(), c.name())).collect();
                    let position = Currency::ALL.iter().position(|c| *c == default.currency).unwrap_or(0);
                    let selection = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultCurrency.to_string())
                        .items(&currency_names)
                        .default(position)
                        .interact()?;

                    let break_minutes = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultBreak.to_string())
                        .default(default.break_minutes)
                        .validate_with(|input: &i64| -> Result<(), String> {
                            if *input >= 0 {
                                Ok(())
                            } else {
                                Err(Message::BreakMinutesNegative.to_string())
                            }
                        })
                        .interact_text()?;

                    config.defaults = Some(DefaultsConfig {
                        hourly_rate,
                        currency: Currency::ALL[selection],
                        break_minutes,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
