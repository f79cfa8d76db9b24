//! # Paylog - Personal Timesheet and Earnings Tracker
//!
//! A command-line utility for logging work time entries, reusing entry
//! templates, and generating aggregated earnings reports.
//!
//! ## Features
//!
//! - **Time Entries**: Log work sessions with date, start/end time, break
//!   minutes, hourly rate, and currency
//! - **Templates**: Reusable entry presets for recurring schedules
//! - **Reports**: Earnings totals, average rate, and per-day series over
//!   any date range
//! - **Data Export**: Export entries, reports, and summaries to CSV, JSON,
//!   and Excel formats
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paylog::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
