//! ATS analyzer library

pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod output;
pub mod report;

pub use config::Config;
pub use error::{AtsError, Result};
