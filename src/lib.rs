#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::unnecessary_literal_bound,
    clippy::struct_field_names,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod channels;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod links;
pub mod messages;
pub mod router;
pub mod rows;
pub mod spreadsheet;

pub use config::Config;
pub use error::LinkcapError;
