pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use app::App;
pub use cli::Cli;
pub use config::Config;
pub use domain::MediaType;
pub use error::{Error, Result};
pub use services::analyzer::{Analysis, Analyzer, Post, analyze};
pub use services::composer::AnalyzeOptions;
pub use services::reporter::Report;
