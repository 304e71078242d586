// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Invalid media type '{value}'")]
    #[diagnostic(
        code(postcheck::media::invalid),
        help("Use one of: none, gif, image, video")
    )]
    InvalidMediaType { value: String },

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(postcheck::config::error))]
    Config(String),

    #[error("Batch entry on line {line} is invalid: {message}")]
    #[diagnostic(
        code(postcheck::batch::invalid_entry),
        help("Each line must be a JSON object like {{\"text\": \"...\", \"media\": \"image\"}}")
    )]
    Batch { line: usize, message: String },

    #[error("Export failed: {0}")]
    #[diagnostic(code(postcheck::export::error))]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
