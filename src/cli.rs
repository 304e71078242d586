// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "postcheck")]
#[command(version)]
#[command(about = "Estimate how a post will fare with ranking and safety filters before you publish it", long_about = None)]
pub struct Cli {
    /// Post text (reads stdin or prompts when omitted)
    pub text: Vec<String>,

    /// Attached media: none, gif, image, video
    #[arg(short, long, env = "POSTCHECK_MEDIA")]
    pub media: Option<String>,

    /// Simulate the out-of-network reduction
    #[arg(long)]
    pub oon: bool,

    /// Print the report as JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,

    /// Write the report to a file (.json or .toml)
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Analyze a JSON Lines file of {"text": ..., "media": ...} entries
    Batch {
        /// Input file, one JSON object per line
        file: PathBuf,
    },
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
