// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::services::composer::AnalyzeOptions;
use crate::services::reporter::ExportFormat;
use crate::services::safety::{UnknownUrlPolicy, UrlPolicy};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Apply the simulated out-of-network multiplier (default: false)
    #[serde(default)]
    pub simulate_oon: bool,

    /// How links to unlisted domains are treated (default: neutral)
    #[serde(default)]
    pub unknown_urls: UnknownUrlPolicy,

    /// Extra allow-listed domains, on top of the built-in list
    #[serde(default)]
    pub trusted_domains: Vec<String>,

    /// Extra link-shortener domains, always treated as untrusted
    #[serde(default)]
    pub shortener_domains: Vec<String>,

    /// Format used by --export when the path has no .json/.toml extension
    #[serde(default)]
    pub export_format: ExportFormat,

    /// Print the feature table in terminal output (default: true)
    #[serde(default = "default_true")]
    pub show_features: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulate_oon: false,
            unknown_urls: UnknownUrlPolicy::default(),
            trusted_domains: Vec::new(),
            shortener_domains: Vec::new(),
            export_format: ExportFormat::default(),
            show_features: true,
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.postcheck.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".postcheck.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Environment variables (POSTCHECK_SIMULATE_OON, POSTCHECK_UNKNOWN_URLS, etc.)
        figment = figment.merge(Env::prefixed("POSTCHECK_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // CLI overrides (highest priority)
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "postcheck").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if cli.oon {
            self.simulate_oon = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (key, domains) in [
            ("trusted_domains", &self.trusted_domains),
            ("shortener_domains", &self.shortener_domains),
        ] {
            for domain in domains {
                let d = domain.trim();
                if d.is_empty() {
                    return Err(Error::Config(format!("{key} cannot contain empty entries")));
                }
                if d.contains("://") || d.contains('/') || d.chars().any(char::is_whitespace) {
                    return Err(Error::Config(format!(
                        "{key} entries must be bare domains like 'example.com', got '{domain}'"
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn url_policy(&self) -> UrlPolicy {
        UrlPolicy::extended(
            &self.trusted_domains,
            &self.shortener_domains,
            self.unknown_urls,
        )
    }

    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            simulate_oon: self.simulate_oon,
        }
    }

    /// Create default config file
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# postcheck configuration

# Apply the simulated out-of-network reduction (x0.85) to every analysis
simulate_oon = false

# Links to domains on neither list: "neutral" or "untrusted"
unknown_urls = "neutral"

# Extra domains to trust, on top of the built-in allow-list
# trusted_domains = ["example.com"]

# Extra link shorteners, always treated as untrusted
# shortener_domains = ["sho.rt"]

# Export format when --export has no .json/.toml extension: "json" or "toml"
export_format = "json"

# Print the feature table under each report
show_features = true
"#;

        fs::write(&path, content)?;

        Ok(path)
    }
}
