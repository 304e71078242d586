// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::io::{IsTerminal, Read};
use std::path::Path;

use console::{StyledObject, style};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{MediaType, RiskTier, Severity};
use crate::error::{Error, Result};
use crate::services::analyzer::{Analyzer, Post};
use crate::services::reporter::{self, BatchReport, ExportFormat, Report, ReportEntry};

/// Posts analyzed per progress tick in batch mode.
const BATCH_CHUNK: usize = 64;
const PREVIEW_CHARS: usize = 48;
const DEFAULT_EXPORT_PATH: &str = "postcheck-report.json";

/// One line of a batch input file.
#[derive(Debug, Deserialize)]
struct BatchEntry {
    text: String,
    #[serde(default)]
    media: Option<String>,
}

/// Parse JSON Lines batch input. Blank lines are skipped; line numbers are 1-based.
pub fn parse_batch(content: &str) -> Result<Vec<Post>> {
    let mut posts = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let entry: BatchEntry = serde_json::from_str(line).map_err(|e| {
            warn!(line = line_no, error = %e, "malformed batch entry");
            Error::Batch {
                line: line_no,
                message: e.to_string(),
            }
        })?;

        let media = match entry.media.as_deref() {
            Some(raw) => raw.parse::<MediaType>()?,
            None => MediaType::None,
        };
        posts.push(Post::new(entry.text, media));
    }

    Ok(posts)
}

/// Join prompt lines into one post, stopping at the first blank line.
pub fn read_post_lines<I, E>(lines: I) -> std::result::Result<String, E>
where
    I: IntoIterator<Item = std::result::Result<String, E>>,
{
    let mut post = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        post.push(line);
    }
    Ok(post.join("\n"))
}

pub struct App {
    cli: Cli,
    config: Config,
    analyzer: Analyzer,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            simulate_oon = config.simulate_oon,
            unknown_urls = %config.unknown_urls,
            trusted_extra = config.trusted_domains.len(),
            shorteners_extra = config.shortener_domains.len(),
            "config loaded"
        );
        let analyzer = Analyzer::new(config.url_policy());
        Ok(Self {
            cli,
            config,
            analyzer,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd);
        }

        let media = self.cli_media()?;

        if !self.cli.text.is_empty() {
            let text = self.cli.text.join(" ");
            return self.analyze_once(&text, media);
        }

        let is_interactive = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        if is_interactive && !self.cli.json {
            return self.prompt_loop(media);
        }

        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let text = text.trim_end_matches(['\n', '\r']);
        self.analyze_once(text, media)
    }

    fn cli_media(&self) -> Result<MediaType> {
        match self.cli.media.as_deref() {
            Some(raw) => raw.parse(),
            None => Ok(MediaType::None),
        }
    }

    fn analyze_once(&self, text: &str, media: MediaType) -> Result<()> {
        let analysis = self
            .analyzer
            .analyze(text, media, &self.config.analyze_options());
        let report = analysis.report();

        if self.cli.json {
            println!("{}", report.render(ExportFormat::Json)?);
        } else {
            self.display_report(&report);
        }

        if let Some(ref path) = self.cli.export {
            self.export(&report, path)?;
        }

        Ok(())
    }

    fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Batch { file } => self.run_batch(file),
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                println!("Simulate out-of-network: {}", self.config.simulate_oon);
                println!("Unknown URLs: {}", self.config.unknown_urls);
                println!("Export format: {}", self.config.export_format);
                println!("Show features: {}", self.config.show_features);
                println!();
                let policy = self.analyzer.policy();
                println!("[domains]");
                println!(
                    "  trusted: {} total, extra: {}",
                    policy.trusted.len(),
                    join_or_none(&self.config.trusted_domains)
                );
                println!(
                    "  shorteners: {} total, extra: {}",
                    policy.shorteners.len(),
                    join_or_none(&self.config.shortener_domains)
                );
                if let Some(path) = Config::config_path() {
                    println!();
                    println!("User config: {}", path.display());
                }
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "postcheck", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    // ─── Interactive ───

    fn prompt_loop(&self, cli_media: MediaType) -> Result<()> {
        eprintln!(
            "{} Paste a post to check it before publishing. Ctrl+C to quit.",
            style("→").cyan()
        );

        loop {
            eprintln!();
            let mut first = true;
            let text = read_post_lines(std::iter::from_fn(|| {
                let prompt = if std::mem::take(&mut first) {
                    "Post text (empty line to finish)"
                } else {
                    "..."
                };
                Some(
                    Input::<String>::new()
                        .with_prompt(prompt)
                        .allow_empty(true)
                        .interact_text(),
                )
            }))?;

            let media = if self.cli.media.is_some() {
                cli_media
            } else {
                self.prompt_media()?
            };

            let simulate_oon = self.config.simulate_oon
                || Confirm::new()
                    .with_prompt("Simulate out-of-network reach?")
                    .default(false)
                    .interact()?;

            let mut options = self.config.analyze_options();
            options.simulate_oon = simulate_oon;

            let analysis = self.analyzer.analyze(&text, media, &options);
            let report = analysis.report();
            self.display_report(&report);

            match self.cli.export {
                Some(ref path) => self.export(&report, path)?,
                None => {
                    let wants_export = Confirm::new()
                        .with_prompt("Export this report?")
                        .default(false)
                        .interact()?;
                    if wants_export {
                        let path: String = Input::new()
                            .with_prompt("Export path")
                            .default(DEFAULT_EXPORT_PATH.to_string())
                            .interact_text()?;
                        self.export(&report, Path::new(&path))?;
                    }
                }
            }

            let again = Confirm::new()
                .with_prompt("Analyze another post?")
                .default(true)
                .interact()?;
            if !again {
                return Ok(());
            }
        }
    }

    fn prompt_media(&self) -> Result<MediaType> {
        let selection = Select::new()
            .with_prompt("Attached media")
            .items(MediaType::ALL)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(idx) => MediaType::ALL[idx].parse(),
            None => Err(Error::Cancelled),
        }
    }

    // ─── Batch ───

    fn run_batch(&self, file: &Path) -> Result<()> {
        let content = std::fs::read_to_string(file)?;
        let posts = parse_batch(&content)?;

        if posts.is_empty() {
            self.print_warning(&format!("No posts found in {}", file.display()));
            return Ok(());
        }

        self.print_status(&format!("Analyzing {} posts...", posts.len()));

        let pb = if self.cli.json || !std::io::stderr().is_terminal() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(posts.len() as u64)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Posts [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let options = self.config.analyze_options();
        let mut reports = Vec::with_capacity(posts.len());
        for chunk in posts.chunks(BATCH_CHUNK) {
            reports.extend(
                self.analyzer
                    .analyze_batch(chunk, &options)
                    .iter()
                    .map(Report::from_analysis),
            );
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        let batch = BatchReport { reports };

        if self.cli.json {
            println!("{}", reporter::render(&batch, ExportFormat::Json)?);
        } else {
            display_batch(&posts, &batch.reports);
        }

        if let Some(ref path) = self.cli.export {
            self.export(&batch, path)?;
        }

        Ok(())
    }

    // ─── Output ───

    fn export<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let format = ExportFormat::from_path(path).unwrap_or(self.config.export_format);
        reporter::export(value, path, format)?;
        self.print_info(&format!("Report saved to {} ({format})", path.display()));
        Ok(())
    }

    fn display_report(&self, report: &Report) {
        println!();
        println!(
            "{} {}/100  {}",
            style("Overall score:").bold(),
            style(report.overall_score).bold(),
            tier_style(report.risk_tier, format!("[{}]", report.risk_tier))
        );
        println!(
            "  Safety {:.1}  Quality {:.1}  Engagement {:.1}",
            report.safety_score, report.quality_score, report.engagement_score
        );

        if !report.triggered_flags.is_empty() {
            let flags: Vec<String> = report
                .triggered_flags
                .iter()
                .map(|f| {
                    if f.is_hard() {
                        style(f.as_str()).red().bold().to_string()
                    } else {
                        style(f.as_str()).yellow().to_string()
                    }
                })
                .collect();
            println!("  Flags: {}", flags.join(", "));
        }

        if !report.penalties.is_empty() {
            println!();
            println!("{}", style("Penalties").bold().underlined());
            for entry in &report.penalties {
                print_entry(entry, severity_style(entry.severity, entry.severity.as_str()));
            }
        }

        if !report.boosts.is_empty() {
            println!();
            println!("{}", style("Boosts").bold().underlined());
            for entry in &report.boosts {
                print_entry(entry, style("BOOST").green());
            }
        }

        if !report.warnings.is_empty() {
            println!();
            println!("{}", style("Warnings").bold().underlined());
            for warning in &report.warnings {
                println!("  {} {}", style("!").red().bold(), warning);
            }
        }

        println!();
        println!("{}", style("Recommendations").bold().underlined());
        for rec in &report.recommendations {
            println!("  {} {}", style("•").cyan(), rec);
        }

        if self.config.show_features {
            let f = &report.features;
            println!();
            println!("{}", style("Features").bold().underlined());
            println!("  Length: {} chars", f.length);
            println!("  Caps ratio: {:.0}%", f.caps_ratio * 100.0);
            println!("  Questions: {}", f.question_count);
            println!("  Newlines: {}", f.newline_count);
            println!("  URLs: {}", f.url_count);
            println!("  Mentions: {}", f.mention_count);
            println!("  Hashtags: {}", f.hashtag_count);
            println!("  Media: {}", f.media_type);
        }
        println!();
    }

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}

fn display_batch(posts: &[Post], reports: &[Report]) {
    println!();
    println!(
        "{}",
        style(format!("{:>4}  {:>5}  {:<8}  {:<40}  {}", "#", "Score", "Tier", "Flags", "Post"))
            .bold()
    );
    for (i, (post, report)) in posts.iter().zip(reports).enumerate() {
        let flags: Vec<&str> = report.triggered_flags.iter().map(|f| f.as_str()).collect();
        let flags = if flags.is_empty() {
            "-".to_string()
        } else {
            flags.join(",")
        };
        println!(
            "{:>4}  {:>5}  {}  {:<40}  {}",
            i + 1,
            report.overall_score,
            tier_style(report.risk_tier, format!("{:<8}", report.risk_tier)),
            truncate_chars(&flags, 40),
            truncate_chars(&post.text.replace('\n', " "), PREVIEW_CHARS)
        );
    }

    let count = reports.len();
    let mean = reports.iter().map(|r| f64::from(r.overall_score)).sum::<f64>() / count as f64;
    let flagged = reports.iter().filter(|r| !r.triggered_flags.is_empty()).count();
    println!();
    println!(
        "{} posts, mean score {:.1}, {} flagged",
        count, mean, flagged
    );
}

fn print_entry<D: std::fmt::Display>(entry: &ReportEntry, tag: StyledObject<D>) {
    println!(
        "  [{}] {}: {}",
        tag,
        style(&entry.label).bold(),
        entry.impact
    );
    println!("     {}", style(&entry.description).dim());
}

fn tier_style<D>(tier: RiskTier, value: D) -> StyledObject<D> {
    match tier {
        RiskTier::Low => style(value).green(),
        RiskTier::Medium => style(value).yellow(),
        RiskTier::High => style(value).red(),
        RiskTier::Critical => style(value).red().bold(),
    }
}

fn severity_style<D>(severity: Severity, value: D) -> StyledObject<D> {
    match severity {
        Severity::Low => style(value).dim(),
        Severity::Medium => style(value).yellow(),
        Severity::High => style(value).red(),
        Severity::Critical => style(value).red().bold(),
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
