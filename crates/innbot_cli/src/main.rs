//! `innbot` command-line entry point.
//!
//! # Responsibility
//! - Load configuration and initialize logging once.
//! - Run the chat bot, a one-shot lookup, or an offline record format.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use innbot_core::{
    default_log_level, init_logging, Bot, BotConfig, EgrulClient, RawRecord, RecordNormalizer,
    ReplyService, TelegramTransport,
};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "innbot", version, about = "Registry lookup chat bot")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll the chat service and answer messages until stopped.
    Run,
    /// Look up one identifier and print the reply text.
    Lookup { inn: String },
    /// Format a registry row stored as JSON (`n`, `o`, `i`, `p`, `a` keys).
    Format { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BotConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let level = cli
        .log_level
        .as_deref()
        .or(config.logging.level.as_deref())
        .unwrap_or_else(|| default_log_level());
    init_logging(level, config.logging.dir.as_deref()).map_err(anyhow::Error::msg)?;
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        innbot_core::core_version()
    );

    match cli.command {
        Command::Run => run_bot(&config),
        Command::Lookup { inn } => lookup(&config, &inn),
        Command::Format { file } => format_file(&file),
    }
}

fn registry_client(config: &BotConfig) -> Result<EgrulClient> {
    EgrulClient::new(config.registry.base_url.as_str(), config.registry_timeout())
        .context("failed to create registry client")
}

fn run_bot(config: &BotConfig) -> Result<()> {
    let token = config.require_token()?;
    let transport = TelegramTransport::new(&config.telegram.api_base, token, config.poll_timeout())
        .context("failed to create chat transport")?;
    let replies = ReplyService::new(registry_client(config)?);
    Bot::new(transport, replies).run()
}

fn lookup(config: &BotConfig, inn: &str) -> Result<()> {
    let replies = ReplyService::new(registry_client(config)?);
    let message = replies
        .lookup_message(inn)
        .with_context(|| format!("lookup failed for {inn}"))?;
    println!("{message}");
    Ok(())
}

fn format_file(file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let record: RawRecord = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a registry row", file.display()))?;
    let canonical = RecordNormalizer::new().normalize(&record)?;
    println!("{canonical}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_lookup_with_global_flags() {
        let cli = Cli::parse_from(["innbot", "lookup", "7707083893", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Lookup { ref inn } if inn == "7707083893"));
    }
}
