use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use translation_tools::{
    audit,
    config::{Overrides, Settings},
    project,
};

#[derive(Parser)]
#[command(name = "translation-tools")]
#[command(about = "Maintenance tools for the translations CSV", version, long_about = None)]
struct Cli {
    /// YAML settings file
    #[arg(short, long, env = "TRANSLATION_TOOLS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Keep only the allow-listed columns and rewrite the CSV in place
    Restrict {
        /// Translations CSV
        #[arg(short, long, env = "TRANSLATIONS_CSV")]
        file: Option<PathBuf>,

        /// Columns to keep, in output order (e.g. Key,en,hi)
        #[arg(long, value_delimiter = ',')]
        headers: Option<Vec<String>>,
    },
    /// Print every line containing a substring, case-insensitively
    Audit {
        /// Translations CSV
        #[arg(short, long, env = "TRANSLATIONS_CSV")]
        file: Option<PathBuf>,

        /// Text to look for
        #[arg(short, long)]
        needle: Option<String>,

        /// Characters of each matching line to print
        #[arg(long)]
        preview_chars: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if cli.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) settings: defaults < config file < flags/env ─────────────
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Restrict { file, headers } => run_restrict(settings.with_overrides(Overrides {
            file,
            headers,
            ..Default::default()
        })),
        Command::Audit {
            file,
            needle,
            preview_chars,
        } => run_audit(settings.with_overrides(Overrides {
            file,
            needle,
            preview_chars,
            ..Default::default()
        })),
    }
}

fn run_restrict(settings: Settings) -> Result<()> {
    let path = settings.source_path()?;
    info!(path = %path.display(), headers = ?settings.headers, "restricting columns");

    let outcome = project::project(path, settings.headers.as_slice())
        .with_context(|| format!("restricting {}", path.display()))?;

    if let Some(warning) = outcome.warning() {
        println!("Warning: {}", warning);
    }
    println!(
        "Successfully filtered {}: {} rows, columns [{}]",
        path.display(),
        outcome.rows,
        outcome.headers.join(", ")
    );
    Ok(())
}

fn run_audit(settings: Settings) -> Result<()> {
    let path = settings.source_path()?;
    let matches = audit::scan(path, &settings.audit.needle, settings.audit.preview_chars)?;

    for m in &matches {
        println!("{}: {}...", m.line, m.preview);
    }
    println!(
        "→ {} line(s) containing {:?} in {}",
        matches.len(),
        settings.audit.needle,
        path.display()
    );
    Ok(())
}
