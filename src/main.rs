use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use tidyfs::cleaner;
use tidyfs::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use tidyfs::cli::output;
use tidyfs::common::config::Config;
use tidyfs::duplicates::{self, DupConfig};
use tidyfs::gate::{Gate, Mode};
use tidyfs::rename;
use tidyfs::workspace::Workspace;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let _log_guard = init_logging(cli.verbose);

    // Execution mode is decided exactly once, before any operation runs.
    let config = Config::load()?;
    let mode = if cli.apply {
        Mode::Live
    } else if cli.dry_run || config.preview {
        Mode::Preview
    } else {
        Mode::Live
    };

    match cli.command {
        Commands::Run => cmd_run(&cli, &config, mode),
        Commands::Clean => cmd_clean(&cli, &config, mode),
        Commands::Dup {
            ref path,
            min_size,
            detailed,
        } => cmd_dup(&cli, &config, path.as_deref(), min_size, detailed),
        Commands::Rename { ref dir } => cmd_rename(&cli, &config, dir.as_deref(), mode),
        Commands::Config { ref action } => cmd_config(action),
        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "tidyfs", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Run (all three operations) ───────────────────────────────────────────────

/// Attempt all three operations. Individual operation failures are reported
/// and recorded but the process still exits 0; only workspace acquisition
/// (checked first) or fatal misconfiguration exits non-zero.
fn cmd_run(cli: &Cli, config: &Config, mode: Mode) -> Result<()> {
    let workspace = Workspace::acquire()?;
    let gate = Gate::new(mode);
    let mut operation_failures = 0usize;

    match cleaner::clean(config, &gate) {
        Ok(report) => print_clean(cli, &report, gate.is_preview()),
        Err(e) => {
            operation_failures += 1;
            eprintln!("  {} cleanup failed: {}", "✗".red(), e);
            tracing::error!("cleanup failed: {}", e);
        }
    }

    let dup_config = DupConfig {
        root: Config::expand_tilde(&config.dup_dir),
        min_size: config.min_dup_size_bytes(),
        show_progress: show_progress(cli),
    };
    match duplicates::find_duplicates(&dup_config, &workspace) {
        Ok(results) => print_dup(cli, &results, false),
        // Losing scratch storage aborts the run, not just this operation
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            operation_failures += 1;
            eprintln!("  {} duplicate scan failed: {}", "✗".red(), e);
            tracing::error!("duplicate scan failed: {}", e);
        }
    }

    match rename::normalize_dir(&Config::expand_tilde(&config.rename_dir), &gate) {
        Ok(report) => print_rename(cli, &report, gate.is_preview()),
        Err(e) => {
            operation_failures += 1;
            eprintln!("  {} rename failed: {}", "✗".red(), e);
            tracing::error!("rename failed: {}", e);
        }
    }

    if operation_failures > 0 && !cli.quiet {
        eprintln!(
            "  {} completed with {} failed operation(s)",
            "⚠".yellow(),
            operation_failures
        );
    }

    Ok(())
}

// ─── Individual operations ────────────────────────────────────────────────────

fn cmd_clean(cli: &Cli, config: &Config, mode: Mode) -> Result<()> {
    let gate = Gate::new(mode);
    let report = cleaner::clean(config, &gate)?;
    print_clean(cli, &report, gate.is_preview());
    Ok(())
}

fn cmd_dup(
    cli: &Cli,
    config: &Config,
    path: Option<&str>,
    min_size: Option<u64>,
    detailed: bool,
) -> Result<()> {
    let root = Config::expand_tilde(path.unwrap_or(&config.dup_dir));
    let workspace = Workspace::acquire()?;

    let dup_config = DupConfig {
        root,
        min_size: min_size.unwrap_or_else(|| config.min_dup_size_bytes()),
        show_progress: show_progress(cli),
    };
    let results = duplicates::find_duplicates(&dup_config, &workspace)?;
    print_dup(cli, &results, detailed);
    Ok(())
}

fn cmd_rename(cli: &Cli, config: &Config, dir: Option<&str>, mode: Mode) -> Result<()> {
    let dir = Config::expand_tilde(dir.unwrap_or(&config.rename_dir));
    let gate = Gate::new(mode);
    let report = rename::normalize_dir(&dir, &gate)?;
    print_rename(cli, &report, gate.is_preview());
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            Config::init_dirs()?;
            let config = Config::default();
            config.save()?;
            println!("  {} tidyfs initialized at ~/.tidyfs", "✓".green());
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "rename_dir" => config.rename_dir = value.clone(),
                "dup_dir" => config.dup_dir = value.clone(),
                "log_age_days" => config.log_age_days = value.parse()?,
                "min_dup_size_mib" => config.min_dup_size_mib = value.parse()?,
                "preview" => config.preview = value.parse()?,
                _ => anyhow::bail!("Unknown config key: {}", key),
            }
            config.save()?;
            println!("  {} set {} = {}", "✓".green(), key, value);
            Ok(())
        }
    }
}

// ─── Output helpers ───────────────────────────────────────────────────────────

fn show_progress(cli: &Cli) -> bool {
    !cli.quiet && cli.format == OutputFormat::Human
}

fn print_clean(cli: &Cli, report: &cleaner::CleanReport, preview: bool) {
    match cli.format {
        OutputFormat::Human => output::print_clean_report(report, preview),
        OutputFormat::Json => output::print_clean_json(report, preview),
        OutputFormat::Quiet => println!(
            "{}  {}",
            report.files_removed,
            report.bytes_freed
        ),
    }
}

fn print_dup(cli: &Cli, results: &duplicates::DupResults, detailed: bool) {
    match cli.format {
        OutputFormat::Human => output::print_dup_results(results, detailed),
        OutputFormat::Json => output::print_dup_json(results),
        OutputFormat::Quiet => output::print_dup_quiet(results),
    }
}

fn print_rename(cli: &Cli, report: &rename::RenameReport, preview: bool) {
    match cli.format {
        OutputFormat::Human => output::print_rename_report(report, preview),
        OutputFormat::Json => output::print_rename_json(report, preview),
        OutputFormat::Quiet => println!("{}  {}", report.renamed, report.collisions),
    }
}

// ─── Logging ──────────────────────────────────────────────────────────────────

/// Install the tracing subscriber: a stderr layer (warnings by default,
/// debug under --verbose) and a daily-rolling file layer under
/// ~/.tidyfs/logs. Log lines never fail back to the caller.
fn init_logging(verbose: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let stderr_filter = if verbose { "tidyfs=debug" } else { "tidyfs=warn" };

    match Config::init_dirs() {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(Config::logs_dir(), "tidyfs.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_filter(
                            EnvFilter::try_from_default_env()
                                .unwrap_or_else(|_| EnvFilter::new(stderr_filter)),
                        ),
                )
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(EnvFilter::new("tidyfs=info")),
                )
                .init();
            Some(guard)
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(stderr_filter)),
                )
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
