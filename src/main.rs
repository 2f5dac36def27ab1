use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use reclaim::cleaner;
use reclaim::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use reclaim::cli::output;
use reclaim::common::config::Config;
use reclaim::common::format;
use reclaim::duplicates::{scorer, DuplicateFinder, DuplicateGroup};
use reclaim::scanner::{DirectoryScanner, PathCatalog, ScanReport};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "reclaim=debug"
        } else {
            "reclaim=warn"
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            ref categories,
            detailed,
        } => cmd_scan(&cli, categories, detailed),

        Commands::Clean {
            ref categories,
            dry_run,
            backup,
            yes,
        } => cmd_clean(&cli, categories, dry_run, backup, yes),

        Commands::Dup {
            ref path,
            min_size,
            detailed,
            delete,
            backup,
            yes,
        } => cmd_dup(&cli, path, min_size, detailed, delete, backup, yes),

        Commands::Restore { ref dir, list } => cmd_restore(&cli, dir.clone(), list),

        Commands::Categories => cmd_categories(&cli),

        Commands::Config { action } => cmd_config(action),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "reclaim", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with('~') {
        let home = dirs::home_dir().unwrap_or_default();
        home.join(
            path.strip_prefix("~/")
                .unwrap_or(path.strip_prefix('~').unwrap_or(path)),
        )
    } else {
        PathBuf::from(path)
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("\n  {} {} [y/N] ", "❓", prompt);
    use std::io::Write;
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn run_scan(
    scanner: &DirectoryScanner,
    categories: &[String],
    show_progress: bool,
) -> Result<ScanReport> {
    let pb = if show_progress {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}% Scanning... ")
                .unwrap()
                .progress_chars("━━░"),
        );
        Some(pb)
    } else {
        None
    };

    let mut on_progress = |pct: u8| {
        if let Some(ref pb) = pb {
            pb.set_position(pct as u64);
        }
    };

    let report = if categories.is_empty() {
        scanner.scan_all(Some(&mut on_progress))
    } else {
        scanner.scan_categories(categories, Some(&mut on_progress))?
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(report)
}

// ─── Scan ─────────────────────────────────────────────────────────────────────

fn cmd_scan(cli: &Cli, categories: &[String], detailed: bool) -> Result<()> {
    let scanner = DirectoryScanner::new(PathCatalog::for_platform());
    let show_progress = !cli.quiet && matches!(cli.format, OutputFormat::Text);

    let report = run_scan(&scanner, categories, show_progress)?;

    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                output::print_scan_quiet(&report);
            } else {
                output::print_scan_report(&report, detailed);
            }
        }
        OutputFormat::Json => output::print_scan_json(&report),
    }

    Ok(())
}

// ─── Clean ────────────────────────────────────────────────────────────────────

fn cmd_clean(
    cli: &Cli,
    categories: &[String],
    dry_run: bool,
    backup: bool,
    yes: bool,
) -> Result<()> {
    let config = Config::load()?;
    let scanner = DirectoryScanner::new(PathCatalog::for_platform());
    let show_progress = !cli.quiet && matches!(cli.format, OutputFormat::Text);

    let report = run_scan(&scanner, categories, show_progress)?;

    if report.records.is_empty() {
        println!("  {} Nothing to clean!", "✨");
        return Ok(());
    }

    if matches!(cli.format, OutputFormat::Text) && !cli.quiet {
        output::print_scan_report(&report, false);
    }

    let paths: Vec<PathBuf> = report.records.iter().map(|r| r.path.clone()).collect();

    if dry_run {
        println!(
            "  {} Dry run — would remove {} ({}). No files modified.",
            "ℹ️",
            format::format_count(paths.len()),
            format::format_size(report.total_bytes)
        );
        return Ok(());
    }

    if !yes {
        let prompt = format!(
            "Permanently remove {} ({})?",
            format::format_count(paths.len()),
            format::format_size(report.total_bytes)
        );
        if !confirm(&prompt)? {
            println!("  {} Cancelled", "✗".red());
            return Ok(());
        }
    }

    if backup {
        let dir = cleaner::create_backup(&paths, &config)?;
        println!(
            "  {} Backup created: {}",
            "📦",
            format::format_path(&dir).cyan()
        );
    }

    let result = cleaner::clean_files(&paths, &config);

    match cli.format {
        OutputFormat::Text => output::print_cleanup_result(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

// ─── Dup ──────────────────────────────────────────────────────────────────────

fn cmd_dup(
    cli: &Cli,
    path: &str,
    min_size: Option<u64>,
    detailed: bool,
    delete: bool,
    backup: bool,
    yes: bool,
) -> Result<()> {
    let config = Config::load()?;
    let root = expand_tilde(path);

    if !root.exists() {
        anyhow::bail!("Path does not exist: {}", root.display());
    }

    let min_size = min_size.unwrap_or(config.min_duplicate_size);
    let show = !cli.quiet && matches!(cli.format, OutputFormat::Text);

    if show {
        println!();
        println!(
            "  {} Scanning for duplicates in: {}",
            "🔍",
            format::format_path(&root).cyan()
        );
        println!();
    }

    let mut finder = DuplicateFinder::from_config(&config);
    let groups = finder.find_duplicates(&root, min_size)?;
    let stats = finder.cache_stats();

    if delete {
        if groups.is_empty() {
            println!("  {} No duplicates found!", "✨");
            return Ok(());
        }

        if show && !yes {
            output::print_dup_report(&groups, &stats, true);
        }

        if backup {
            let candidates: Vec<PathBuf> =
                groups.iter().flat_map(scorer::files_to_remove).collect();
            let dir = cleaner::create_backup(&candidates, &config)?;
            println!(
                "  {} Backup created: {}",
                "📦",
                format::format_path(&dir).cyan()
            );
        }

        let result = if yes {
            cleaner::remove_duplicates(&groups, &config, None)
        } else {
            let mut ask = |group: &DuplicateGroup, keep: &PathBuf| -> bool {
                println!("\n    Keeping {}", format::format_path(keep).green());
                let prompt = format!(
                    "Remove {} redundant copies ({})?",
                    group.files.len() - 1,
                    format::format_size(group.wasted_bytes())
                );
                confirm(&prompt).unwrap_or(false)
            };
            cleaner::remove_duplicates(&groups, &config, Some(&mut ask))
        };

        match cli.format {
            OutputFormat::Text => output::print_duplicate_cleanup(&result),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        }
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                println!(
                    "{}  {}",
                    groups.len(),
                    format::format_size(reclaim::duplicates::calculate_savings(&groups))
                );
            } else {
                output::print_dup_report(&groups, &stats, detailed);
            }
        }
        OutputFormat::Json => output::print_dup_json(&groups),
    }

    Ok(())
}

// ─── Restore ──────────────────────────────────────────────────────────────────

fn cmd_restore(cli: &Cli, dir: Option<String>, list: bool) -> Result<()> {
    let config = Config::load()?;

    if list {
        let backups = cleaner::list_backups(&config)?;
        match cli.format {
            OutputFormat::Text => output::print_backups(&backups),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&backups)?),
        }
        return Ok(());
    }

    let dir = match dir {
        Some(d) => expand_tilde(&d),
        None => match cleaner::most_recent_backup(&config)? {
            Some(d) => {
                let prompt = format!(
                    "Restore the most recent backup ({})?",
                    format::format_path(&d)
                );
                if !confirm(&prompt)? {
                    println!("  {} Cancelled", "✗".red());
                    return Ok(());
                }
                d
            }
            None => anyhow::bail!("No backups found. Create one with 'reclaim clean --backup'."),
        },
    };

    let result = cleaner::restore_backup(&dir)?;

    match cli.format {
        OutputFormat::Text => output::print_restore_result(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

// ─── Categories ───────────────────────────────────────────────────────────────

fn cmd_categories(cli: &Cli) -> Result<()> {
    let catalog = PathCatalog::for_platform();

    match cli.format {
        OutputFormat::Text => output::print_categories(&catalog),
        OutputFormat::Json => {
            let json: Vec<_> = catalog
                .specs()
                .iter()
                .map(|spec| {
                    serde_json::json!({
                        "name": spec.category.slug(),
                        "description": spec.description,
                        "patterns": spec.patterns,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Init => {
            let config = Config::default();
            config.save()?;
            println!(
                "  {} Wrote default config to {}",
                "✓".green(),
                format::format_path(&Config::config_path())
            );
            Ok(())
        }
    }
}
