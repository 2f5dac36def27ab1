use colored::*;
use serde_json;

use crate::cleaner::{BackupSummary, CleanupResult, DuplicateCleanupResult, RestoreResult};
use crate::common::format::{self, format_path, format_size, format_size_colored};
use crate::duplicates::{self, scorer, CacheStats, DuplicateGroup};
use crate::scanner::{Category, FileRecord, PathCatalog, ScanReport};

fn category_icon(category: Category) -> &'static str {
    match category {
        Category::TempFiles => "🗑️",
        Category::UserCache | Category::AppCache => "📁",
        Category::SystemLogs => "📋",
        Category::OldDownloads => "📥",
        Category::BrowserCache => "🌐",
        Category::Thumbnails => "🖼️",
        Category::CrashDumps => "💥",
        Category::DevCache => "🔧",
        Category::Duplicate => "👯",
    }
}

/// Print scan results in human-readable format
pub fn print_scan_report(report: &ScanReport, detailed: bool) {
    println!();
    println!("  {}  Reclaim Scan Results", "🧹");
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  Scanned in {}  •  {} reclaimable  •  {}",
        format::format_duration(report.duration_secs).cyan(),
        format_size_colored(report.total_bytes),
        format::format_count(report.records.len()).dimmed()
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    if report.records.is_empty() {
        println!("  {} Nothing to clean up here!", "✨");
        println!();
        return;
    }

    for (category, count, bytes) in report.totals_by_category() {
        println!(
            "  {} {} ({}, {})",
            category_icon(category),
            category.to_string().bold(),
            format_size_colored(bytes),
            format::format_count(count).dimmed()
        );

        if detailed {
            let files: Vec<&FileRecord> = report
                .records
                .iter()
                .filter(|r| r.category == category)
                .collect();
            for record in files.iter().take(10) {
                println!(
                    "      {} {} ({})",
                    "•".dimmed(),
                    format_path(&record.path).dimmed(),
                    format_size(record.size_bytes).dimmed()
                );
            }
            if files.len() > 10 {
                println!(
                    "      {} ... and {} more",
                    "•".dimmed(),
                    (files.len() - 10).to_string().dimmed()
                );
            }
        }
        println!();
    }

    if report.truncated {
        println!(
            "  {} Result caps were hit; totals are a lower bound.",
            "⚠".yellow()
        );
        println!();
    }

    if !report.errors.is_empty() {
        println!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} warnings:", report.errors.len()).yellow()
        );
        for error in report.errors.iter().take(10) {
            println!("    {} {}", "→".dimmed(), error.dimmed());
        }
        if report.errors.len() > 10 {
            println!("    ... and {} more", report.errors.len() - 10);
        }
        println!();
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} Total reclaimable: {}",
        "💾",
        format_size_colored(report.total_bytes)
    );
    println!(
        "  {} Run {} to remove these files",
        "💡",
        "reclaim clean".cyan()
    );
    println!();
}

/// Print scan results as JSON
pub fn print_scan_json(report: &ScanReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}

/// Print a minimal scan summary
pub fn print_scan_quiet(report: &ScanReport) {
    println!(
        "{}  {}",
        format_size(report.total_bytes),
        report.records.len()
    );
}

/// Print duplicate groups in human-readable format
pub fn print_dup_report(groups: &[DuplicateGroup], stats: &CacheStats, detailed: bool) {
    let savings = duplicates::calculate_savings(groups);
    let removable: usize = groups.iter().map(|g| g.files.len() - 1).sum();

    println!();
    println!("  {} Duplicate Files", "👯");
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} groups  •  {} removable  •  {} hashed, {} from cache",
        groups.len().to_string().cyan(),
        format::format_count(removable).cyan(),
        stats.misses.to_string().dimmed(),
        stats.hits.to_string().dimmed(),
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    if groups.is_empty() {
        println!("  {} No duplicates found!", "✨");
        println!();
        return;
    }

    for (i, group) in groups.iter().enumerate() {
        println!(
            "    Group {} — {} files of {}, {} wasted",
            (i + 1).to_string().bold(),
            group.files.len(),
            format_size(group.size_bytes),
            format_size(group.wasted_bytes()),
        );

        if detailed {
            let keep = scorer::choose_keep(group).map(|k| k.path.clone());
            for member in &group.files {
                let is_keep = keep.as_deref() == Some(member.path.as_path());
                if is_keep {
                    println!(
                        "      {} {}",
                        "keep →".dimmed(),
                        format_path(&member.path).green()
                    );
                } else {
                    println!(
                        "      {} {}",
                        " dup →".dimmed(),
                        format_path(&member.path).dimmed()
                    );
                }
            }
            println!();
        }
    }

    if !detailed {
        println!();
        println!("      Run with {} to see file paths", "--detailed".cyan());
        println!();
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} Potential savings: {}",
        "💾",
        format_size_colored(savings)
    );
    println!(
        "  {} Run with {} to remove redundant copies",
        "💡",
        "--delete".cyan()
    );
    println!();
}

/// Print duplicate groups as JSON
pub fn print_dup_json(groups: &[DuplicateGroup]) {
    let json = serde_json::json!({
        "groups": groups,
        "total_groups": groups.len(),
        "potential_savings": duplicates::calculate_savings(groups),
    });
    match serde_json::to_string_pretty(&json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error serializing: {}", e),
    }
}

/// Print the outcome of a clean run
pub fn print_cleanup_result(result: &CleanupResult) {
    println!();
    println!(
        "  {} Removed {} — freed {}",
        "✓".green(),
        format::format_count(result.cleaned_files.len()).cyan(),
        format_size_colored(result.freed_space),
    );

    print_error_list(&result.errors);
    println!();
}

/// Print the outcome of duplicate removal
pub fn print_duplicate_cleanup(result: &DuplicateCleanupResult) {
    println!();
    println!(
        "  {} Removed {} duplicate copies, kept {} — freed {}",
        "✓".green(),
        result.removed_files.len().to_string().cyan(),
        result.kept_files.len().to_string().cyan(),
        format_size_colored(result.space_freed),
    );

    print_error_list(&result.errors);
    println!();
}

/// Print the outcome of a restore run
pub fn print_restore_result(result: &RestoreResult) {
    println!();
    println!(
        "  {} Restored {}",
        "✓".green(),
        format::format_count(result.restored.len()).cyan(),
    );
    for path in result.restored.iter().take(10) {
        println!("    {} {}", "→".dimmed(), format_path(path).dimmed());
    }
    if result.restored.len() > 10 {
        println!("    ... and {} more", result.restored.len() - 10);
    }

    print_error_list(&result.errors);
    println!();
}

/// Print the list of available backups
pub fn print_backups(backups: &[BackupSummary]) {
    println!();
    println!("  {} Backups", "📦");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    if backups.is_empty() {
        println!("  No backups found.");
        println!();
        return;
    }

    println!(
        "  {:<20} {:>8} {:>10}  {}",
        "Created".dimmed(),
        "Files".dimmed(),
        "Size".dimmed(),
        "Directory".dimmed(),
    );
    println!("  {}", "─".repeat(66).dimmed());

    for backup in backups {
        println!(
            "  {:<20} {:>8} {:>10}  {}",
            backup.timestamp.format("%Y-%m-%d %H:%M:%S"),
            backup.file_count,
            format_size(backup.total_bytes),
            format_path(&backup.dir).dimmed(),
        );
    }

    println!();
    println!(
        "  {} Restore: {}",
        "💡",
        "reclaim restore <directory>".cyan()
    );
    println!();
}

/// Print the category table for this platform
pub fn print_categories(catalog: &PathCatalog) {
    println!();
    println!("  {} Categories", "🗂️");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    println!(
        "  {:<14} {:<26} {:>8}",
        "Name".dimmed(),
        "Description".dimmed(),
        "Patterns".dimmed(),
    );
    println!("  {}", "─".repeat(66).dimmed());

    for spec in catalog.specs() {
        println!(
            "  {:<14} {:<26} {:>8}",
            spec.category.slug().cyan(),
            spec.description,
            spec.patterns.len(),
        );
    }

    println!();
    println!(
        "  {} Scan one: {}",
        "💡",
        "reclaim scan --category <name>".cyan()
    );
    println!();
}

fn print_error_list(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    println!();
    println!("  {} {} errors:", "⚠".yellow(), errors.len());
    for (i, err) in errors.iter().enumerate().take(10) {
        println!("    {} {}", format!("{}.", i + 1).dimmed(), err.dimmed());
    }
    if errors.len() > 10 {
        println!(
            "    ... and {} more",
            (errors.len() - 10).to_string().dimmed()
        );
    }
}
