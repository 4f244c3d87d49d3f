use colored::Colorize;

use crate::cleaner::CleanReport;
use crate::common::format;
use crate::duplicates::DupResults;
use crate::rename::RenameReport;

// ── Duplicates ────────────────────────────────────────────────────────────────

/// Print duplicate groups in the stable output format: one
/// `<hex-digest> <path>` line per member, groups contiguous by digest,
/// then a trailing summary line with the total group count.
pub fn print_dup_results(results: &DupResults, detailed: bool) {
    for group in &results.groups {
        for member in &group.members {
            println!("{} {}", group.digest, member.path.display());
        }
    }
    println!("total groups: {}", results.total_groups);

    if detailed {
        println!();
        for group in &results.groups {
            println!(
                "  {} {} x {} ({} reclaimable)",
                "•".dimmed(),
                format::format_size(group.members.first().map(|m| m.size).unwrap_or(0)),
                group.members.len(),
                format::format_size_colored(group.wasted_bytes),
            );
        }
        println!(
            "  scanned {} / hashed {} in {}, {} wasted",
            format::format_count(results.files_scanned),
            results.files_hashed,
            format::format_duration(results.duration_secs),
            format::format_size(results.total_wasted),
        );
    }

    for warning in &results.warnings {
        eprintln!("  {} {}", "⚠".yellow(), warning);
    }
}

pub fn print_dup_json(results: &DupResults) {
    let json = serde_json::json!({
        "groups": results.groups.iter().map(|g| {
            serde_json::json!({
                "digest": g.digest,
                "wasted_bytes": g.wasted_bytes,
                "members": g.members.iter().map(|m| {
                    serde_json::json!({
                        "path": m.path.display().to_string(),
                        "size": m.size,
                    })
                }).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
        "files_scanned": results.files_scanned,
        "files_hashed": results.files_hashed,
        "total_groups": results.total_groups,
        "total_duplicates": results.total_duplicates,
        "total_wasted": results.total_wasted,
        "duration_secs": results.duration_secs,
        "warnings": results.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
}

pub fn print_dup_quiet(results: &DupResults) {
    println!(
        "{}  {}  {}",
        results.total_groups,
        results.total_duplicates,
        format::format_size(results.total_wasted)
    );
}

// ── Cleanup ───────────────────────────────────────────────────────────────────

pub fn print_clean_report(report: &CleanReport, preview: bool) {
    let verb = if preview { "would remove" } else { "removed" };
    println!(
        "  {} {} {} ({})",
        "✓".green(),
        verb,
        format::format_count(report.files_removed),
        format::format_size(report.bytes_freed)
    );
    for warning in &report.warnings {
        eprintln!("  {} {}", "⚠".yellow(), warning);
    }
}

pub fn print_clean_json(report: &CleanReport, preview: bool) {
    let json = serde_json::json!({
        "preview": preview,
        "files_removed": report.files_removed,
        "bytes_freed": report.bytes_freed,
        "warnings": report.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
}

// ── Rename ────────────────────────────────────────────────────────────────────

pub fn print_rename_report(report: &RenameReport, preview: bool) {
    let verb = if preview { "would rename" } else { "renamed" };
    println!(
        "  {} {} {}, {} collision(s) avoided",
        "✓".green(),
        verb,
        format::format_count(report.renamed),
        report.collisions
    );
    for warning in &report.warnings {
        eprintln!("  {} {}", "⚠".yellow(), warning);
    }
}

pub fn print_rename_json(report: &RenameReport, preview: bool) {
    let json = serde_json::json!({
        "preview": preview,
        "renamed": report.renamed,
        "collisions": report.collisions,
        "plan": report.plan.iter().map(|p| {
            serde_json::json!({
                "original": p.original.display().to_string(),
                "canonical": p.canonical,
                "disposition": format!("{:?}", p.disposition),
            })
        }).collect::<Vec<_>>(),
        "warnings": report.warnings,
    });
    println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
}
