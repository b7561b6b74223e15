//! Report formatting and printing utilities.
//!
//! Kept apart from the core so the engine can be used as a library without any
//! terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{LocaleReport, MissingReport, StoreWarning, default_value};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of keys listed per locale when not verbose.
const MAX_KEYS_DISPLAY: usize = 20;

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

pub fn print_scan_summary(files: usize, keys: usize) {
    print_scan_summary_to(files, keys, &mut io::stdout().lock());
}

pub fn print_scan_summary_to<W: Write>(files: usize, keys: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} source {}, found {} translation {}",
            files,
            plural(files, "file", "files"),
            keys,
            plural(keys, "key", "keys")
        )
        .green()
    );
}

pub fn print_no_keys() {
    eprintln!(
        "{} No translation keys found. Make sure `functions` and `dirs` are configured correctly.",
        "warning:".bold().yellow()
    );
}

/// Report store documents that were skipped while loading a locale.
pub fn print_store_warnings(warnings: &[StoreWarning], verbose: bool) {
    print_store_warnings_to(warnings, verbose, &mut io::stderr().lock());
}

pub fn print_store_warnings_to<W: Write>(warnings: &[StoreWarning], verbose: bool, writer: &mut W) {
    if warnings.is_empty() {
        return;
    }

    if verbose {
        for warning in warnings {
            let _ = writeln!(
                writer,
                "{} Ignoring unreadable translation file {}: {}",
                "warning:".bold().yellow(),
                warning.file_path,
                warning.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} translation file(s) could not be read and were treated as empty (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
    }
}

/// Print the missing-translation count for a locale, optionally with the keys.
pub fn print_missing(report: &MissingReport, list: bool) {
    print_missing_to(report, list, &mut io::stdout().lock());
}

pub fn print_missing_to<W: Write>(report: &MissingReport, list: bool, writer: &mut W) {
    if report.missing.is_empty() {
        let _ = writeln!(
            writer,
            "  {} All translations exist for {}",
            SUCCESS_MARK.green(),
            report.locale.bold()
        );
        return;
    }

    let count = report.missing.len();
    let _ = writeln!(
        writer,
        "  {} missing {} for {}",
        count.to_string().yellow().bold(),
        plural(count, "translation", "translations"),
        report.locale.bold()
    );

    if list {
        print_key_table(&report.missing, writer);
    }
}

/// Keys next to the placeholder value they receive, aligned by display width.
fn print_key_table<W: Write>(keys: &[String], writer: &mut W) {
    let width = keys
        .iter()
        .map(|k| UnicodeWidthStr::width(k.as_str()))
        .max()
        .unwrap_or(0);

    for key in keys {
        let padding = width - UnicodeWidthStr::width(key.as_str());
        let _ = writeln!(
            writer,
            "    {} {}{:padding$}  {}",
            "-".dimmed(),
            key,
            "",
            default_value(key).dimmed(),
            padding = padding
        );
    }
}

/// Print what happened to one locale.
pub fn print_locale_report<F>(report: &LocaleReport, dry_run: bool, verbose: bool, display: F)
where
    F: Fn(&std::path::Path) -> String,
{
    print_locale_report_to(report, dry_run, verbose, display, &mut io::stdout().lock());
}

pub fn print_locale_report_to<W, F>(
    report: &LocaleReport,
    dry_run: bool,
    verbose: bool,
    display: F,
    writer: &mut W,
) where
    W: Write,
    F: Fn(&std::path::Path) -> String,
{
    let verb = if dry_run { "would add" } else { "added" };
    let prune_verb = if dry_run { "would prune" } else { "pruned" };

    let mark = if report.is_success() {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.red()
    };

    let mut line = format!(
        "{} {}: {} {} {}",
        mark,
        report.locale.bold(),
        verb,
        report.added.len(),
        plural(report.added.len(), "key", "keys"),
    );
    if !report.pruned.is_empty() {
        line.push_str(&format!(", {} {}", prune_verb, report.pruned.len()));
    }
    if !dry_run {
        line.push_str(&format!(
            ", wrote {} {}",
            report.written.len(),
            plural(report.written.len(), "file", "files")
        ));
    }
    let _ = writeln!(writer, "{}", line);

    let limit = if verbose { usize::MAX } else { MAX_KEYS_DISPLAY };
    if verbose || dry_run {
        print_key_changes(&report.added, "+".green().to_string(), limit, writer);
        print_key_changes(&report.pruned, "-".red().to_string(), limit, writer);
    }

    if verbose {
        for backup in &report.backups {
            let _ = writeln!(writer, "    {} {}", "backup:".dimmed(), display(backup));
        }
    }

    for failure in &report.failures {
        let _ = writeln!(
            writer,
            "    {} {}: {}",
            "error:".bold().red(),
            display(&failure.path),
            failure.reason
        );
    }
}

fn print_key_changes<W: Write>(keys: &[String], sign: String, limit: usize, writer: &mut W) {
    for key in keys.iter().take(limit) {
        let _ = writeln!(writer, "    {} {}", sign, key);
    }
    if keys.len() > limit {
        let _ = writeln!(
            writer,
            "    {}",
            format!("... and {} more", keys.len() - limit).dimmed()
        );
    }
}

pub fn print_dry_run_complete() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        "Dry run completed. No files were modified.".green()
    );
}

pub fn print_generate_result(locale_count: usize, failure_count: usize) {
    print_generate_result_to(locale_count, failure_count, &mut io::stdout().lock());
}

pub fn print_generate_result_to<W: Write>(locale_count: usize, failure_count: usize, writer: &mut W) {
    if failure_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Translation files updated for {} {}",
                locale_count,
                plural(locale_count, "locale", "locales")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Failed to write {} translation {}",
                failure_count,
                plural(failure_count, "file", "files")
            )
            .red()
        );
    }
}
