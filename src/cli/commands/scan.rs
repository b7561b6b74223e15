use anyhow::Result;

use super::super::args::ScanCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::helper::CommandContext;
use crate::config::StoreFormat;
use crate::core::Localizer;

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    // Parse the format before anything touches the disk.
    let format = cmd
        .format
        .as_deref()
        .map(str::parse::<StoreFormat>)
        .transpose()?;

    let ctx = CommandContext::load(&cmd.common, |config| {
        if let Some(format) = format {
            config.format = format;
        }
        if cmd.prune_missing {
            config.prune_missing = true;
        }
        if let Some(sort) = cmd.sort_override() {
            config.sort = sort;
        }
        if cmd.backup {
            config.backup = true;
        }
        Ok(())
    })?;

    let scanned = ctx.scan()?;
    report::print_scan_summary(scanned.files_scanned, scanned.keys.len());

    if scanned.keys.is_empty() {
        report::print_no_keys();
        return Ok(ExitStatus::Success);
    }

    let localizer = Localizer::new(&ctx.config, &ctx.lang_root);

    for locale in &ctx.locales {
        let missing = localizer.missing(&scanned.keys, locale);
        report::print_missing(&missing, cmd.list_missing || ctx.verbose);
    }

    let result = localizer.generate(&scanned.keys, &ctx.locales, cmd.dry_run)?;
    for locale in &result.locales {
        report::print_store_warnings(&locale.warnings, ctx.verbose);
        report::print_locale_report(locale, cmd.dry_run, ctx.verbose, |p| {
            ctx.display_path(p).to_string()
        });
    }

    if cmd.dry_run {
        report::print_dry_run_complete();
        return Ok(ExitStatus::Success);
    }

    report::print_generate_result(result.locales.len(), result.failure_count());

    Ok(if result.is_success() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}
