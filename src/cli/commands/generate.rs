use anyhow::Result;
use colored::Colorize;

use super::super::args::GenerateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::helper::CommandContext;
use crate::core::Localizer;

/// Regenerate every locale: keys are sorted, nothing is pruned, and existing
/// files are backed up unless `--force` is given.
pub fn generate(cmd: GenerateCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::load(&cmd.common, |config| {
        config.prune_missing = false;
        config.sort = true;
        config.backup = !cmd.force;
        Ok(())
    })?;
    let quiet = cmd.silent && !ctx.verbose;

    let scanned = ctx.scan()?;
    if !quiet {
        report::print_scan_summary(scanned.files_scanned, scanned.keys.len());
    }

    if scanned.keys.is_empty() {
        if !quiet {
            report::print_no_keys();
        }
        return Ok(ExitStatus::Success);
    }

    let localizer = Localizer::new(&ctx.config, &ctx.lang_root);
    let result = localizer.generate(&scanned.keys, &ctx.locales, false)?;

    for locale in &result.locales {
        if quiet {
            for failure in &locale.failures {
                eprintln!(
                    "{} {}: {}",
                    "error:".bold().red(),
                    ctx.display_path(&failure.path),
                    failure.reason
                );
            }
            continue;
        }
        report::print_store_warnings(&locale.warnings, ctx.verbose);
        report::print_locale_report(locale, false, ctx.verbose, |p| {
            ctx.display_path(p).to_string()
        });
    }

    if !quiet {
        report::print_generate_result(result.locales.len(), result.failure_count());
    }

    Ok(if result.is_success() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}
