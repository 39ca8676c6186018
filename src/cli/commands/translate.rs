use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::TranslateCommand,
    exit_status::ExitStatus,
    report::{self, FAILURE_MARK, SUCCESS_MARK},
};
use super::{CommandContext, ConfigPolicy};
use crate::{
    core::{BatchError, BatchOutcome, BatchTranslator, CancelToken, workspace_status},
    translate::translator_from_config,
};

pub fn translate(cmd: TranslateCommand) -> Result<ExitStatus> {
    let mut ctx = CommandContext::new(&cmd.common, ConfigPolicy::Strict)?;
    if let Some(mode) = cmd.mode {
        ctx.config.translate_mode = mode;
    }
    if let Some(langs) = &cmd.langs {
        ctx.config.target_langs = langs
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
    }
    if let Some(from) = &cmd.from {
        ctx.config.source_lang = from.clone();
    }
    ctx.config.validate()?;

    let options = ctx.scan_options()?;
    let status = workspace_status(&ctx.root, &ctx.store_path, &options)?;
    report::print_scan_warnings(&status.warnings, &ctx.root, ctx.verbose);

    let keys = status.result.untranslated_keys();
    if keys.is_empty() {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            "Nothing to translate - all keys are translated".green()
        );
        return Ok(ExitStatus::Success);
    }

    let langs = ctx.config.target_langs.join(", ");
    if cmd.dry_run {
        println!(
            "{} {} key(s) from {} into {}:",
            "Would translate".yellow().bold(),
            keys.len(),
            ctx.config.source_lang,
            langs
        );
        report::print_keys_to(&keys, &mut io::stdout().lock());
        println!("Run without {} to translate them.", "--dry-run".cyan());
        return Ok(ExitStatus::Success);
    }

    let translator = translator_from_config(&ctx.config)?;
    let batch = BatchTranslator::new(
        translator.as_ref(),
        ctx.config.source_lang.clone(),
        ctx.config.target_langs.clone(),
    );

    match run_batch(&batch, &keys, &ctx.store_path)? {
        Ok(BatchOutcome::Completed {
            patch,
            failures,
            merge,
        }) => {
            report::print_failures_to(&failures, &mut io::stderr().lock());
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Translated {} key(s) into {} ({} added, {} replaced)",
                    patch.len(),
                    langs,
                    merge.added,
                    merge.replaced
                )
                .green()
            );
            if failures.is_empty() {
                Ok(ExitStatus::Success)
            } else {
                println!(
                    "{} {} translation(s) failed and were saved as empty strings",
                    "warning:".bold().yellow(),
                    failures.len()
                );
                Ok(ExitStatus::Failure)
            }
        }
        Ok(BatchOutcome::Cancelled { processed, total }) => {
            eprintln!(
                "{} Cancelled after {}/{} key(s); {} was not changed",
                FAILURE_MARK.red(),
                processed,
                total,
                report::display_path(&ctx.root, &ctx.store_path.to_string_lossy())
            );
            Ok(ExitStatus::Failure)
        }
        Err(err) => {
            let BatchError::Persist {
                pending, source, ..
            } = &err;
            eprintln!("{} {}: {}", "error:".bold().red(), err, source);
            eprintln!("Pending keys:");
            report::print_keys_to(pending, &mut io::stderr().lock());
            Ok(ExitStatus::Error)
        }
    }
}

/// Run the batch on a single-threaded runtime, cancelling it on Ctrl-C.
fn run_batch(
    batch: &BatchTranslator<'_>,
    keys: &[String],
    store_path: &Path,
) -> Result<Result<BatchOutcome, BatchError>> {
    let cancel = CancelToken::new();

    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(async {
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_signal.cancel();
                }
            });

            let mut progress = |processed: usize, total: usize| {
                let mut stderr = io::stderr().lock();
                let _ = write!(
                    stderr,
                    "\r{} {}/{}",
                    "Translating".cyan().bold(),
                    processed,
                    total
                );
                let _ = stderr.flush();
            };
            batch.run(keys, &cancel, &mut progress, store_path).await
        });
    eprintln!();

    Ok(outcome)
}
