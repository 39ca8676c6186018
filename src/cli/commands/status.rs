use anyhow::Result;

use super::super::{args::StatusCommand, exit_status::ExitStatus, report};
use super::{CommandContext, ConfigPolicy};
use crate::core::{file_status, workspace_status};

pub fn status(cmd: StatusCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common, ConfigPolicy::Opportunistic)?;
    let options = ctx.scan_options()?;

    let status = match &cmd.file {
        Some(file) => file_status(&ctx.resolve_file(file)?, &ctx.store_path, &options)?,
        None => workspace_status(&ctx.root, &ctx.store_path, &options)?,
    };

    report::print_scan_warnings(&status.warnings, &ctx.root, ctx.verbose);
    report::print_status(&status, &ctx.root, cmd.all);

    Ok(ExitStatus::from_findings(
        !status.result.untranslated.is_empty(),
    ))
}
