//! Report formatting and printing utilities.
//!
//! Occurrences are shown in cargo-style format with the source line and a
//! caret under the call site. Kept out of the core so the engine can be used
//! as a library.

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{KeyOccurrence, LineIndex, PairFailure, ScanWarning, StatusReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// How an occurrence is labelled in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceKind {
    Untranslated,
    Translated,
}

/// Print a status report to stdout.
pub fn print_status(report: &StatusReport, root: &Path, show_translated: bool) {
    print_status_to(report, root, show_translated, &mut io::stdout().lock());
}

/// Print a status report to a custom writer.
pub fn print_status_to<W: Write>(
    report: &StatusReport,
    root: &Path,
    show_translated: bool,
    writer: &mut W,
) {
    let mut sources = SourceCache::default();

    report_occurrences_to(
        &report.result.untranslated,
        OccurrenceKind::Untranslated,
        root,
        &mut sources,
        writer,
    );
    if show_translated {
        report_occurrences_to(
            &report.result.translated,
            OccurrenceKind::Translated,
            root,
            &mut sources,
            writer,
        );
    }

    print_status_summary_to(report, writer);
}

/// Print a warning about files that could not be scanned.
///
/// Without `verbose` only the count is shown.
pub fn print_scan_warnings(warnings: &[ScanWarning], root: &Path, verbose: bool) {
    print_scan_warnings_to(warnings, root, verbose, &mut io::stderr().lock());
}

pub fn print_scan_warnings_to<W: Write>(
    warnings: &[ScanWarning],
    root: &Path,
    verbose: bool,
    writer: &mut W,
) {
    if warnings.is_empty() {
        return;
    }

    if !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be scanned (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
        return;
    }

    for warning in warnings {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            "warning:".bold().yellow(),
            display_path(root, &warning.file_path),
            warning.error
        );
    }
}

/// Print pairs the backend could not translate.
pub fn print_failures_to<W: Write>(failures: &[PairFailure], writer: &mut W) {
    for failure in failures {
        let _ = writeln!(
            writer,
            "{} \"{}\" [{}]: {}",
            "warning:".bold().yellow(),
            failure.key,
            failure.lang,
            failure.error
        );
    }
}

/// List keys with a leading bullet.
pub fn print_keys_to<W: Write>(keys: &[String], writer: &mut W) {
    for key in keys {
        let _ = writeln!(writer, "  - {}", key);
    }
}

/// Path relative to `root` when possible.
pub fn display_path(root: &Path, file_path: &str) -> String {
    Path::new(file_path)
        .strip_prefix(root)
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

// ============================================================
// Internal Functions
// ============================================================

/// Source lines read on demand, once per file.
#[derive(Default)]
struct SourceCache {
    files: HashMap<String, Option<Vec<String>>>,
}

impl SourceCache {
    fn line(&mut self, file_path: &str, line: usize) -> Option<&str> {
        self.files
            .entry(file_path.to_string())
            .or_insert_with(|| read_lines(file_path))
            .as_ref()?
            .get(line)
            .map(String::as_str)
    }
}

fn read_lines(file_path: &str) -> Option<Vec<String>> {
    let bytes = fs::read(file_path).ok()?;
    let content = String::from_utf8_lossy(&bytes);
    let index = LineIndex::new(&content);
    Some(
        (0..index.line_count())
            .filter_map(|line| index.line_text(line).map(str::to_string))
            .collect(),
    )
}

fn report_occurrences_to<W: Write>(
    occurrences: &[KeyOccurrence],
    kind: OccurrenceKind,
    root: &Path,
    sources: &mut SourceCache,
    writer: &mut W,
) {
    let max_line_width = occurrences
        .iter()
        .map(|o| (o.line + 1).to_string().len())
        .max()
        .unwrap_or(1);

    for occurrence in occurrences {
        let source_line = sources.line(&occurrence.file_path, occurrence.line);
        print_occurrence(
            occurrence,
            kind,
            root,
            source_line,
            writer,
            max_line_width,
        );
    }
}

fn print_occurrence<W: Write>(
    occurrence: &KeyOccurrence,
    kind: OccurrenceKind,
    root: &Path,
    source_line: Option<&str>,
    writer: &mut W,
    max_line_width: usize,
) {
    let line = occurrence.line + 1;
    let col = occurrence.character + 1;

    let (label, caret) = match kind {
        OccurrenceKind::Untranslated => ("warning: untranslated".bold().yellow(), "^".yellow()),
        OccurrenceKind::Translated => ("note: translated".bold().green(), "^".green()),
    };

    let _ = writeln!(writer, "{} \"{}\"", label, occurrence.key);
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        display_path(root, &occurrence.file_path),
        line,
        col
    );

    if let Some(source_line) = source_line {
        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        let prefix: String = source_line.chars().take(occurrence.character).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret,
            width = max_line_width,
            padding = caret_padding
        );
    }
    let _ = writeln!(writer);
}

fn print_status_summary_to<W: Write>(report: &StatusReport, writer: &mut W) {
    let (untranslated, translated) = report.result.unique_keys();
    let files = if report.files_scanned == 1 {
        "file"
    } else {
        "files"
    };

    if untranslated.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {} - all {} key(s) translated",
                report.files_scanned,
                files,
                translated.len()
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} untranslated key(s) in {} occurrence(s), {} translated ({} source {} checked)",
            FAILURE_MARK.red(),
            untranslated.len().to_string().red(),
            report.result.untranslated.len(),
            translated.len(),
            report.files_scanned,
            files
        );
    }
}
