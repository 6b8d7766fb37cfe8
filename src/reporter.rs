use crate::cli::OutputFormat;
use crate::error::ConvertError;
use crate::models::{ConvertReport, FileReport, Outcome};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::style;
use std::fs;
use std::path::Path;

pub const WORKFLOW_HINT: &str = "Run the script with --dry-run until all files can be converted.\n\
Otherwise the author list can not be generated correctly.";

/// Line announcing an ignored directory
pub fn format_ignored_dir(dir: &str) -> String {
    format!(" ├─ ◽ {} skipped", dir)
}

/// Progress line for one file
pub fn format_file(file: &FileReport) -> String {
    let path = file.path.display();
    match file.outcome {
        Outcome::AlreadySpdx => format!(" ├─ ✅ {}", style(format!("{} SPDX", path)).green()),
        Outcome::WouldReplace | Outcome::Replaced => format!(
            " ├─ ☑️  {}",
            style(format!("{} {}", path, file.outcome.label())).cyan()
        ),
        Outcome::Vendored => format!(" ├─ 🔶 {}", style(format!("{} skipped", path)).yellow()),
        Outcome::Ignorable => format!(" ├─ ◽ {} skipped", path),
        Outcome::Unhandled => format!(" ├─ ❌ {}", style(format!("{} Not handled", path)).red()),
    }
}

/// Print a file's progress line; unhandled files are listed after the walk.
pub fn print_file(file: &FileReport) {
    if file.outcome != Outcome::Unhandled {
        println!("{}", format_file(file));
    }
}

/// List the unhandled files and the author list outcome
pub fn print_completion(report: &ConvertReport) {
    for file in report.unhandled() {
        println!("{}", format_file(file));
    }
    println!();

    if report.dry_run {
        println!(" └─ ✅ {}\n", style("Can generate AUTHORS.md").green());
        println!("{}", report.authors_markdown);
    } else {
        println!(
            " └─ ✅ {}",
            style(format!("Appended {}", report.authors_file.display())).green()
        );
    }
}

/// Describe a fatal error: the file, the reason and the offending line.
pub fn format_failure(err: &ConvertError) -> String {
    let reason = match err.root_cause() {
        ConvertError::UnrecognizedLicenseLine { .. } => "Unrecognized license:".to_string(),
        ConvertError::UnrecognizedCopyrightLine { .. } => "Unrecognized copyright:".to_string(),
        other => other.to_string(),
    };
    let mut output = match err.path() {
        Some(path) => format!(" ├─ ❌ {}", style(format!("{} {}", path.display(), reason)).red()),
        None => format!(" ├─ ❌ {}", style(reason).red()),
    };
    if let Some(line) = err.offending_line() {
        output.push_str(&format!("\n    └─ {}", line));
    }
    output
}

pub fn print_abort(err: &ConvertError, dry_run: bool) {
    eprintln!("{}", format_failure(err));

    let banner = [
        "                                                                      ",
        "                            ❌ ABORTING ❌                            ",
        " Please manually fix the error pointed out above and rerun the script.",
        "                                                                      ",
    ];
    for line in banner {
        eprintln!("{}", style(line).white().on_red());
    }
    eprintln!();

    if !dry_run {
        eprintln!("{}", style(WORKFLOW_HINT).green());
    }
}

/// Generate and output the run summary in the specified format
pub fn generate_summary(
    report: &ConvertReport,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let output = match format {
        OutputFormat::Terminal => format_terminal(report),
        OutputFormat::Json => format_json(report)?,
    };

    if let Some(path) = output_path {
        fs::write(path, output)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("Summary written to {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_terminal(report: &ConvertReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Outcome").fg(Color::Cyan),
            Cell::new("Files").fg(Color::Cyan),
        ]);

    for (outcome, count) in &report.by_outcome {
        table.add_row(vec![outcome.label().to_string(), count.to_string()]);
    }
    table.add_row(vec![
        Cell::new("unique authors").fg(Color::Green),
        Cell::new(report.authors.len().to_string()),
    ]);

    let mode = if report.dry_run { "dry run" } else { "converted" };
    format!("Summary ({}) for {}:\n{}", mode, report.root.display(), table)
}

fn format_json(report: &ConvertReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn file(path: &str, outcome: Outcome) -> FileReport {
        FileReport {
            path: PathBuf::from(path),
            outcome,
            authors: vec![],
        }
    }

    fn create_test_report() -> ConvertReport {
        let files = vec![
            file("/p/a.php", Outcome::Replaced),
            file("/p/b.php", Outcome::Replaced),
            file("/p/run.sh", Outcome::Unhandled),
        ];
        let mut by_outcome = BTreeMap::new();
        by_outcome.insert(Outcome::Replaced, 2);
        by_outcome.insert(Outcome::Unhandled, 1);

        ConvertReport {
            root: PathBuf::from("/p"),
            dry_run: false,
            files,
            by_outcome,
            authors: vec!["Jane Doe <jane@x.org>".to_string()],
            authors_markdown: "# Authors\n\n- Jane Doe <jane@x.org>\n".to_string(),
            authors_file: PathBuf::from("/p/AUTHORS.md"),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_file() {
        console::set_colors_enabled(false);
        assert_eq!(
            format_file(&file("/p/a.php", Outcome::WouldReplace)),
            " ├─ ☑️  /p/a.php would replace"
        );
        assert_eq!(
            format_file(&file("/p/vendor/x.php", Outcome::Vendored)),
            " ├─ 🔶 /p/vendor/x.php skipped"
        );
        assert_eq!(format_file(&file("/p/a.php", Outcome::AlreadySpdx)), " ├─ ✅ /p/a.php SPDX");
        assert_eq!(format_file(&file("/p/x", Outcome::Unhandled)), " ├─ ❌ /p/x Not handled");
        assert_eq!(format_ignored_dir("3rdparty"), " ├─ ◽ 3rdparty skipped");
    }

    #[test]
    fn test_format_failure() {
        console::set_colors_enabled(false);
        let err = ConvertError::UnrecognizedCopyrightLine {
            line: " * (C) Someone".to_string(),
        }
        .in_file("/p/a.php");

        assert_eq!(
            format_failure(&err),
            " ├─ ❌ /p/a.php Unrecognized copyright:\n    └─  * (C) Someone"
        );
    }

    #[test]
    fn test_format_terminal() {
        let output = format_terminal(&create_test_report());
        assert!(output.contains("Summary (converted) for /p"));
        assert!(output.contains("replaced"));
        assert!(output.contains("not handled"));
        assert!(output.contains("unique authors"));
    }

    #[test]
    fn test_format_json() {
        let output = format_json(&create_test_report()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["by_outcome"]["replaced"], 2);
        assert_eq!(parsed["files"][2]["outcome"], "unhandled");
        assert_eq!(parsed["authors"][0], "Jane Doe <jane@x.org>");
    }
}
