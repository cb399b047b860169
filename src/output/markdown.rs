//! Markdown report generation
//!
//! Renders a scan report as a human-readable markdown document: score,
//! checklist table, suggestions, and the page metadata behind them.

use crate::output::OutputResult;
use crate::score::Status;
use crate::ScanReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown report and writes it to disk
///
/// # Arguments
///
/// * `report` - The scan report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(report: &ScanReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a scan report as markdown
pub fn format_markdown_report(report: &ScanReport) -> String {
    let mut md = String::new();

    md.push_str("# AI Visibility Report\n\n");
    md.push_str(&format!("- **URL**: {}\n", report.requested_url));
    if report.final_url != report.requested_url {
        md.push_str(&format!("- **Final URL**: {}\n", report.final_url));
    }
    md.push_str(&format!("- **Score**: {}/100\n", report.score));
    md.push_str(&format!(
        "- **Scanned**: {}\n\n",
        report.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Checklist
    md.push_str("## Checklist\n\n");
    md.push_str("| Check | Status | Weight | Note |\n");
    md.push_str("|-------|--------|--------|------|\n");
    for item in &report.checklist {
        md.push_str(&format!(
            "| {} | {} {} | {} | {} |\n",
            item.key.label(),
            status_marker(item.status),
            item.status,
            item.weight,
            escape_cell(&item.note)
        ));
    }
    md.push('\n');

    // Suggestions
    md.push_str("## Suggestions\n\n");
    if report.suggestions.is_empty() {
        md.push_str("All checks passed. Nothing to fix.\n\n");
    } else {
        for suggestion in &report.suggestions {
            md.push_str(&format!("- {}\n", suggestion));
        }
        md.push('\n');
    }

    // Page metadata
    md.push_str("## Page\n\n");
    push_field(&mut md, "Title", &report.meta.title);
    push_field(&mut md, "Description", &report.meta.description);
    push_field(&mut md, "Canonical", &report.meta.canonical);
    push_field(&mut md, "Content-Type", &report.meta.content_type);
    push_field(&mut md, "Charset", &report.meta.charset);
    push_field(&mut md, "Content-Language", &report.meta.content_language);
    push_field(&mut md, "html lang", &report.meta.html_lang);
    push_field(&mut md, "meta language", &report.meta.meta_lang);
    md.push_str(&format!("- **Words**: {}\n", report.heur.word_count));
    md.push_str(&format!(
        "- **Internal links**: {}\n\n",
        report.heur.internal_links
    ));

    // Site
    md.push_str("## Site\n\n");
    md.push_str(&format!(
        "- **robots.txt**: {}\n",
        yes_no(report.heur.robots_txt_ok)
    ));
    md.push_str(&format!(
        "- **sitemap.xml**: {}\n",
        yes_no(report.heur.has_sitemap_file)
    ));
    if !report.heur.x_robots_header.is_empty() {
        md.push_str(&format!(
            "- **X-Robots-Tag**: {}\n",
            report.heur.x_robots_header
        ));
    }
    for sitemap in &report.heur.sitemap_urls {
        md.push_str(&format!("- **Sitemap**: {}\n", sitemap));
    }
    if !report.heur.ai_crawlers_blocked.is_empty() {
        md.push_str(&format!(
            "- **AI crawlers blocked by robots.txt**: {}\n",
            report.heur.ai_crawlers_blocked.join(", ")
        ));
    }

    md
}

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Good => "✅",
        Status::Warn => "⚠️",
        Status::Bad => "❌",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "reachable"
    } else {
        "not reachable"
    }
}

fn push_field(md: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        md.push_str(&format!("- **{}**: {}\n", label, escape_cell(value)));
    }
}

/// Keeps table rows intact
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
