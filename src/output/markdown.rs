use std::fmt::Write;

use crate::annotate::position_label;
use crate::error::{CompatViewError, Result};
use crate::model::CompatReport;

/// Generate a markdown summary of the issues for one browser version.
/// Returns an error when there is nothing to export.
pub fn generate_export_content(
    report: &CompatReport,
    browser: &str,
    version: &str,
) -> Result<String> {
    if report.issue_count(browser, version) == 0 {
        return Err(CompatViewError::NoIssues);
    }
    Ok(generate_markdown(report, browser, version))
}

fn generate_markdown(report: &CompatReport, browser: &str, version: &str) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Compatibility issues: {browser} {version}");
    if let Some(generated_at) = &report.generated_at {
        let _ = writeln!(md, "\nReport generated: {}", generated_at.to_rfc3339());
    }

    let Some(issues) = report.issues_for(browser, version) else {
        return md;
    };

    for (issue_key, occurrences) in issues {
        if occurrences.is_empty() {
            continue;
        }
        let count = occurrences.len();
        let plural = if count == 1 { "occurrence" } else { "occurrences" };
        let _ = writeln!(md, "\n## {issue_key} ({count} {plural})");

        let mdn_url = occurrences
            .iter()
            .find_map(|occurrence| occurrence.compat.mdn_url.as_deref());
        if let Some(url) = mdn_url {
            let _ = writeln!(md, "\n[MDN documentation]({url})");
        }
        let _ = writeln!(md);

        for occurrence in occurrences {
            let position = position_label(&occurrence.span);
            let _ = write!(md, "- `{}`: {position}", occurrence.source);
            if !occurrence.missing_prefixes.is_empty() {
                let prefixes = occurrence
                    .missing_prefixes
                    .iter()
                    .map(|prefix| format!("`{prefix}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = write!(md, " (missing prefixes: {prefixes})");
            }
            let _ = writeln!(md);
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompatInfo, IssueOccurrence, TextSpan, VersionIssues};
    use std::collections::BTreeMap;

    fn report_with_issues() -> CompatReport {
        let mut issues = VersionIssues::new();
        issues.insert(
            "css-appearance".to_string(),
            vec![IssueOccurrence {
                source: "a.css".to_string(),
                span: TextSpan::single_line(3, 5, 12),
                missing_prefixes: vec!["-webkit-".to_string(), "-moz-".to_string()],
                compat: CompatInfo {
                    mdn_url: Some("https://developer.mozilla.org/docs/Web/CSS/appearance".into()),
                    ..CompatInfo::default()
                },
            }],
        );

        let mut versions = BTreeMap::new();
        versions.insert("66".to_string(), issues);
        versions.insert("99".to_string(), VersionIssues::new());
        let mut browsers = BTreeMap::new();
        browsers.insert("chrome".to_string(), versions);

        CompatReport {
            generated_at: None,
            browsers,
            stylesheets: BTreeMap::new(),
            stylesheet_files: BTreeMap::new(),
        }
    }

    #[test]
    fn should_render_heading_with_browser_and_version() {
        let content = generate_export_content(&report_with_issues(), "chrome", "66").unwrap();
        assert!(content.starts_with("# Compatibility issues: chrome 66"));
    }

    #[test]
    fn should_list_occurrences_with_position_and_prefixes() {
        let content = generate_export_content(&report_with_issues(), "chrome", "66").unwrap();
        assert!(content.contains("## css-appearance (1 occurrence)"));
        assert!(content.contains("- `a.css`: Line 3, columns 5-12"));
        assert!(content.contains("(missing prefixes: `-webkit-`, `-moz-`)"));
        assert!(
            content.contains("[MDN documentation](https://developer.mozilla.org/docs/Web/CSS/appearance)")
        );
    }

    #[test]
    fn should_error_when_version_has_no_issues() {
        let result = generate_export_content(&report_with_issues(), "chrome", "99");
        assert!(matches!(result, Err(CompatViewError::NoIssues)));
    }

    #[test]
    fn should_error_for_unknown_browser() {
        let result = generate_export_content(&report_with_issues(), "netscape", "4");
        assert!(matches!(result, Err(CompatViewError::NoIssues)));
    }
}
