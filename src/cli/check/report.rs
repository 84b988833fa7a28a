//! Check report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural::plural_s;

/// A single finding.
#[derive(Debug, Clone)]
pub struct CheckError {
    /// What was checked (field path, selector, link).
    pub target: String,
    /// Why it failed.
    pub reason: String,
}

/// Findings for the whole site, grouped by source file.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Content document findings.
    pub content: BTreeMap<String, Vec<CheckError>>,
    /// Template findings.
    pub template: BTreeMap<String, Vec<CheckError>>,
}

impl CheckReport {
    pub fn add_content(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.content.entry(source.into()).or_default().push(CheckError {
            target: target.into(),
            reason: reason.into(),
        });
    }

    pub fn add_template(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.template.entry(source.into()).or_default().push(CheckError {
            target: target.into(),
            reason: reason.into(),
        });
    }

    /// Total finding count across both groups.
    pub fn error_count(&self) -> usize {
        self.content.values().map(Vec::len).sum::<usize>()
            + self.template.values().map(Vec::len).sum::<usize>()
    }

    /// Print the full report to stderr (content -> template).
    pub fn print(&self) {
        Self::print_section("content", &self.content);
        Self::print_section("template", &self.template);
    }

    fn print_section(name: &str, errors: &BTreeMap<String, Vec<CheckError>>) {
        if errors.is_empty() {
            return;
        }
        eprintln!();

        let file_count = errors.len();
        let error_count: usize = errors.values().map(Vec::len).sum();
        eprintln!(
            "{} {}",
            name.red().bold(),
            format!(
                "({file_count} file{}, {error_count} error{})",
                plural_s(file_count),
                plural_s(error_count)
            )
            .dimmed()
        );

        for (path, errs) in errors {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                if e.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), e.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason.dimmed());
                }
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
