//! Parsing pipeline for Gradle's free-text dependency reports.
//!
//! [`parse_dependency_report`] runs the full chain: section extraction
//! ([`section`]), tree-decoration stripping, coordinate parsing
//! ([`grammar`]), and deduplication. The separate `gradle projects` report
//! is handled by [`projects`].

use std::collections::HashSet;

use crate::models::DependencyRecord;

pub mod grammar;
pub mod projects;
pub mod section;

/// Parse a raw dependency report into the deduplicated dependency set of
/// the given configuration. Order of the returned Vec is incidental;
/// identity is `(groupId:artifactId, resolvedVersion)` with first-seen wins.
pub fn parse_dependency_report(report: &str, configuration: &str) -> Vec<DependencyRecord> {
    let lines = section::extract_section(report, configuration);

    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for expr in normalize_lines(&lines) {
        if let Some(record) = grammar::parse_dependency(expr) {
            if seen.insert(record.dedup_key()) {
                records.push(record);
            }
        }
    }

    records
}

/// Strip tree decoration from section lines, leaving bare dependency
/// expressions.
///
/// Keeps only lines opening with `+` or `|` (the two glyphs that begin a
/// dependency entry), drops references to sibling modules of the same build
/// (`+--- project :`), then removes the leading run of tree-drawing
/// characters. Lines emptied by stripping are dropped rather than parsed.
fn normalize_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .filter(|line| line.starts_with('+') || line.starts_with('|'))
        .filter(|line| !line.contains("+--- project :"))
        .map(|line| {
            line.trim_start_matches(|c: char| {
                matches!(c, '+' | '-' | '\\' | '|') || c.is_whitespace()
            })
        })
        .filter(|line| !line.is_empty())
        .collect()
}
