/// Extract one configuration section from a raw Gradle dependency report.
///
/// Returns the lines from the first line starting with `marker` up to and
/// including the next blank line, so callers see a closed interval. An
/// absent marker means Gradle reported no dependencies for this invocation;
/// a section that runs off the end of the report is treated the same way.
/// Both cases yield an empty Vec, never an error.
pub fn extract_section<'a>(report: &'a str, marker: &str) -> Vec<&'a str> {
    let lines: Vec<&str> = report.lines().collect();

    let start = match lines.iter().position(|line| line.starts_with(marker)) {
        Some(index) => index,
        None => return Vec::new(),
    };

    let section = &lines[start..];
    let end = match section.iter().position(|line| line.is_empty()) {
        Some(index) => index,
        None => return Vec::new(),
    };

    section[..=end].to_vec()
}
