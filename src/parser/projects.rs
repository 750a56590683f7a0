use anyhow::Result;
use regex::Regex;

use crate::models::ModuleRef;

/// Extract sub-module identifiers from the build tool's project listing.
///
/// Matching lines look like `+--- Project ':sub1'`, with two or more
/// tree-drawing characters before `Project`. Non-matching lines are ignored,
/// and empty output means a single-module build — neither is an error.
/// Order follows the report.
pub fn discover_modules(report: &str) -> Result<Vec<ModuleRef>> {
    // [^']* keeps a trailing project description out of the capture.
    let re = Regex::new(r"^[+\\-]{2,}\sProject\s'(:[^']*)'")?;

    let modules = report
        .lines()
        .filter_map(|line| re.captures(line))
        .map(|caps| ModuleRef::new(&caps[1]))
        .collect();

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovers_modules_in_report_order() {
        let report = "+--- Project ':sub1'\n\\--- Project ':sub2'\n";
        let modules = discover_modules(report).unwrap();
        assert_eq!(
            modules,
            vec![ModuleRef::new(":sub1"), ModuleRef::new(":sub2")]
        );
    }

    #[test]
    fn test_ignores_surrounding_report_noise() {
        let report = "\
> Task :projects

Root project 'myapp'
+--- Project ':api' - The REST layer
\\--- Project ':core'

To see a list of the tasks of a project, run gradle <project-path>:tasks
";
        let modules = discover_modules(report).unwrap();
        assert_eq!(
            modules,
            vec![ModuleRef::new(":api"), ModuleRef::new(":core")]
        );
    }

    #[test]
    fn test_nested_module_paths() {
        let report = "+--- Project ':services:auth'\n";
        let modules = discover_modules(report).unwrap();
        assert_eq!(modules, vec![ModuleRef::new(":services:auth")]);
    }

    #[test]
    fn test_single_module_build_yields_nothing() {
        assert!(discover_modules("Root project 'solo'\n").unwrap().is_empty());
        assert!(discover_modules("").unwrap().is_empty());
    }
}
