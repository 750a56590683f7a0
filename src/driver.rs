//! Aggregation and submission driver.
//!
//! Processes the root project and every discovered sub-module strictly in
//! sequence, one Gradle invocation and one submission at a time. Each
//! target's failure is recorded in its [`SubmissionOutcome`] and the run
//! moves on; only every target failing makes the run itself an error.

use anyhow::{bail, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::SubmissionApi;
use crate::gradle::BuildTool;
use crate::models::{PackageDescriptor, RunReport, SubmissionOutcome, Target};
use crate::parser;

/// Ecosystem identifier for every submission from this tool.
const ECOSYSTEM: &str = "maven";

pub struct RunOptions {
    /// Root project name on the analysis service.
    pub project: String,
    /// Optional group for creation and submission.
    pub group: Option<String>,
    /// Gradle configuration whose report section is parsed.
    pub configuration: String,
    pub quiet: bool,
}

/// Process the root project and each discovered sub-module, in report order.
pub async fn run(
    build: &impl BuildTool,
    api: &impl SubmissionApi,
    opts: &RunOptions,
) -> Result<RunReport> {
    let modules = match build
        .project_report()
        .await
        .and_then(|report| parser::projects::discover_modules(&report))
    {
        Ok(modules) => modules,
        Err(err) => {
            if !opts.quiet {
                eprintln!("  {} sub-module discovery failed: {:#}", "⚠".yellow(), err);
            }
            Vec::new()
        }
    };

    if !opts.quiet {
        eprintln!("  {} {} sub-module(s) found", "→".cyan(), modules.len());
    }

    let mut targets = vec![Target::Root];
    targets.extend(modules.into_iter().map(Target::Module));

    let pb = if !opts.quiet {
        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut outcomes = Vec::new();
    for target in &targets {
        if let Some(pb) = &pb {
            pb.set_message(target.to_string());
        }
        outcomes.push(process_target(build, api, opts, target).await);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    let report = RunReport { outcomes };
    if report.succeeded() == 0 {
        bail!(
            "all {} target(s) failed; nothing was submitted",
            report.outcomes.len()
        );
    }

    Ok(report)
}

/// One full cycle for a single target: report, parse, create, submit.
///
/// An empty dependency set is a success that submits nothing.
async fn process_target(
    build: &impl BuildTool,
    api: &impl SubmissionApi,
    opts: &RunOptions,
    target: &Target,
) -> SubmissionOutcome {
    let project = target.project_name(&opts.project);
    let module = target.module_path().map(str::to_string);

    let report = match build.dependency_report(target.module_path()).await {
        Ok(report) => report,
        Err(err) => {
            return failure(
                project,
                module,
                format!("dependency report unavailable: {:#}", err),
            )
        }
    };

    let records = parser::parse_dependency_report(&report, &opts.configuration);
    if records.is_empty() {
        return SubmissionOutcome {
            project,
            module,
            success: true,
            packages: Vec::new(),
            detail: "no dependencies found; nothing submitted".to_string(),
        };
    }

    let packages: Vec<PackageDescriptor> = records.iter().map(PackageDescriptor::from).collect();

    if let Err(err) = api.create_project(&project, opts.group.as_deref()).await {
        return failure(
            project,
            module,
            format!("project creation failed: {:#}", err),
        );
    }

    match api
        .analyze(ECOSYSTEM, &packages, &project, opts.group.as_deref())
        .await
    {
        Ok(job_id) => SubmissionOutcome {
            detail: format!("submitted {} package(s) as job {}", packages.len(), job_id),
            project,
            module,
            success: true,
            packages,
        },
        Err(err) => failure(project, module, format!("submission failed: {:#}", err)),
    }
}

fn failure(project: String, module: Option<String>, detail: String) -> SubmissionOutcome {
    SubmissionOutcome {
        project,
        module,
        success: false,
        packages: Vec::new(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::api::{ProjectHandle, ProjectStatus};

    const PROJECTS_REPORT: &str = "\
Root project 'myapp'
+--- Project ':sub1'
\\--- Project ':sub2'
";

    fn dep_report(body: &str) -> String {
        format!("testRuntimeClasspath\n{}\n\n", body)
    }

    #[derive(Default)]
    struct FakeBuild {
        /// `projects` output; `None` simulates an unusable binary.
        projects: Option<String>,
        /// Dependency report per module path, keyed by `""` for the root.
        reports: HashMap<String, String>,
    }

    #[async_trait]
    impl BuildTool for FakeBuild {
        async fn project_report(&self) -> Result<String> {
            self.projects
                .clone()
                .ok_or_else(|| anyhow!("gradle unavailable"))
        }

        async fn dependency_report(&self, module: Option<&str>) -> Result<String> {
            let output = self
                .reports
                .get(module.unwrap_or(""))
                .cloned()
                .ok_or_else(|| anyhow!("gradle unavailable"))?;
            crate::gradle::ensure_build_succeeded(&output)?;
            Ok(output)
        }
    }

    #[derive(Default)]
    struct FakeApi {
        created: Mutex<Vec<String>>,
        analyzed: Mutex<Vec<(String, Vec<PackageDescriptor>)>>,
        existing: Vec<String>,
        fail_analyze_for: Option<String>,
    }

    #[async_trait]
    impl SubmissionApi for FakeApi {
        async fn create_project(&self, name: &str, _group: Option<&str>) -> Result<ProjectHandle> {
            self.created.lock().unwrap().push(name.to_string());
            let status = if self.existing.iter().any(|p| p == name) {
                ProjectStatus::Exists
            } else {
                ProjectStatus::Created
            };
            Ok(ProjectHandle {
                id: format!("id-{name}"),
                status,
            })
        }

        async fn analyze(
            &self,
            _ecosystem: &str,
            packages: &[PackageDescriptor],
            project: &str,
            _group: Option<&str>,
        ) -> Result<String> {
            if self.fail_analyze_for.as_deref() == Some(project) {
                bail!("service unavailable");
            }
            self.analyzed
                .lock()
                .unwrap()
                .push((project.to_string(), packages.to_vec()));
            Ok("job-1".to_string())
        }
    }

    fn opts() -> RunOptions {
        RunOptions {
            project: "myapp".to_string(),
            group: None,
            configuration: "testRuntimeClasspath".to_string(),
            quiet: true,
        }
    }

    #[tokio::test]
    async fn test_submits_root_then_modules_in_discovery_order() {
        let mut reports = HashMap::new();
        reports.insert("".to_string(), dep_report("+--- junit:junit:4.13.2"));
        reports.insert(":sub1".to_string(), dep_report("+--- a:b:1.0"));
        reports.insert(":sub2".to_string(), dep_report("+--- c:d:2.0"));
        let build = FakeBuild {
            projects: Some(PROJECTS_REPORT.to_string()),
            reports,
        };
        let api = FakeApi::default();

        let report = run(&build, &api, &opts()).await.unwrap();

        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.total_packages(), 3);

        let analyzed = api.analyzed.lock().unwrap();
        let order: Vec<&str> = analyzed.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(order, ["myapp", "myapp/sub1", "myapp/sub2"]);
    }

    #[tokio::test]
    async fn test_module_build_failure_does_not_abort_run() {
        let mut reports = HashMap::new();
        reports.insert("".to_string(), dep_report("+--- junit:junit:4.13.2"));
        reports.insert(
            ":sub1".to_string(),
            "> Task :sub1:dependencies\nBUILD FAILED in 3s\n".to_string(),
        );
        reports.insert(":sub2".to_string(), dep_report("+--- c:d:2.0"));
        let build = FakeBuild {
            projects: Some(PROJECTS_REPORT.to_string()),
            reports,
        };
        let api = FakeApi::default();

        let report = run(&build, &api, &opts()).await.unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert!(!report.outcomes[1].success);
        assert!(report.outcomes[2].success);

        let analyzed = api.analyzed.lock().unwrap();
        let order: Vec<&str> = analyzed.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(order, ["myapp", "myapp/sub2"]);
    }

    #[tokio::test]
    async fn test_empty_dependency_set_reported_but_not_submitted() {
        let mut reports = HashMap::new();
        reports.insert("".to_string(), "BUILD SUCCESSFUL in 1s\n".to_string());
        let build = FakeBuild {
            projects: Some("Root project 'myapp'\n".to_string()),
            reports,
        };
        let api = FakeApi::default();

        let report = run(&build, &api, &opts()).await.unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].success);
        assert!(report.outcomes[0].packages.is_empty());
        assert!(api.created.lock().unwrap().is_empty());
        assert!(api.analyzed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_targets_failing_is_a_run_error() {
        let build = FakeBuild {
            projects: None,
            reports: HashMap::new(),
        };
        let api = FakeApi::default();

        assert!(run(&build, &api, &opts()).await.is_err());
    }

    #[tokio::test]
    async fn test_submission_failure_is_isolated() {
        let mut reports = HashMap::new();
        reports.insert("".to_string(), dep_report("+--- junit:junit:4.13.2"));
        reports.insert(":sub1".to_string(), dep_report("+--- a:b:1.0"));
        let build = FakeBuild {
            projects: Some("+--- Project ':sub1'\n".to_string()),
            reports,
        };
        let api = FakeApi {
            fail_analyze_for: Some("myapp".to_string()),
            ..FakeApi::default()
        };

        let report = run(&build, &api, &opts()).await.unwrap();

        assert!(!report.outcomes[0].success);
        assert!(report.outcomes[1].success);
        // Creation was still attempted for both targets.
        assert_eq!(
            *api.created.lock().unwrap(),
            vec!["myapp".to_string(), "myapp/sub1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_existing_project_is_treated_as_created() {
        let mut reports = HashMap::new();
        reports.insert("".to_string(), dep_report("+--- junit:junit:4.13.2"));
        let build = FakeBuild {
            projects: Some(String::new()),
            reports,
        };
        let api = FakeApi {
            existing: vec!["myapp".to_string()],
            ..FakeApi::default()
        };

        let report = run(&build, &api, &opts()).await.unwrap();

        assert!(report.outcomes[0].success);
        assert_eq!(api.analyzed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_discovery_failure_still_processes_root() {
        let mut reports = HashMap::new();
        reports.insert("".to_string(), dep_report("+--- junit:junit:4.13.2"));
        let build = FakeBuild {
            projects: None,
            reports,
        };
        let api = FakeApi::default();

        let report = run(&build, &api, &opts()).await.unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].success);
    }
}
