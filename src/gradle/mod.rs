//! Invocation of the external Gradle binary.
//!
//! Gradle is reached through an ordered list of candidate commands — the
//! project-local wrapper, the parent-directory wrapper, then a `gradle` on
//! the search path — and the first one that spawns wins. Output is consumed
//! as text; a dependency report containing the `BUILD FAILED` sentinel is
//! rejected regardless of exit status, which wrapper scripts do not reliably
//! propagate.

use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Candidate commands, tried in order.
const CANDIDATES: [&str; 3] = ["./gradlew", "../gradlew", "gradle"];

/// Source of the two free-text reports this tool consumes.
#[async_trait]
pub trait BuildTool {
    /// Output of the project listing used for sub-module discovery.
    async fn project_report(&self) -> Result<String>;

    /// Output of the dependency report for the root (`None`) or the given
    /// sub-module path.
    async fn dependency_report(&self, module: Option<&str>) -> Result<String>;
}

/// [`BuildTool`] backed by a real Gradle installation or wrapper.
pub struct GradleTool {
    workdir: PathBuf,
}

impl GradleTool {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Run Gradle with `args`, trying each candidate command in order.
    async fn invoke(&self, args: &[&str]) -> Result<String> {
        for candidate in CANDIDATES {
            let output = Command::new(candidate)
                .args(args)
                .current_dir(&self.workdir)
                .output()
                .await;

            match output {
                Ok(output) => return Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
                // Not spawnable under this name; try the next candidate.
                Err(_) => continue,
            }
        }

        bail!(
            "no usable Gradle found: tried {} in {}",
            CANDIDATES.join(", "),
            self.workdir.display()
        );
    }
}

#[async_trait]
impl BuildTool for GradleTool {
    async fn project_report(&self) -> Result<String> {
        self.invoke(&["projects"]).await
    }

    async fn dependency_report(&self, module: Option<&str>) -> Result<String> {
        let task = match module {
            Some(path) => format!("{}:dependencies", path),
            None => "dependencies".to_string(),
        };
        let output = self.invoke(&["-q", &task]).await?;
        ensure_build_succeeded(&output)?;
        Ok(output)
    }
}

/// Reject output carrying the failure sentinel, wherever it appears.
pub(crate) fn ensure_build_succeeded(output: &str) -> Result<()> {
    if output.contains("BUILD FAILED") {
        bail!("Gradle reported BUILD FAILED");
    }
    Ok(())
}
