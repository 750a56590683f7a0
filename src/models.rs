use serde::Serialize;

/// A single resolved dependency extracted from a Gradle dependency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub group_id: String,
    pub artifact_id: String,
    /// Version as declared in the build script.
    pub declared_version: String,
    /// Version Gradle settled on after conflict resolution; equals
    /// `declared_version` when the report line carried no replacement.
    pub resolved_version: String,
}

impl DependencyRecord {
    /// Maven-style coordinate name, `groupId:artifactId`.
    pub fn name(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Identity for deduplication. Two report lines differing only in tree
    /// decoration collapse onto the same key.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id, self.artifact_id, self.resolved_version
        )
    }
}

/// The wire shape submitted to the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
}

impl From<&DependencyRecord> for PackageDescriptor {
    fn from(record: &DependencyRecord) -> Self {
        Self {
            name: record.name(),
            version: record.resolved_version.clone(),
        }
    }
}

/// A sub-module identifier as printed by Gradle, e.g. `:sub1` or `:a:b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    pub path: String,
}

impl ModuleRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A submission target: the root project or one discovered sub-module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Root,
    Module(ModuleRef),
}

impl Target {
    /// Project identifier on the analysis service: the root name itself, or
    /// `<root>/<module path minus the leading colon>` for sub-modules.
    pub fn project_name(&self, root: &str) -> String {
        match self {
            Target::Root => root.to_string(),
            Target::Module(module) => format!(
                "{}/{}",
                root,
                module.path.strip_prefix(':').unwrap_or(&module.path)
            ),
        }
    }

    /// The module path handed to the build tool, `None` for the root.
    pub fn module_path(&self) -> Option<&str> {
        match self {
            Target::Root => None,
            Target::Module(module) => Some(&module.path),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Root => write!(f, "root project"),
            Target::Module(module) => write!(f, "{}", module.path),
        }
    }
}

/// Per-target result accumulated by the driver.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// Project name used on the analysis service.
    pub project: String,
    /// Module path, `None` for the root project.
    pub module: Option<String>,
    pub success: bool,
    /// The deduplicated packages this target submitted (empty when the
    /// target failed or reported no dependencies).
    pub packages: Vec<PackageDescriptor>,
    pub detail: String,
}

/// Everything a run produced, in processing order.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<SubmissionOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }

    pub fn total_packages(&self) -> usize {
        self.outcomes.iter().map(|o| o.packages.len()).sum()
    }
}
