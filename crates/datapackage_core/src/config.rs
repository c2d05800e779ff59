//! Project layout configuration.
//!
//! Every operation reads its inputs from, and writes its outputs to, paths
//! resolved against a project root. The configuration is built once per
//! invocation and handed to each operation.

use std::path::{Path, PathBuf};

/// Paths of a data package project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project root; every other path is relative to it
    pub root: PathBuf,

    /// Package metadata document
    pub metadata: PathBuf,

    /// Additional check declarations
    pub checks: PathBuf,

    /// Directory of CSV data files
    pub data_dir: PathBuf,

    /// Directory of templates
    pub templates_dir: PathBuf,

    /// Output directory
    pub build_dir: PathBuf,
}

impl ProjectConfig {
    /// Default metadata file name.
    pub const METADATA_FILE: &'static str = "datapackage.yaml";
    /// Default checks file name.
    pub const CHECKS_FILE: &'static str = "checks.yaml";
    /// Default data directory.
    pub const DATA_DIR: &'static str = "data";
    /// Default templates directory.
    pub const TEMPLATES_DIR: &'static str = "templates";
    /// Default output directory.
    pub const BUILD_DIR: &'static str = "build";

    /// Header comment template file name.
    pub const HEADER_COMMENT_TEMPLATE: &'static str = "header-comment.jinja";
    /// README template file name.
    pub const README_TEMPLATE: &'static str = "readme.html.jinja";
    /// README output file name.
    pub const README_OUTPUT: &'static str = "readme.html";
    /// Excel template output file name.
    pub const EXCEL_OUTPUT: &'static str = "template.xlsx";

    /// Creates a configuration with the default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata: PathBuf::from(Self::METADATA_FILE),
            checks: PathBuf::from(Self::CHECKS_FILE),
            data_dir: PathBuf::from(Self::DATA_DIR),
            templates_dir: PathBuf::from(Self::TEMPLATES_DIR),
            build_dir: PathBuf::from(Self::BUILD_DIR),
        }
    }

    /// Overrides the output directory.
    pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = build_dir.into();
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Path of the metadata document.
    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.metadata)
    }

    /// Path of the checks document.
    pub fn checks_path(&self) -> PathBuf {
        self.resolve(&self.checks)
    }

    /// Path of the data directory.
    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data_dir)
    }

    /// Path of the header comment template.
    pub fn header_comment_template(&self) -> PathBuf {
        self.resolve(&self.templates_dir)
            .join(Self::HEADER_COMMENT_TEMPLATE)
    }

    /// Path of the README template.
    pub fn readme_template(&self) -> PathBuf {
        self.resolve(&self.templates_dir).join(Self::README_TEMPLATE)
    }

    /// Path of the output directory.
    pub fn build_path(&self) -> PathBuf {
        self.resolve(&self.build_dir)
    }

    /// Path of the generated README.
    pub fn readme_output(&self) -> PathBuf {
        self.build_path().join(Self::README_OUTPUT)
    }

    /// Path of the generated Excel template.
    pub fn excel_output(&self) -> PathBuf {
        self.build_path().join(Self::EXCEL_OUTPUT)
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_layout() {
        let config = ProjectConfig::new("/project");

        assert_eq!(config.metadata_path(), Path::new("/project/datapackage.yaml"));
        assert_eq!(config.checks_path(), Path::new("/project/checks.yaml"));
        assert_eq!(config.data_path(), Path::new("/project/data"));
        assert_eq!(
            config.header_comment_template(),
            Path::new("/project/templates/header-comment.jinja")
        );
        assert_eq!(
            config.readme_template(),
            Path::new("/project/templates/readme.html.jinja")
        );
        assert_eq!(config.readme_output(), Path::new("/project/build/readme.html"));
        assert_eq!(config.excel_output(), Path::new("/project/build/template.xlsx"));
    }

    #[test]
    fn test_custom_build_dir() {
        let config = ProjectConfig::new("/project").with_build_dir("out");

        assert_eq!(config.excel_output(), Path::new("/project/out/template.xlsx"));
    }

    #[test]
    fn test_default_root_is_current_dir() {
        assert_eq!(ProjectConfig::default().root, PathBuf::from("."));
    }
}
