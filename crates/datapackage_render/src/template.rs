//! Jinja templates: header comments and the README.
//!
//! Templates are read from disk on every call so edits are picked up without
//! restarting. Blocks are trimmed (`trim_blocks`, `lstrip_blocks`) so control
//! tags do not leave blank lines behind.

use crate::{RenderError, Result};
use datapackage_core::{Package, ProjectConfig};
use indexmap::IndexMap;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resource name → one rendered comment per field, in field order.
pub type HeaderComments = IndexMap<String, Vec<String>>;

/// Creates the template environment shared by every renderer.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
}

fn read_template(path: &Path) -> Result<String> {
    debug!("Reading template {}", path.display());
    fs::read_to_string(path).map_err(|e| RenderError::io(path, e))
}

/// Renders the template at `path` with the top-level keys of `context` as
/// template variables.
pub fn render_file<S: Serialize>(path: &Path, context: S) -> Result<String> {
    let source = read_template(path)?;
    environment()
        .render_str(&source, context)
        .map_err(|e| RenderError::template(path, e))
}

/// Renders one header comment per field of every resource.
///
/// Each field is rendered with its attributes (`name`, `type`,
/// `description`, `constraints`, ...) as template variables.
pub fn render_header_comments(package: &Package, template_path: &Path) -> Result<HeaderComments> {
    let source = read_template(template_path)?;
    let env = environment();
    let template = env
        .template_from_str(&source)
        .map_err(|e| RenderError::template(template_path, e))?;

    let mut comments = HeaderComments::new();
    for resource in &package.resources {
        let rendered = resource
            .schema
            .fields
            .iter()
            .map(|field| {
                template
                    .render(field)
                    .map_err(|e| RenderError::template(template_path, e))
            })
            .collect::<Result<Vec<_>>>()?;
        comments.insert(resource.name.clone(), rendered);
    }

    Ok(comments)
}

/// Creates the parent directory of `path`.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
    }
    Ok(())
}

/// Renders the README template with the whole package and writes it to the
/// build directory. Returns the written path.
pub fn build_readme(package: &Package, config: &ProjectConfig) -> Result<PathBuf> {
    let text = render_file(&config.readme_template(), package)?;

    let output = config.readme_output();
    ensure_parent(&output)?;
    fs::write(&output, text).map_err(|e| RenderError::io(&output, e))?;

    info!("Wrote {}", output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datapackage_core::{FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
    use pretty_assertions::assert_eq;

    fn package() -> Package {
        PackageBuilder::new()
            .name("boreholes")
            .title("Boreholes")
            .resource(
                ResourceBuilder::new("borehole")
                    .field(
                        FieldBuilder::new("id", FieldType::Integer)
                            .description("Borehole identifier")
                            .required()
                            .build(),
                    )
                    .field(FieldBuilder::new("date", FieldType::Date).build())
                    .build(),
            )
            .resource(
                ResourceBuilder::new("measurement")
                    .field(
                        FieldBuilder::new("depth", FieldType::Number)
                            .attribute("unit", "m")
                            .build(),
                    )
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_header_comments_follow_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header-comment.jinja");
        fs::write(&path, "{{ name }} ({{ type }})\n").unwrap();

        let comments = render_header_comments(&package(), &path).unwrap();

        assert_eq!(comments.keys().collect::<Vec<_>>(), vec!["borehole", "measurement"]);
        assert_eq!(comments["borehole"], vec!["id (integer)", "date (date)"]);
        assert_eq!(comments["measurement"], vec!["depth (number)"]);
    }

    #[test]
    fn test_header_comments_keep_declared_type_names() {
        let package = datapackage_parser::parse_yaml(
            r#"
resources:
  - name: site
    schema:
      fields:
        - name: location
          type: geopoint
        - name: period
          type: yearmonth
"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header-comment.jinja");
        fs::write(&path, "{{ name }}: {{ type }}").unwrap();

        let comments = render_header_comments(&package, &path).unwrap();

        assert_eq!(comments["site"], vec!["location: geopoint", "period: yearmonth"]);
    }

    #[test]
    fn test_header_comments_see_all_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header-comment.jinja");
        fs::write(
            &path,
            "{% if description %}\n{{ description }}\n{% endif %}\n{% if constraints and constraints.required %}\nRequired\n{% endif %}\n{{ unit }}",
        )
        .unwrap();

        let comments = render_header_comments(&package(), &path).unwrap();

        assert_eq!(comments["borehole"][0], "Borehole identifier\nRequired\n");
        assert_eq!(comments["borehole"][1], "");
        assert_eq!(comments["measurement"][0], "m");
    }

    #[test]
    fn test_header_comments_reread_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header-comment.jinja");

        fs::write(&path, "A {{ name }}").unwrap();
        let first = render_header_comments(&package(), &path).unwrap();
        fs::write(&path, "B {{ name }}").unwrap();
        let second = render_header_comments(&package(), &path).unwrap();

        assert_eq!(first["borehole"][0], "A id");
        assert_eq!(second["borehole"][0], "B id");
    }

    #[test]
    fn test_header_comments_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = render_header_comments(&package(), &dir.path().join("nope.jinja"));
        assert!(matches!(missing, Err(RenderError::Io { .. })));

        let path = dir.path().join("broken.jinja");
        fs::write(&path, "{% if name %}unclosed").unwrap();
        let broken = render_header_comments(&package(), &path);
        assert!(matches!(broken, Err(RenderError::Template { .. })));
    }

    #[test]
    fn test_build_readme_creates_build_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::new(dir.path());
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(
            config.readme_template(),
            "<h1>{{ title }}</h1>\n{% for resource in resources %}\n<h2>{{ resource.name }}</h2>\n{% endfor %}\n",
        )
        .unwrap();

        let output = build_readme(&package(), &config).unwrap();
        assert_eq!(output, dir.path().join("build").join("readme.html"));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<h1>Boreholes</h1>\n<h2>borehole</h2>\n<h2>measurement</h2>\n"
        );

        fs::write(config.readme_template(), "{{ name }}").unwrap();
        build_readme(&package(), &config).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "boreholes");
    }
}
