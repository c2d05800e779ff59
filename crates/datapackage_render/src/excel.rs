//! Excel template writer.

use crate::template::ensure_parent;
use crate::{ColumnValidation, Result, SheetLayout, render_header_comments, template_layout};
use datapackage_core::{Package, ProjectConfig};
use rust_xlsxwriter::{
    DataValidation, DataValidationRule, DocProperties, ExcelDateTime, Format, Note, Workbook,
    Worksheet,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Last data row validated below the header (Excel's last row).
const LAST_ROW: u32 = 1_048_575;

/// Bounds used for unbounded decimal columns.
const DECIMAL_LIMIT: f64 = 1e307;

/// Creation date stamped into the workbook properties. Fixed so that the same
/// layout always produces the same bytes.
const CREATED: (u16, u8, u8) = (2000, 1, 1);

/// Renders the header comments, lays out the template and writes it to the
/// build directory. Returns the written path.
pub fn build_excel_template(package: &Package, config: &ProjectConfig) -> Result<PathBuf> {
    let comments = render_header_comments(package, &config.header_comment_template())?;
    let sheets = template_layout(package, &comments);

    let output = config.excel_output();
    ensure_parent(&output)?;
    write_excel_template(&sheets, &output)?;

    info!("Wrote {}", output.display());
    Ok(output)
}

/// Writes a workbook with one worksheet per sheet layout, replacing any
/// existing file.
pub fn write_excel_template(sheets: &[SheetLayout], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let (year, month, day) = CREATED;
    let created = ExcelDateTime::from_ymd(year, month, day)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let header = Format::new().set_bold();

    for sheet in sheets {
        debug!("Adding worksheet '{}' ({} columns)", sheet.name, sheet.columns.len());
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, &header)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetLayout, header: &Format) -> Result<()> {
    worksheet.set_name(&sheet.name)?;

    for (col, column) in (0u16..).zip(&sheet.columns) {
        worksheet.write_string_with_format(0, col, &column.name, header)?;
        worksheet.set_column_width(col, column.width as f64)?;

        if let Some(comment) = &column.comment {
            worksheet.insert_note(0, col, &Note::new(comment))?;
        }

        if let Some(validation) = &column.validation {
            worksheet.add_data_validation(1, col, LAST_ROW, col, &data_validation(validation)?)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn data_validation(validation: &ColumnValidation) -> Result<DataValidation> {
    let validation = match validation {
        ColumnValidation::List(values) => DataValidation::new().allow_list_strings(values.as_slice())?,
        ColumnValidation::Integer { min, max } => {
            let rule = match (min.map(clamp_i32), max.map(clamp_i32)) {
                (Some(min), Some(max)) => DataValidationRule::Between(min, max),
                (Some(min), None) => DataValidationRule::GreaterThanOrEqualTo(min),
                (None, Some(max)) => DataValidationRule::LessThanOrEqualTo(max),
                (None, None) => DataValidationRule::Between(i32::MIN, i32::MAX),
            };
            DataValidation::new().allow_whole_number(rule)
        }
        ColumnValidation::Decimal { min, max } => {
            let rule = match (*min, *max) {
                (Some(min), Some(max)) => DataValidationRule::Between(min, max),
                (Some(min), None) => DataValidationRule::GreaterThanOrEqualTo(min),
                (None, Some(max)) => DataValidationRule::LessThanOrEqualTo(max),
                (None, None) => DataValidationRule::Between(-DECIMAL_LIMIT, DECIMAL_LIMIT),
            };
            DataValidation::new().allow_decimal_number(rule)
        }
    };
    Ok(validation)
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnLayout, RenderError};
    use datapackage_core::{FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
    use std::fs;

    fn is_xlsx(path: &Path) -> bool {
        fs::read(path).map(|b| b.starts_with(b"PK")).unwrap_or(false)
    }

    fn sheet(name: &str) -> SheetLayout {
        SheetLayout {
            name: name.to_string(),
            columns: vec![
                ColumnLayout {
                    name: "id".into(),
                    comment: Some("Identifier".into()),
                    validation: Some(ColumnValidation::Integer { min: Some(1), max: None }),
                    width: 8,
                },
                ColumnLayout {
                    name: "method".into(),
                    comment: None,
                    validation: Some(ColumnValidation::List(vec!["core".into(), "auger".into()])),
                    width: 8,
                },
                ColumnLayout {
                    name: "depth".into(),
                    comment: None,
                    validation: Some(ColumnValidation::Decimal { min: None, max: None }),
                    width: 8,
                },
            ],
        }
    }

    #[test]
    fn test_write_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");

        write_excel_template(&[sheet("borehole"), sheet("measurement")], &path).unwrap();

        assert!(is_xlsx(&path));
    }

    #[test]
    fn test_write_template_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.xlsx");
        let second = dir.path().join("second.xlsx");

        write_excel_template(&[sheet("borehole")], &first).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        write_excel_template(&[sheet("borehole")], &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_invalid_sheet_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");

        let result = write_excel_template(&[sheet("bad/name")], &path);

        assert!(matches!(result, Err(RenderError::Excel(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_clamp_i32() {
        assert_eq!(clamp_i32(5), 5);
        assert_eq!(clamp_i32(i64::MAX), i32::MAX);
        assert_eq!(clamp_i32(i64::MIN), i32::MIN);
    }

    #[test]
    fn test_build_excel_template_creates_build_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::new(dir.path());
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(config.header_comment_template(), "{{ description }}").unwrap();

        let package = PackageBuilder::new()
            .resource(
                ResourceBuilder::new("borehole")
                    .field(
                        FieldBuilder::new("id", FieldType::Integer)
                            .description("Borehole identifier")
                            .build(),
                    )
                    .field(FieldBuilder::new("valid", FieldType::Boolean).build())
                    .build(),
            )
            .build();

        let output = build_excel_template(&package, &config).unwrap();
        assert_eq!(output, dir.path().join("build").join("template.xlsx"));
        assert!(is_xlsx(&output));

        // Overwrites the previous output with identical bytes
        let first = fs::read(&output).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        build_excel_template(&package, &config).unwrap();
        assert_eq!(fs::read(&output).unwrap(), first);
    }
}
