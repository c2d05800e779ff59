//! Custom checks for borehole data.
//!
//! This module handles:
//! - `is_monotonic_increasing`: a column never decreases
//! - `is_on_or_after_borehole_date`: measurements are not dated before their borehole

use crate::{CheckContext, CheckOutput, CheckRegistry, RegisteredCheck, Result, TypedValue};
use std::collections::HashMap;

/// Registers the custom checks.
pub fn register(registry: &mut CheckRegistry) {
    registry.register(RegisteredCheck::column(
        "is_monotonic_increasing",
        "Not monotonic increasing",
        is_monotonic_increasing,
    ));
    registry.register(RegisteredCheck::column(
        "is_on_or_after_borehole_date",
        "Not on or after borehole date",
        is_on_or_after_borehole_date,
    ));
}

/// Returns true if every value is greater than or equal to the one before it.
///
/// Equal neighbours pass; an empty or single-value sequence passes.
pub fn monotonic_increasing<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[1] >= pair[0])
}

/// For each row, returns whether `dates[i]` is on or after the reference date
/// of `keys[i]`.
///
/// Rows with a missing date, a missing key, or a key without a reference date
/// are not applicable (`None`).
pub fn on_or_after(
    dates: &[Option<TypedValue>],
    keys: &[Option<String>],
    reference: &HashMap<String, TypedValue>,
) -> Vec<Option<bool>> {
    dates
        .iter()
        .zip(keys)
        .map(|(date, key)| {
            let date = date.as_ref()?;
            let reference_date = reference.get(key.as_ref()?)?;
            Some(date >= reference_date)
        })
        .collect()
}

/// Column check: the non-null values of the column never decrease.
fn is_monotonic_increasing(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let column = context.column()?;
    let field_type = context.field_type();
    let format = context.field().and_then(|f| f.format.as_deref());

    let values: Vec<TypedValue> = column
        .values
        .iter()
        .filter(|raw| !context.is_null(raw))
        .map(|raw| {
            TypedValue::parse(raw, &field_type, format)
                .unwrap_or_else(|_| TypedValue::Text(raw.trim().to_string()))
        })
        .collect();

    Ok(CheckOutput::Scalar(monotonic_increasing(&values)))
}

/// Column check on a date column: each row's date is on or after the date of
/// the referenced borehole.
///
/// Parameters (defaults in brackets): `foreign_key` [`borehole_id`],
/// `reference` [`borehole`], `reference_key` [`id`], `reference_column` [`date`].
fn is_on_or_after_borehole_date(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let column = context.column()?;
    let foreign_key = context.param_str("foreign_key", "borehole_id");
    let reference_name = context.param_str("reference", "borehole");
    let reference_key = context.param_str("reference_key", "id");
    let reference_column = context.param_str("reference_column", "date");

    let keys_column = context.table.require_column(foreign_key)?;
    let reference = context.tables.require(reference_name)?;
    let reference_keys = reference.require_column(reference_key)?;
    let reference_dates = reference.require_column(reference_column)?;

    // First occurrence wins for duplicate reference keys
    let mut lookup = HashMap::new();
    for (key, date) in reference_keys
        .values
        .iter()
        .zip(context.typed_values(reference, &reference_dates))
    {
        if let (Some(key), Some(date)) = (context.key_text(reference, reference_key, key), date) {
            lookup.entry(key).or_insert(date);
        }
    }

    let dates = context.typed_values(context.table, &column);
    let keys: Vec<Option<String>> = keys_column
        .values
        .iter()
        .map(|raw| context.key_text(context.table, foreign_key, raw))
        .collect();

    Ok(CheckOutput::Rows(on_or_after(&dates, &keys, &lookup)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Table, Tables};
    use chrono::NaiveDate;
    use datapackage_core::{CheckDeclaration, FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> TypedValue {
        TypedValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn test_monotonic_allows_equal_neighbours() {
        assert!(monotonic_increasing(&[1, 2, 2, 5]));
    }

    #[test]
    fn test_monotonic_detects_decrease() {
        assert!(!monotonic_increasing(&[3, 2]));
        assert!(!monotonic_increasing(&[1, 5, 4, 6]));
    }

    #[test]
    fn test_monotonic_empty_and_single() {
        assert!(monotonic_increasing::<i64>(&[]));
        assert!(monotonic_increasing(&[42]));
    }

    #[test]
    fn test_on_or_after_borehole_example() {
        let mut reference = HashMap::new();
        reference.insert("1".to_string(), date("2020-01-01"));

        let dates = vec![Some(date("2020-06-01")), Some(date("2019-12-31"))];
        let keys = vec![Some("1".to_string()), Some("1".to_string())];

        assert_eq!(on_or_after(&dates, &keys, &reference), vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_on_or_after_same_day_passes() {
        let mut reference = HashMap::new();
        reference.insert("1".to_string(), date("2020-01-01"));

        let result = on_or_after(&[Some(date("2020-01-01"))], &[Some("1".to_string())], &reference);
        assert_eq!(result, vec![Some(true)]);
    }

    #[test]
    fn test_on_or_after_not_applicable() {
        let mut reference = HashMap::new();
        reference.insert("1".to_string(), date("2020-01-01"));

        let dates = vec![None, Some(date("2020-06-01")), Some(date("2020-06-01"))];
        let keys = vec![Some("1".to_string()), None, Some("9".to_string())];

        assert_eq!(on_or_after(&dates, &keys, &reference), vec![None, None, None]);
    }

    fn borehole_fixture() -> (datapackage_core::Package, Tables) {
        let package = PackageBuilder::new()
            .resource(
                ResourceBuilder::new("borehole")
                    .field(FieldBuilder::new("id", FieldType::Integer).build())
                    .field(FieldBuilder::new("date", FieldType::Date).build())
                    .build(),
            )
            .resource(
                ResourceBuilder::new("measurement")
                    .field(FieldBuilder::new("borehole_id", FieldType::Integer).build())
                    .field(FieldBuilder::new("date", FieldType::Date).build())
                    .build(),
            )
            .build();
        let tables = [
            Table::from_columns(
                "borehole",
                vec![("id", vec!["1", "2", "1"]), ("date", vec!["2020-01-01", "2021-01-01", "2030-01-01"])],
            ),
            Table::from_columns(
                "measurement",
                vec![
                    ("borehole_id", vec!["1", "1", "2", "7", ""]),
                    ("date", vec!["2020-06-01", "2019-12-31", "2020-12-31", "2000-01-01", "2000-01-01"]),
                ],
            ),
        ]
        .into_iter()
        .collect();
        (package, tables)
    }

    #[test]
    fn test_registered_date_check() {
        let (package, tables) = borehole_fixture();
        let declaration = CheckDeclaration::new("is_on_or_after_borehole_date");
        let table = tables.get("measurement").unwrap();
        let context = CheckContext {
            declaration: &declaration,
            package: &package,
            tables: &tables,
            table,
            column: table.column("date"),
        };

        let output = is_on_or_after_borehole_date(&context).unwrap();
        assert_eq!(
            output,
            CheckOutput::Rows(vec![Some(true), Some(false), Some(false), None, None])
        );
    }

    #[test]
    fn test_registered_date_check_missing_reference() {
        let (package, tables) = borehole_fixture();
        let declaration =
            CheckDeclaration::new("is_on_or_after_borehole_date").with_param("reference", "site");
        let table = tables.get("measurement").unwrap();
        let context = CheckContext {
            declaration: &declaration,
            package: &package,
            tables: &tables,
            table,
            column: table.column("date"),
        };

        assert!(is_on_or_after_borehole_date(&context).is_err());
    }

    #[test]
    fn test_registered_monotonic_check_is_typed() {
        let (package, tables) = borehole_fixture();
        let declaration = CheckDeclaration::new("is_monotonic_increasing");
        let table = tables.get("borehole").unwrap();
        let context = CheckContext {
            declaration: &declaration,
            package: &package,
            tables: &tables,
            table,
            column: table.column("id"),
        };

        assert_eq!(is_monotonic_increasing(&context).unwrap(), CheckOutput::Scalar(false));

        let numbers = Table::from_columns("borehole", vec![("id", vec!["2", "10", "10", ""])]);
        let context = CheckContext {
            table: &numbers,
            column: numbers.column("id"),
            ..context
        };
        assert_eq!(is_monotonic_increasing(&context).unwrap(), CheckOutput::Scalar(true));
    }
}
