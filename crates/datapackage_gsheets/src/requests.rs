//! Sheets `batchUpdate` requests writing a template layout.

use datapackage_render::{ColumnLayout, ColumnValidation, SheetLayout};
use serde_json::{Value, json};

/// Approximate pixel width of one character.
const PIXELS_PER_CHAR: usize = 7;

/// Builds the requests that turn a fresh spreadsheet into the template.
///
/// One sheet is added per layout (header row frozen), header values, bold
/// formatting and notes are written, data validation and column widths are
/// set, and finally the spreadsheet's default sheet is deleted. Added sheets
/// get IDs after `default_sheet_id` so the requests can refer to them.
pub fn template_requests(sheets: &[SheetLayout], default_sheet_id: i64) -> Vec<Value> {
    let mut requests = Vec::new();

    for (sheet_id, (index, sheet)) in (default_sheet_id + 1..).zip(sheets.iter().enumerate()) {
        requests.push(json!({
            "addSheet": {
                "properties": {
                    "sheetId": sheet_id,
                    "title": sheet.name,
                    "index": index,
                    "gridProperties": {
                        "frozenRowCount": 1,
                        "columnCount": sheet.columns.len().max(1),
                    },
                },
            },
        }));

        requests.push(header_request(sheet_id, &sheet.columns));

        for (column_index, column) in sheet.columns.iter().enumerate() {
            if let Some(validation) = &column.validation {
                requests.push(validation_request(sheet_id, column_index, validation));
            }
            requests.push(json!({
                "updateDimensionProperties": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "COLUMNS",
                        "startIndex": column_index,
                        "endIndex": column_index + 1,
                    },
                    "properties": { "pixelSize": column.width * PIXELS_PER_CHAR },
                    "fields": "pixelSize",
                },
            }));
        }
    }

    // A spreadsheet must keep at least one sheet
    if !sheets.is_empty() {
        requests.push(json!({ "deleteSheet": { "sheetId": default_sheet_id } }));
    }

    requests
}

fn header_request(sheet_id: i64, columns: &[ColumnLayout]) -> Value {
    let cells: Vec<Value> = columns
        .iter()
        .map(|column| {
            let mut cell = json!({
                "userEnteredValue": { "stringValue": column.name },
                "userEnteredFormat": { "textFormat": { "bold": true } },
            });
            if let Some(comment) = &column.comment {
                cell["note"] = json!(comment);
            }
            cell
        })
        .collect();

    json!({
        "updateCells": {
            "start": { "sheetId": sheet_id, "rowIndex": 0, "columnIndex": 0 },
            "rows": [{ "values": cells }],
            "fields": "userEnteredValue,userEnteredFormat.textFormat.bold,note",
        },
    })
}

fn validation_request(sheet_id: i64, column_index: usize, validation: &ColumnValidation) -> Value {
    let condition = match validation {
        ColumnValidation::List(values) => json!({
            "type": "ONE_OF_LIST",
            "values": values
                .iter()
                .map(|v| json!({ "userEnteredValue": v }))
                .collect::<Vec<_>>(),
        }),
        ColumnValidation::Integer { min, max } => {
            let cell = format!("{}2", column_letter(column_index));
            let mut terms = vec![format!("ISNUMBER({})", cell), format!("{}=INT({})", cell, cell)];
            terms.extend(bounds(&cell, min.map(|v| v.to_string()), max.map(|v| v.to_string())));
            custom_formula(&terms)
        }
        ColumnValidation::Decimal { min, max } => {
            let cell = format!("{}2", column_letter(column_index));
            let mut terms = vec![format!("ISNUMBER({})", cell)];
            terms.extend(bounds(&cell, min.map(|v| v.to_string()), max.map(|v| v.to_string())));
            custom_formula(&terms)
        }
    };

    json!({
        "setDataValidation": {
            "range": {
                "sheetId": sheet_id,
                "startRowIndex": 1,
                "startColumnIndex": column_index,
                "endColumnIndex": column_index + 1,
            },
            "rule": {
                "condition": condition,
                "strict": true,
                "showCustomUi": true,
            },
        },
    })
}

fn bounds(cell: &str, min: Option<String>, max: Option<String>) -> Vec<String> {
    let mut terms = Vec::new();
    if let Some(min) = min {
        terms.push(format!("{}>={}", cell, min));
    }
    if let Some(max) = max {
        terms.push(format!("{}<={}", cell, max));
    }
    terms
}

fn custom_formula(terms: &[String]) -> Value {
    json!({
        "type": "CUSTOM_FORMULA",
        "values": [{ "userEnteredValue": format!("=AND({})", terms.join(",")) }],
    })
}

/// Spreadsheet column letters: 0 → `A`, 25 → `Z`, 26 → `AA`.
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
