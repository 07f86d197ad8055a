use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use pricegrid_model::{Cell, Grid};

use crate::encoder::FIRST_PLAN_COL;
use crate::error::CodecError;

/// One normalized data row recovered from an imported grid. Identifier-free:
/// codes are joined against canonical entities by the reconciliation engine,
/// never here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRow {
    pub item_code: String,
    pub item_name: String,
    pub category: String,
    /// Plan code (uppercase) → entered price. A blank or non-numeric cell is
    /// omitted, meaning "no change requested" downstream. Never coerced to 0.
    pub prices: BTreeMap<String, f64>,
}

/// Decoder output: recovered plan columns plus normalized rows.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSheet {
    /// Uppercased plan codes in header order.
    pub plan_codes: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

/// Category cursor threaded through row classification. Marker rows move it
/// forward; it never leaks outside the fold.
#[derive(Debug, Clone, PartialEq)]
enum CategoryCursor {
    NoCategory,
    InCategory(String),
}

impl CategoryCursor {
    fn current(&self) -> &str {
        match self {
            CategoryCursor::NoCategory => "",
            CategoryCursor::InCategory(name) => name,
        }
    }
}

/// Decode an arbitrary grid back into plan columns and normalized rows.
///
/// The grid may be the encoder's own output or an externally authored copy
/// that a human has edited, reordered, or partially filled in. Every step is
/// a non-throwing heuristic; the only failure is the structural minimum of a
/// header row plus one data row.
pub fn decode(grid: &Grid) -> Result<ImportSheet, CodecError> {
    if grid.row_count() < 2 {
        return Err(CodecError::MalformedDocument {
            rows: grid.row_count(),
        });
    }

    let plan_columns = recover_plan_columns(grid);
    let plan_codes = plan_columns.iter().map(|(code, _)| code.clone()).collect();

    let mut rows = Vec::new();
    let mut cursor = CategoryCursor::NoCategory;
    for r in 1..grid.row_count() {
        let (next, parsed) = classify_row(grid, r, &plan_columns, cursor);
        cursor = next;
        if let Some(row) = parsed {
            rows.push(row);
        }
    }

    Ok(ImportSheet { plan_codes, rows })
}

/// Scan header cells from the first plan column onward and extract plan
/// codes: a leading alphanumeric/underscore/hyphen run, optionally followed
/// by a parenthetical suffix such as "(1554 SF)". Header cells that match no
/// code pattern are skipped; they may be stray annotation columns, not an
/// error. A duplicate code keeps its first position but takes the later
/// column.
fn recover_plan_columns(grid: &Grid) -> Vec<(String, usize)> {
    let pattern = match Regex::new(r"^([A-Za-z0-9_-]+)\s*(?:\(.*\))?") {
        Ok(p) => p,
        Err(_) => return Vec::new(), // static pattern; unreachable
    };

    let width = grid.row(0).map(|r| r.len()).unwrap_or(0);
    let mut columns: Vec<(String, usize)> = Vec::new();

    for col in FIRST_PLAN_COL..width {
        let label = grid.cell(0, col).as_text();
        if label.is_empty() {
            continue;
        }
        let Some(caps) = pattern.captures(&label) else {
            continue;
        };
        let code = caps[1].to_uppercase();
        match columns.iter_mut().find(|(existing, _)| *existing == code) {
            Some(entry) => entry.1 = col,
            None => columns.push((code, col)),
        }
    }

    columns
}

/// Classify a single data row, returning the advanced cursor and the emitted
/// row, if any. Check order matters: marker detection runs before the
/// derived-row skip, so the encoder's own TOTAL row (all caps, empty second
/// cell) is consumed as a marker rather than emitted.
fn classify_row(
    grid: &Grid,
    r: usize,
    plan_columns: &[(String, usize)],
    cursor: CategoryCursor,
) -> (CategoryCursor, Option<ParsedRow>) {
    let first = grid.cell(r, 0).as_text();
    if first.is_empty() {
        return (cursor, None);
    }

    // All-caps marker with an empty neighbor introduces a category for the
    // rows below it. The length guard keeps short codes like "AC" out.
    if first == first.to_uppercase() && grid.cell(r, 1).is_empty() && first.len() > 2 {
        return (CategoryCursor::InCategory(first.to_lowercase()), None);
    }

    // Derived rows are never re-imported.
    let lowered = first.to_lowercase();
    if lowered == "total" || lowered == "$/sf" || lowered.contains("subtotal") {
        return (cursor, None);
    }

    let item_name = grid.cell(r, 1).as_text();
    let explicit_category = grid.cell(r, 2).as_text();
    let category = if explicit_category.is_empty() {
        cursor.current().to_string()
    } else {
        explicit_category.to_lowercase()
    };

    let mut prices = BTreeMap::new();
    for (code, col) in plan_columns {
        if let Some(value) = grid.cell(r, *col).as_number() {
            prices.insert(code.clone(), value);
        }
    }

    let row = ParsedRow {
        item_code: first,
        item_name,
        category,
        prices,
    };
    (cursor, Some(row))
}
