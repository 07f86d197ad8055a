// Workbook import and export at the grid boundary.
//
// Import: sheet 1 of any calamine-supported workbook becomes a raw Grid;
//         structure recovery happens in the codec, not here.
// Export: presentation snapshot of an encoded document. Currency formats,
//         frozen header, and column widths are applied here only; the
//         underlying cell values stay plain numbers.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};

use pricegrid_codec::{MatrixDocument, INSTRUCTIONS};
use pricegrid_model::{Cell, Grid};

/// Currency display for plan-price cells.
const CURRENCY_FORMAT: &str = "$#,##0.00";

const CODE_COL_WIDTH: f64 = 16.0;
const NAME_COL_WIDTH: f64 = 34.0;
const CATEGORY_COL_WIDTH: f64 = 14.0;
const PLAN_COL_WIDTH: f64 = 18.0;
const INSTRUCTIONS_COL_WIDTH: f64 = 90.0;

/// Read sheet 1 of a workbook as a raw grid. Leading empty rows/columns are
/// padded so grid positions match spreadsheet positions.
pub fn read_grid(path: &Path) -> Result<Grid, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open workbook: {}", e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| "Workbook contains no sheets".to_string())?;
    let range = workbook
        .worksheet_range(first)
        .map_err(|e| format!("Failed to read sheet '{}': {}", first, e))?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut grid = Grid::new();
    for _ in 0..start_row {
        grid.push_row(Vec::new());
    }
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(data_to_cell));
        grid.push_row(cells);
    }
    Ok(grid)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        // Date serials stay numeric; the codec has no date columns, so any
        // date a human typed into a price cell surfaces as a bogus number
        // for the validator to flag rather than silently vanishing.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Write the full pricing matrix workbook: "Pricing Matrix" plus a derived
/// "Summary" sheet.
pub fn write_matrix(doc: &MatrixDocument, summary: &Grid, path: &Path) -> Result<(), String> {
    let mut workbook = XlsxWorkbook::new();

    let sheet = workbook
        .add_worksheet()
        .set_name("Pricing Matrix")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;
    write_grid_sheet(sheet, &doc.grid, Some(doc.first_plan_col))?;
    apply_matrix_layout(sheet, doc)?;

    let sheet = workbook
        .add_worksheet()
        .set_name("Summary")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;
    // Currency on the derived Total Cost and $/SF columns
    write_grid_sheet(sheet, summary, Some(5))?;
    sheet
        .set_column_width(1, NAME_COL_WIDTH)
        .map_err(|e| format!("Failed to set column width: {}", e))?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save workbook: {}", e))?;
    Ok(())
}

/// Write the blank bid template workbook: "Pricing Matrix" structure plus a
/// static "Instructions" sheet.
pub fn write_template(doc: &MatrixDocument, path: &Path) -> Result<(), String> {
    let mut workbook = XlsxWorkbook::new();

    let sheet = workbook
        .add_worksheet()
        .set_name("Pricing Matrix")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;
    write_grid_sheet(sheet, &doc.grid, None)?;
    apply_matrix_layout(sheet, doc)?;

    let sheet = workbook
        .add_worksheet()
        .set_name("Instructions")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        sheet
            .write_string(i as u32, 0, *line)
            .map_err(|e| format!("Failed to write instructions: {}", e))?;
    }
    sheet
        .set_column_width(0, INSTRUCTIONS_COL_WIDTH)
        .map_err(|e| format!("Failed to set column width: {}", e))?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save workbook: {}", e))?;
    Ok(())
}

/// Write a grid into a worksheet. Row 0 renders bold; numeric cells in
/// columns at or past `currency_from` get the currency number format.
fn write_grid_sheet(
    sheet: &mut Worksheet,
    grid: &Grid,
    currency_from: Option<usize>,
) -> Result<(), String> {
    let header_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format(CURRENCY_FORMAT);

    for (r, row) in grid.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let row32 = r as u32;
            let col16 = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    if r == 0 {
                        sheet.write_string_with_format(row32, col16, s, &header_format)
                    } else {
                        sheet.write_string(row32, col16, s)
                    }
                    .map_err(|e| format!("Failed to write cell ({}, {}): {}", r, c, e))?;
                }
                Cell::Number(n) => {
                    let currency = r > 0 && currency_from.is_some_and(|from| c >= from);
                    if currency {
                        sheet.write_number_with_format(row32, col16, *n, &currency_format)
                    } else {
                        sheet.write_number(row32, col16, *n)
                    }
                    .map_err(|e| format!("Failed to write cell ({}, {}): {}", r, c, e))?;
                }
            }
        }
    }
    Ok(())
}

fn apply_matrix_layout(sheet: &mut Worksheet, doc: &MatrixDocument) -> Result<(), String> {
    let widths = [
        (0u16, CODE_COL_WIDTH),
        (1, NAME_COL_WIDTH),
        (2, CATEGORY_COL_WIDTH),
    ];
    for (col, width) in widths {
        sheet
            .set_column_width(col, width)
            .map_err(|e| format!("Failed to set column width: {}", e))?;
    }
    for i in 0..doc.plan_count {
        sheet
            .set_column_width((doc.first_plan_col + i) as u16, PLAN_COL_WIDTH)
            .map_err(|e| format!("Failed to set column width: {}", e))?;
    }
    sheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("Failed to freeze header row: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pricegrid_codec::{decode, encode, summary_grid, template};
    use pricegrid_model::{FloorPlan, LineItem, PricingMap};

    use super::*;

    fn fixtures() -> (Vec<FloorPlan>, Vec<LineItem>, PricingMap) {
        let plans = vec![
            FloorPlan {
                id: 1,
                plan_code: "ATLAS".into(),
                name: "The Atlas".into(),
                floor_area_sqft: 1554.0,
                bedrooms: 3,
                bathrooms: 2.0,
            },
            FloorPlan {
                id: 2,
                plan_code: "ZION".into(),
                name: "The Zion".into(),
                floor_area_sqft: 2100.0,
                bedrooms: 4,
                bathrooms: 2.5,
            },
        ];
        let items = vec![
            LineItem {
                id: 10,
                item_code: "LBR_FRAME".into(),
                name: "Framing lumber".into(),
                category: "framing".into(),
            },
            LineItem {
                id: 11,
                item_code: "PAINT_INT".into(),
                name: "Interior paint".into(),
                category: "finishes".into(),
            },
        ];
        let mut pricing = PricingMap::new();
        pricing.set(1, 10, 6740.29);
        pricing.set(2, 10, 8100.0);
        pricing.set(1, 11, 2250.75);
        (plans, items, pricing)
    }

    #[test]
    fn matrix_survives_disk_round_trip() {
        let (plans, items, pricing) = fixtures();
        let doc = encode(&plans, &items, &pricing);
        let summary = summary_grid(&plans, &items, &pricing);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.xlsx");
        write_matrix(&doc, &summary, &path).unwrap();

        let grid = read_grid(&path).unwrap();
        let sheet = decode(&grid).unwrap();
        assert_eq!(sheet.plan_codes, vec!["ATLAS", "ZION"]);
        let framing = sheet
            .rows
            .iter()
            .find(|r| r.item_code == "LBR_FRAME")
            .unwrap();
        assert_eq!(framing.prices.get("ATLAS"), Some(&6740.29));
        assert_eq!(framing.prices.get("ZION"), Some(&8100.0));
    }

    #[test]
    fn template_survives_disk_round_trip() {
        let (plans, items, _) = fixtures();
        let doc = template(&plans, &items);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        write_template(&doc, &path).unwrap();

        let grid = read_grid(&path).unwrap();
        let sheet = decode(&grid).unwrap();
        assert_eq!(sheet.plan_codes, vec!["ATLAS", "ZION"]);
        assert_eq!(sheet.rows.len(), 2);
        assert!(sheet.rows.iter().all(|r| r.prices.is_empty()));
    }

    #[test]
    fn missing_file_is_a_structural_failure() {
        let err = read_grid(Path::new("/nonexistent/matrix.xlsx")).unwrap_err();
        assert!(err.contains("Failed to open workbook"));
    }
}
