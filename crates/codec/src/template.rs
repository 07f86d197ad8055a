use pricegrid_model::{Cell, FloorPlan, Grid, LineItem};

use crate::encoder::{grouped_items, header_row, sorted_plans, MatrixDocument, FIRST_PLAN_COL};

/// Static rules rendered by the IO layer as the template's second sheet.
/// Not part of the grid contract.
pub const INSTRUCTIONS: [&str; 8] = [
    "How to fill in this pricing template",
    "",
    "1. Enter prices as plain numbers only (no $ signs, no commas, no formulas).",
    "2. Each plan column is keyed by the code before the parenthesis in its header.",
    "3. Plan and item codes match case-insensitively but must otherwise be exact.",
    "4. Leave a cell blank to request no change for that plan and item.",
    "5. Do not add TOTAL or subtotal rows; derived rows are ignored on import.",
    "6. Save the file in .xlsx (Excel workbook) format before sending it back.",
];

/// Blank bid template: the encoder's structure with every plan cell left
/// empty and no derived rows.
pub fn template(plans: &[FloorPlan], line_items: &[LineItem]) -> MatrixDocument {
    let plans = sorted_plans(plans);

    let mut grid = Grid::new();
    grid.push_row(header_row(&plans));

    for (category, items) in grouped_items(line_items) {
        grid.push_row(vec![Cell::text(category.to_uppercase())]);

        for item in items {
            let mut row = vec![
                Cell::text(item.item_code.clone()),
                Cell::text(item.name.clone()),
                Cell::text(item.category.clone()),
            ];
            row.extend(std::iter::repeat(Cell::Empty).take(plans.len()));
            grid.push_row(row);
        }

        grid.push_row(Vec::new());
    }

    MatrixDocument {
        grid,
        plan_count: plans.len(),
        item_count: line_items.len(),
        first_plan_col: FIRST_PLAN_COL,
        default_filename: "Pricing_Import_Template.xlsx".to_string(),
    }
}
