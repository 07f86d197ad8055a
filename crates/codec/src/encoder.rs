use pricegrid_model::{bucket, Cell, FloorPlan, Grid, LineItem, PricingMap, CATEGORY_ORDER, OTHER_CATEGORY};

/// First grid column holding per-plan prices. Columns 0..=2 are the item
/// code, item name, and category labels.
pub const FIRST_PLAN_COL: usize = 3;

/// Labels for the three fixed leading columns.
pub const HEADER_LABELS: [&str; 3] = ["Item Code", "Item Name", "Category"];

/// Header for the derived per-plan summary grid.
pub const SUMMARY_LABELS: [&str; 7] = [
    "Plan Code",
    "Plan Name",
    "Area (SF)",
    "Beds",
    "Baths",
    "Total Cost",
    "$/SF",
];

/// An encoded grid plus export metadata.
#[derive(Debug, Clone)]
pub struct MatrixDocument {
    pub grid: Grid,
    pub plan_count: usize,
    pub item_count: usize,
    /// Index of the first plan column. Presentation hint for currency
    /// formatting; cell values underneath are always plain numbers.
    pub first_plan_col: usize,
    pub default_filename: String,
}

/// Canonical column order: ascending case-sensitive plan_code. Column
/// position is the only key a decoder can rely on for plans whose header
/// label fails to parse, so this ordering is a wire invariant.
pub(crate) fn sorted_plans(plans: &[FloorPlan]) -> Vec<&FloorPlan> {
    let mut sorted: Vec<&FloorPlan> = plans.iter().collect();
    sorted.sort_by(|a, b| a.plan_code.cmp(&b.plan_code));
    sorted
}

/// Group items by bucketed category in fixed display order, dropping empty
/// buckets. Input order is preserved within each bucket.
pub(crate) fn grouped_items<'a>(line_items: &'a [LineItem]) -> Vec<(&'static str, Vec<&'a LineItem>)> {
    let mut buckets: Vec<(&'static str, Vec<&LineItem>)> =
        CATEGORY_ORDER.iter().map(|&c| (c, Vec::new())).collect();
    buckets.push((OTHER_CATEGORY, Vec::new()));

    for item in line_items {
        let b = bucket(&item.category);
        if let Some(entry) = buckets.iter_mut().find(|(name, _)| *name == b) {
            entry.1.push(item);
        }
    }

    buckets.retain(|(_, members)| !members.is_empty());
    buckets
}

pub(crate) fn header_row(plans: &[&FloorPlan]) -> Vec<Cell> {
    let mut row: Vec<Cell> = HEADER_LABELS.iter().map(|&l| Cell::text(l)).collect();
    for plan in plans {
        row.push(Cell::text(format!(
            "{} ({:.0} SF)",
            plan.plan_code, plan.floor_area_sqft
        )));
    }
    row
}

/// All-caps category marker. Only the first cell is populated; the decoder
/// keys off the empty second cell.
fn marker_row(category: &str) -> Vec<Cell> {
    vec![Cell::text(category.to_uppercase())]
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Encode the full pricing matrix: header, category-grouped item rows with
/// unpriced cells written as 0, then TOTAL and $/SF rows.
pub fn encode(plans: &[FloorPlan], line_items: &[LineItem], pricing: &PricingMap) -> MatrixDocument {
    let plans = sorted_plans(plans);

    let mut grid = Grid::new();
    grid.push_row(header_row(&plans));

    let mut totals = vec![0.0_f64; plans.len()];

    for (category, items) in grouped_items(line_items) {
        grid.push_row(marker_row(category));

        for item in items {
            let mut row = vec![
                Cell::text(item.item_code.clone()),
                Cell::text(item.name.clone()),
                Cell::text(item.category.clone()),
            ];
            for (i, plan) in plans.iter().enumerate() {
                let cost = pricing.price_of(plan.id, item.id).unwrap_or(0.0);
                totals[i] += cost;
                row.push(Cell::Number(cost));
            }
            grid.push_row(row);
        }

        // Blank separator after each group
        grid.push_row(Vec::new());
    }

    let mut total_row = vec![Cell::text("TOTAL"), Cell::Empty, Cell::Empty];
    for total in &totals {
        total_row.push(Cell::Number(*total));
    }
    grid.push_row(total_row);

    let mut psf_row = vec![Cell::text("$/SF"), Cell::Empty, Cell::Empty];
    for (i, plan) in plans.iter().enumerate() {
        let per_sf = if plan.floor_area_sqft > 0.0 {
            round2(totals[i] / plan.floor_area_sqft)
        } else {
            0.0
        };
        psf_row.push(Cell::Number(per_sf));
    }
    grid.push_row(psf_row);

    MatrixDocument {
        grid,
        plan_count: plans.len(),
        item_count: line_items.len(),
        first_plan_col: FIRST_PLAN_COL,
        default_filename: default_matrix_filename(),
    }
}

/// One row per plan with derived totals. No new input; everything computable
/// from the arguments.
pub fn summary_grid(plans: &[FloorPlan], line_items: &[LineItem], pricing: &PricingMap) -> Grid {
    let plans = sorted_plans(plans);

    let mut grid = Grid::new();
    grid.push_row(SUMMARY_LABELS.iter().map(|&l| Cell::text(l)).collect());

    for plan in plans {
        let total: f64 = line_items
            .iter()
            .filter_map(|item| pricing.price_of(plan.id, item.id))
            .sum();
        let per_sf = if plan.floor_area_sqft > 0.0 {
            round2(total / plan.floor_area_sqft)
        } else {
            0.0
        };

        grid.push_row(vec![
            Cell::text(plan.plan_code.clone()),
            Cell::text(plan.name.clone()),
            Cell::Number(plan.floor_area_sqft),
            Cell::Number(plan.bedrooms as f64),
            Cell::Number(plan.bathrooms),
            Cell::Number(total),
            Cell::Number(per_sf),
        ]);
    }

    grid
}

fn default_matrix_filename() -> String {
    format!("Pricing_Matrix_{}.xlsx", chrono::Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: u64, code: &str, area: f64) -> FloorPlan {
        FloorPlan {
            id,
            plan_code: code.into(),
            name: format!("The {code}"),
            floor_area_sqft: area,
            bedrooms: 3,
            bathrooms: 2.0,
        }
    }

    fn item(id: u64, code: &str, category: &str) -> LineItem {
        LineItem {
            id,
            item_code: code.into(),
            name: format!("{code} work"),
            category: category.into(),
        }
    }

    #[test]
    fn columns_sorted_by_plan_code() {
        let plans = vec![plan(1, "ZION", 2100.0), plan(2, "ATLAS", 1554.0)];
        let items = vec![item(10, "LBR_FRAME", "framing")];
        let doc = encode(&plans, &items, &PricingMap::new());

        let header = doc.grid.row(0).unwrap();
        assert_eq!(header[3].as_text(), "ATLAS (1554 SF)");
        assert_eq!(header[4].as_text(), "ZION (2100 SF)");
        assert_eq!(doc.plan_count, 2);
    }

    #[test]
    fn empty_categories_get_no_marker_rows() {
        let plans = vec![plan(1, "ATLAS", 1554.0)];
        let items = vec![item(10, "LBR_FRAME", "framing"), item(11, "PAINT_INT", "finishes")];
        let doc = encode(&plans, &items, &PricingMap::new());

        let markers: Vec<String> = doc
            .grid
            .rows()
            .iter()
            .skip(1)
            .filter(|r| {
                !r.is_empty() && r[0].as_text() == r[0].as_text().to_uppercase()
                    && r.get(1).map(|c| c.is_empty()).unwrap_or(true)
                    && r[0].as_text().len() > 2
            })
            .map(|r| r[0].as_text())
            .collect();

        // FRAMING and FINISHES markers plus the derived TOTAL and $/SF rows
        assert_eq!(markers, vec!["FRAMING", "FINISHES", "TOTAL", "$/SF"]);
    }

    #[test]
    fn unpriced_cells_encode_as_zero() {
        let plans = vec![plan(1, "ATLAS", 1554.0)];
        let items = vec![item(10, "LBR_FRAME", "framing")];
        let mut pricing = PricingMap::new();
        pricing.set(1, 99, 500.0); // different item; LBR_FRAME stays unpriced

        let doc = encode(&plans, &items, &pricing);
        // Row 1 = FRAMING marker, row 2 = the item row
        assert_eq!(*doc.grid.cell(2, 3), Cell::Number(0.0));
    }

    #[test]
    fn totals_and_per_sf_rows() {
        let plans = vec![plan(1, "ATLAS", 1554.0)];
        let items = vec![item(10, "LBR_FRAME", "framing"), item(11, "ROOF_SHGL", "framing")];
        let mut pricing = PricingMap::new();
        pricing.set(1, 10, 6740.29);
        pricing.set(1, 11, 1259.71);

        let doc = encode(&plans, &items, &pricing);
        let rows = doc.grid.rows();
        let total_row = &rows[rows.len() - 2];
        let psf_row = &rows[rows.len() - 1];

        assert_eq!(total_row[0].as_text(), "TOTAL");
        assert_eq!(total_row[3], Cell::Number(8000.0));
        assert_eq!(psf_row[0].as_text(), "$/SF");
        assert_eq!(psf_row[3], Cell::Number(round2(8000.0 / 1554.0)));
    }

    #[test]
    fn zero_area_per_sf_is_zero() {
        let plans = vec![plan(1, "ATLAS", 0.0)];
        let items = vec![item(10, "LBR_FRAME", "framing")];
        let mut pricing = PricingMap::new();
        pricing.set(1, 10, 100.0);

        let doc = encode(&plans, &items, &pricing);
        let psf_row = doc.grid.rows().last().unwrap();
        assert_eq!(psf_row[3], Cell::Number(0.0));
    }

    #[test]
    fn summary_grid_derives_totals() {
        let plans = vec![plan(1, "ATLAS", 1554.0)];
        let items = vec![item(10, "LBR_FRAME", "framing")];
        let mut pricing = PricingMap::new();
        pricing.set(1, 10, 777.0);

        let summary = summary_grid(&plans, &items, &pricing);
        assert_eq!(summary.row_count(), 2);
        assert_eq!(summary.cell(1, 0).as_text(), "ATLAS");
        assert_eq!(*summary.cell(1, 5), Cell::Number(777.0));
        assert_eq!(*summary.cell(1, 6), Cell::Number(0.5));
    }

    #[test]
    fn default_filename_embeds_iso_date() {
        let name = default_matrix_filename();
        assert!(name.starts_with("Pricing_Matrix_"));
        assert!(name.ends_with(".xlsx"));
    }
}
