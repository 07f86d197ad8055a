// CSV loaders for canonical entity lists.
//
// Expected headers:
//   plans.csv:   id,plan_code,name,floor_area_sqft,bedrooms,bathrooms
//   items.csv:   id,item_code,name,category
//   pricing.csv: plan_code,item_code,cost
//
// Pricing rows are joined to entities by code (case-insensitive) at load
// time; a code that matches nothing is a hard error here, unlike the
// import path, because canonical data is supposed to be internally
// consistent.

use std::path::Path;

use serde::Deserialize;

use pricegrid_model::{FloorPlan, LineItem, PricingMap};

pub fn load_plans(path: &Path) -> Result<Vec<FloorPlan>, String> {
    read_records(path)
}

pub fn load_items(path: &Path) -> Result<Vec<LineItem>, String> {
    read_records(path)
}

#[derive(Debug, Deserialize)]
struct PricingRecord {
    plan_code: String,
    item_code: String,
    cost: f64,
}

pub fn load_pricing(
    path: &Path,
    plans: &[FloorPlan],
    line_items: &[LineItem],
) -> Result<PricingMap, String> {
    let plan_ids: std::collections::HashMap<String, u64> = plans
        .iter()
        .map(|p| (p.plan_code.to_uppercase(), p.id))
        .collect();
    let item_ids: std::collections::HashMap<String, u64> = line_items
        .iter()
        .map(|i| (i.item_code.to_uppercase(), i.id))
        .collect();

    let records: Vec<PricingRecord> = read_records(path)?;

    let mut pricing = PricingMap::new();
    for (i, record) in records.iter().enumerate() {
        // Header is line 1, first record line 2
        let line = i + 2;
        let plan_id = plan_ids
            .get(&record.plan_code.to_uppercase())
            .copied()
            .ok_or_else(|| {
                format!(
                    "{} line {}: unknown plan code '{}'",
                    path.display(),
                    line,
                    record.plan_code
                )
            })?;
        let item_id = item_ids
            .get(&record.item_code.to_uppercase())
            .copied()
            .ok_or_else(|| {
                format!(
                    "{} line {}: unknown item code '{}'",
                    path.display(),
                    line,
                    record.item_code
                )
            })?;
        pricing.set(plan_id, item_id, record.cost);
    }
    Ok(pricing)
}

fn read_records<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    let mut out = Vec::new();
    for (i, record) in reader.deserialize::<T>().enumerate() {
        out.push(record.map_err(|e| format!("{} line {}: {}", path.display(), i + 2, e))?);
    }
    Ok(out)
}
