use std::collections::HashMap;

use pricegrid_codec::ImportSheet;
use pricegrid_model::{FloorPlan, LineItem};

use crate::model::{Change, MatchedItem, MatchedPlan, ValidationResult, ValidationSummary};

/// Prices above this are flagged as suspicious but never block the import;
/// legitimate high-value line items exist.
pub const PRICE_SANITY_CEILING: f64 = 10_000_000.0;

/// How many unmatched item codes to preview in the warning text.
const UNMATCHED_PREVIEW: usize = 5;

/// Reconcile a decoded sheet against canonical plans and line items.
///
/// Joins are case-insensitive on `plan_code` / `item_code` and otherwise
/// exact; an unmatched code is surfaced, never guessed at or dropped.
pub fn validate(
    sheet: &ImportSheet,
    plans: &[FloorPlan],
    line_items: &[LineItem],
) -> ValidationResult {
    let plan_by_code: HashMap<String, &FloorPlan> = plans
        .iter()
        .map(|p| (p.plan_code.to_uppercase(), p))
        .collect();
    let item_by_code: HashMap<String, &LineItem> = line_items
        .iter()
        .map(|i| (i.item_code.to_uppercase(), i))
        .collect();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut matched_plans = Vec::new();
    let mut unmatched_plans = Vec::new();
    for code in &sheet.plan_codes {
        match plan_by_code.get(&code.to_uppercase()) {
            Some(plan) => matched_plans.push(MatchedPlan {
                plan_id: plan.id,
                plan_code: plan.plan_code.clone(),
            }),
            None => unmatched_plans.push(code.clone()),
        }
    }
    if matched_plans.is_empty() {
        errors.push("no matching floor plans found".to_string());
    }

    let mut matched_items = Vec::new();
    let mut unmatched_items = Vec::new();
    let mut changes = Vec::new();

    for row in &sheet.rows {
        let Some(item) = item_by_code.get(&row.item_code.to_uppercase()) else {
            if !row.item_code.is_empty() {
                unmatched_items.push(row.item_code.clone());
            }
            continue;
        };

        matched_items.push(MatchedItem {
            line_item_id: item.id,
            item_code: item.item_code.clone(),
            item_name: item.name.clone(),
            category: item.category.clone(),
            parsed_code: row.item_code.clone(),
            parsed_name: row.item_name.clone(),
        });

        for (plan_code, price) in &row.prices {
            // Prices against unmatched plan columns carry no target id and
            // are skipped; the plan itself is already surfaced above.
            if let Some(plan) = plan_by_code.get(&plan_code.to_uppercase()) {
                changes.push(Change {
                    plan_id: plan.id,
                    line_item_id: item.id,
                    plan_code: plan.plan_code.clone(),
                    item_code: item.item_code.clone(),
                    item_name: item.name.clone(),
                    old_value: None,
                    new_value: *price,
                });
            }
        }
    }
    if matched_items.is_empty() {
        errors.push("no matching line items found".to_string());
    }

    if !unmatched_plans.is_empty() {
        warnings.push(format!(
            "{} plan column(s) did not match any floor plan: {}",
            unmatched_plans.len(),
            unmatched_plans.join(", ")
        ));
    }
    if !unmatched_items.is_empty() {
        let preview: Vec<&str> = unmatched_items
            .iter()
            .take(UNMATCHED_PREVIEW)
            .map(|s| s.as_str())
            .collect();
        let suffix = if unmatched_items.len() > UNMATCHED_PREVIEW {
            ", ..."
        } else {
            ""
        };
        warnings.push(format!(
            "{} row(s) did not match any line item: {}{}",
            unmatched_items.len(),
            preview.join(", "),
            suffix
        ));
    }

    for change in &changes {
        if change.new_value < 0.0 {
            errors.push(format!(
                "negative price for {} / {}: {}",
                change.item_code, change.plan_code, change.new_value
            ));
        } else if change.new_value > PRICE_SANITY_CEILING {
            warnings.push(format!(
                "unusually high price for {} / {}: {}",
                change.item_code, change.plan_code, change.new_value
            ));
        }
    }

    let summary = ValidationSummary {
        total_plans_in_file: sheet.plan_codes.len(),
        matched_plans_count: matched_plans.len(),
        total_items_in_file: sheet.rows.len(),
        matched_items_count: matched_items.len(),
        changes_count: changes.len(),
    };

    ValidationResult {
        valid: errors.is_empty(),
        matched_plans,
        unmatched_plans,
        matched_items,
        unmatched_items,
        changes,
        errors,
        warnings,
        summary,
    }
}
