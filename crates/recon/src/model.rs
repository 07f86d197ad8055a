use serde::Serialize;

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MatchedPlan {
    pub plan_id: u64,
    /// Canonical spelling of the code, not the spreadsheet's.
    pub plan_code: String,
}

/// Canonical line item merged with the parsed row that matched it, so a
/// reviewer can trace an edited spreadsheet row back to its entity.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedItem {
    pub line_item_id: u64,
    pub item_code: String,
    pub item_name: String,
    pub category: String,
    pub parsed_code: String,
    pub parsed_name: String,
}

// ---------------------------------------------------------------------------
// Changes
// ---------------------------------------------------------------------------

/// One proposed price delta, pending caller-side persistence.
///
/// `old_value` is always `None` here: the engine is a pure function of the
/// decoded sheet and the canonical entity lists, and never reads the live
/// dataset. The caller fills it in before presenting a diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub plan_id: u64,
    pub line_item_id: u64,
    pub plan_code: String,
    pub item_code: String,
    pub item_name: String,
    pub old_value: Option<f64>,
    pub new_value: f64,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub total_plans_in_file: usize,
    pub matched_plans_count: usize,
    pub total_items_in_file: usize,
    pub matched_items_count: usize,
    pub changes_count: usize,
}

/// Full classification of one decoded sheet. Blocking problems land in
/// `errors`, advisory ones in `warnings`; the result is always returned in
/// full so a caller can show what went wrong.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty. Warnings never flip this.
    pub valid: bool,
    pub matched_plans: Vec<MatchedPlan>,
    pub unmatched_plans: Vec<String>,
    pub matched_items: Vec<MatchedItem>,
    pub unmatched_items: Vec<String>,
    pub changes: Vec<Change>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ValidationSummary,
}
