//! `pricegrid-recon` — reconciliation of decoded pricing rows against
//! canonical plans and line items.
//!
//! Pure engine crate: receives a decoded sheet plus canonical entity lists,
//! returns a classified result. No IO, no database access, no mutation of
//! canonical data; calling it speculatively is always safe.

pub mod engine;
pub mod model;

pub use engine::{validate, PRICE_SANITY_CEILING};
pub use model::{Change, MatchedItem, MatchedPlan, ValidationResult, ValidationSummary};
