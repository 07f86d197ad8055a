//! `pricegrid-model` — canonical pricing entities and the grid contract.
//!
//! The grid is the sole contract between the encoder and decoder. It knows
//! nothing about categories or totals; those are positional conventions
//! layered on by the codec.

pub mod entities;
pub mod grid;

pub use entities::{
    bucket, category_rank, FloorPlan, LineItem, PricingMap, CATEGORY_ORDER, OTHER_CATEGORY,
};
pub use grid::{Cell, Grid};
