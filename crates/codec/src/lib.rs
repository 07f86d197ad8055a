//! `pricegrid-codec` — round-trip codec between canonical pricing data and
//! the row/column grid contract.
//!
//! Pure transformation crate: no document IO. Encoding is deterministic and
//! fully program-controlled; decoding recovers structure from positional and
//! lexical heuristics applied to grids a human may have edited, so every
//! decoding step is defensive and non-throwing apart from the single
//! structural check (fewer than two rows).

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod template;

pub use decoder::{decode, ImportSheet, ParsedRow};
pub use encoder::{encode, summary_grid, MatrixDocument, FIRST_PLAN_COL};
pub use error::CodecError;
pub use template::{template, INSTRUCTIONS};
