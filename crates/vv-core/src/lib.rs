//! vv-core: stable foundation for vitalview.
//!
//! Contains:
//! - reading (the decoded measurement record + display classification)
//! - filter (selection state and the pure filtering function)

pub mod filter;
pub mod reading;

pub use filter::{
    AlertStatus, CategoryFilter, FilterChange, FilterParseError, FilterSelection, FilterState,
    apply, apply_refs, category_options,
};
pub use reading::{CellStatus, Reading};
