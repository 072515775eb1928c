// src/table/mod.rs

pub mod merged;
pub mod normalize;

pub use merged::{outer_join, MergedRow, MergedTable};
pub use normalize::{normalize, IndicatorTable, Observation};
