//! Core processing building blocks: resizing, pixel grids, flattening and
//! output policies. These are internal primitives consumed by the high-level
//! `api` module.
pub mod params;
pub mod processing;
