pub mod flatten;
pub mod grid;
pub mod resize;
pub mod save;
