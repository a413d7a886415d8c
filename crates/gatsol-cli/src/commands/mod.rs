pub mod predict;
pub mod truncate;
