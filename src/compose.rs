pub mod blend;
pub mod placement;
