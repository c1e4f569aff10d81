pub mod essay;
pub mod quiz;
