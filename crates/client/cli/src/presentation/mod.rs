//! Terminal presentation components used by the viewer.
pub mod terminal;
pub mod theme;
pub mod ui;
