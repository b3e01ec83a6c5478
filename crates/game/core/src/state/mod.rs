//! Session state read by scenario queries.
//!
//! The [`Board`] carries the live obstacle set and the [`VariableRegistry`] the
//! slider values. Both outlive any one scenario; scenarios borrow them per call
//! instead of capturing them, so a query always sees current content.
pub mod board;
pub mod memo;
pub mod variables;

pub use board::Board;
pub use memo::FingerprintMemo;
pub use variables::VariableRegistry;
