//! Demo key materialization
//!
//! Presentation-side key tables, kept apart from the transaction protocol.

pub mod demo_keys;

pub use demo_keys::{DemoKeyRow, DemoKeyTable};
