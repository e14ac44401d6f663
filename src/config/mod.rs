//! Configuration management
//!
//! Process-wide settings: the prime range and retry budgets used for key
//! generation, and where the CLI keeps its ledger database.

pub mod settings;

pub use settings::{Config, KeyGenSettings, GLOBAL_CONFIG};
