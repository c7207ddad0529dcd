//! Error types

mod export;
mod fetch;
mod prefs;

pub use export::*;
pub use fetch::*;
pub use prefs::*;
