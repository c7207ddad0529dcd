//! Core table model types

mod column;
mod listing;
mod row;

pub use column::*;
pub use listing::*;
pub use row::*;
