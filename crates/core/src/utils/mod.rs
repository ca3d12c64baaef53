pub mod formatters;
pub mod serde_date;
pub mod time_utils;
pub mod validation;

pub use formatters::*;
