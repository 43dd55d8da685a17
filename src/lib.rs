pub mod config;
pub mod error;
pub mod loan;
pub mod report;
pub mod validate;

pub use error::{FinanceError, Result};
