//! Numeric summaries and naming, independent of any drawing backend.

pub mod codeword;
pub mod confusion;
pub mod format;
pub mod histogram;
pub mod model;
pub mod naming;
pub mod roc;
pub mod series;
