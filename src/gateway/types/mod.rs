//! Gateway boundary types
//!
//! - [`Envelope`]: `{"data": ...}` success wrapper
//! - [`ValidatedJson`]: body extractor running `validator` rules
//! - [`PageQuery`]: `page`/`limit` query extractor

pub mod extract;
pub mod response;

pub use extract::{PageQuery, ValidatedJson};
pub use response::{ContextTokenResponse, Envelope};
