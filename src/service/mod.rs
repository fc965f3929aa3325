//! Request-level rules applied before the accessor runs.

mod validation;
pub use validation::{RequestValidator, NAME_MAX_LENGTH};
