//! HTTP handlers for flavor CRUD.

pub mod flavor;
pub use flavor::*;
