//! Request validation for flavor payloads.

use crate::error::AppError;
use crate::model::{FlavorInput, NewFlavor};

/// Width of the `name` column.
pub const NAME_MAX_LENGTH: usize = 255;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create or update body. `name` must be present and non-empty;
    /// a missing `is_favorite` means false.
    pub fn validate(input: FlavorInput) -> Result<NewFlavor, AppError> {
        let name = match input.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(AppError::Validation("Name is required".into())),
        };
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "Name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }
        Ok(NewFlavor {
            name,
            is_favorite: input.is_favorite.unwrap_or(false),
        })
    }
}
