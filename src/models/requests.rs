//! Request DTOs for the inventory API
//!
//! Defines the structure of incoming HTTP request bodies. Bodies are
//! deserialized leniently and then checked by `validate`, which yields either
//! the typed input for the service or the full set of field errors.

use serde::{Deserialize, Deserializer};

use crate::error::ValidationErrors;
use crate::models::{ItemChanges, NewItem, MAX_NAME_LENGTH};

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";

/// Request body for POST /items/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateItemRequest {
    /// Validates the request, returning the new item's fields.
    pub fn validate(self) -> Result<NewItem, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match self.name {
            Some(name) => clean_name(&name, &mut errors),
            None => {
                errors.add("name", REQUIRED);
                String::new()
            }
        };

        errors.into_result(NewItem {
            name,
            description: self.description,
        })
    }
}

/// Request body for PUT /items/:item_id/
///
/// Every field is optional. An explicit `null` is distinguished from an
/// absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl UpdateItemRequest {
    /// Validates the request, returning the partial change set.
    pub fn validate(self) -> Result<ItemChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match self.name {
            Some(Some(name)) => Some(clean_name(&name, &mut errors)),
            Some(None) => {
                errors.add("name", NOT_NULL);
                None
            }
            None => None,
        };

        errors.into_result(ItemChanges {
            name,
            description: self.description,
        })
    }
}

/// Trims surrounding whitespace and checks what is left.
fn clean_name(raw: &str, errors: &mut ValidationErrors) -> String {
    let name = raw.trim();
    if name.is_empty() {
        errors.add("name", NOT_BLANK);
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.add(
            "name",
            format!(
                "Ensure this field has no more than {} characters.",
                MAX_NAME_LENGTH
            ),
        );
    }
    name.to_string()
}

/// Maps a present field (even `null`) to `Some`, leaving absence to `default`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
