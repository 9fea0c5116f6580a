//! Shared API request/response types
//!
//! Every endpoint of the dog catalog API answers with the same envelope:
//!
//! ```json
//! { "message": "success", "is_success": true, "data": { "dogs": [ ... ] } }
//! ```
//!
//! An envelope with `is_success == false` is a rejection; its `message`
//! explains why.

use serde::{Deserialize, Serialize};

// ========================================
// Endpoints
// ========================================

/// Full reference catalog (no auth)
pub const GET_ALL_DOGS_PATH: &str = "dogs";

/// Dogs in the authenticated account's collection
pub const GET_USER_DOGS_PATH: &str = "get_user_dogs";

/// Register a dog in the authenticated account's collection
pub const ADD_DOG_TO_USER_PATH: &str = "add_dog_to_user";

/// Look up a single dog by recognizer label (`?ml_id=`)
pub const FIND_DOG_BY_ML_ID_PATH: &str = "find_dog_by_ml_id";

/// Header carrying the account token on endpoints that require it
pub const AUTH_TOKEN_HEADER: &str = "AUTH-TOKEN";

// ========================================
// Envelopes
// ========================================

/// Response envelope wrapping a typed payload
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub message: String,
    pub is_success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope with the conventional "success" message
    pub fn success(data: T) -> Self {
        Self {
            message: "success".to_string(),
            is_success: true,
            data,
        }
    }

    /// Rejected envelope
    pub fn rejected(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            is_success: false,
            data,
        }
    }
}

/// Envelope without a payload (mutating endpoints)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DefaultResponse {
    pub message: String,
    pub is_success: bool,
}

/// `data` payload for list endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DogListData {
    pub dogs: Vec<DogDto>,
}

/// `data` payload for single-dog endpoints
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DogData {
    pub dog: DogDto,
}

// ========================================
// DTOs
// ========================================

/// Dog record as served by the API
///
/// Descriptive fields default to empty strings when the server omits them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DogDto {
    pub id: i64,
    pub index: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dog_type: String,
    #[serde(default)]
    pub height_female: String,
    #[serde(default)]
    pub height_male: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub life_expectancy: String,
    #[serde(default)]
    pub temperament: String,
    #[serde(default)]
    pub weight_female: String,
    #[serde(default)]
    pub weight_male: String,
}

/// Request body for [`ADD_DOG_TO_USER_PATH`]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AddDogToUserDto {
    pub dog_id: i64,
}
