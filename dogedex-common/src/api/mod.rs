//! Wire types for the dog catalog HTTP API
//!
//! Shared by the HTTP sources in `dogedex-collection` and by the in-process
//! fake servers its integration tests stand up.

pub mod types;

pub use types::{
    AddDogToUserDto, ApiEnvelope, DefaultResponse, DogData, DogDto, DogListData,
    ADD_DOG_TO_USER_PATH, AUTH_TOKEN_HEADER, FIND_DOG_BY_ML_ID_PATH, GET_ALL_DOGS_PATH,
    GET_USER_DOGS_PATH,
};
