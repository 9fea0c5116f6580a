//! Service implementations of the source traits

pub mod dog_api_client;

pub use dog_api_client::HttpDogApi;
