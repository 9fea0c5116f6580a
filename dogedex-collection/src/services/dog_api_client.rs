//! Dog catalog API client
//!
//! One `reqwest::Client` serves every endpoint. Endpoints that act on the
//! account carry the configured token in the `AUTH-TOKEN` header; the token
//! itself is obtained elsewhere.

use crate::models::{CatalogItem, OwnershipRecord};
use crate::types::{CatalogSource, DogService, OwnershipSource, SourceError};
use dogedex_common::api::{
    AddDogToUserDto, ApiEnvelope, DefaultResponse, DogData, DogListData, ADD_DOG_TO_USER_PATH,
    AUTH_TOKEN_HEADER, FIND_DOG_BY_ML_ID_PATH, GET_ALL_DOGS_PATH, GET_USER_DOGS_PATH,
};
use dogedex_common::config::ClientConfig;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("dogedex/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the dog catalog API
pub struct HttpDogApi {
    http_client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpDogApi {
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, SourceError> {
        let token = self.auth_token.as_deref().ok_or(SourceError::MissingToken)?;
        Ok(request.header(AUTH_TOKEN_HEADER, token))
    }

    /// Send a request and decode a 2xx body as `T`
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SourceError> {
        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    /// Send a request answered by a data envelope, rejecting `is_success == false`
    async fn send_envelope<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SourceError> {
        let envelope: ApiEnvelope<T> = self.send(request).await?;
        if !envelope.is_success {
            return Err(SourceError::Rejected(envelope.message));
        }
        Ok(envelope.data)
    }

    /// GET the full catalog
    pub async fn get_all_dogs(&self) -> Result<Vec<CatalogItem>, SourceError> {
        let url = self.url(GET_ALL_DOGS_PATH);
        tracing::debug!(url = %url, "Fetching dog catalog");

        let data: DogListData = self.send_envelope(self.http_client.get(&url)).await?;

        tracing::debug!(count = data.dogs.len(), "Retrieved dog catalog");
        Ok(data.dogs.into_iter().map(CatalogItem::from).collect())
    }

    /// GET the identities of dogs in the account's collection
    pub async fn get_user_dogs(&self) -> Result<Vec<OwnershipRecord>, SourceError> {
        let url = self.url(GET_USER_DOGS_PATH);
        tracing::debug!(url = %url, "Fetching account collection");

        let request = self.authorized(self.http_client.get(&url))?;
        let data: DogListData = self.send_envelope(request).await?;

        tracing::debug!(count = data.dogs.len(), "Retrieved account collection");
        Ok(data.dogs.into_iter().map(OwnershipRecord::from).collect())
    }

    /// POST a dog into the account's collection
    pub async fn add_dog_to_user(&self, dog_id: i64) -> Result<(), SourceError> {
        let url = self.url(ADD_DOG_TO_USER_PATH);
        let request = self
            .authorized(self.http_client.post(&url))?
            .json(&AddDogToUserDto { dog_id });

        let response: DefaultResponse = self.send(request).await?;
        if !response.is_success {
            return Err(SourceError::Rejected(response.message));
        }

        tracing::info!(dog_id, "Dog added to collection");
        Ok(())
    }

    /// GET a single dog by recognizer label
    pub async fn get_dog_by_ml_id(&self, ml_id: &str) -> Result<CatalogItem, SourceError> {
        let url = self.url(FIND_DOG_BY_ML_ID_PATH);
        tracing::debug!(url = %url, ml_id = %ml_id, "Looking up dog by recognizer label");

        let request = self.http_client.get(&url).query(&[("ml_id", ml_id)]);
        let data: DogData = self.send_envelope(request).await?;

        Ok(CatalogItem::from(data.dog))
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpDogApi {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, SourceError> {
        self.get_all_dogs().await
    }
}

#[async_trait::async_trait]
impl OwnershipSource for HttpDogApi {
    async fn fetch_owned(&self) -> Result<Vec<OwnershipRecord>, SourceError> {
        self.get_user_dogs().await
    }
}

#[async_trait::async_trait]
impl DogService for HttpDogApi {
    async fn add_to_collection(&self, item_id: i64) -> Result<(), SourceError> {
        self.add_dog_to_user(item_id).await
    }

    async fn find_by_ml_id(&self, ml_id: &str) -> Result<CatalogItem, SourceError> {
        self.get_dog_by_ml_id(ml_id).await
    }
}
