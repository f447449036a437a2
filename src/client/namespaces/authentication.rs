//! Authentication and API Key management.
//!
//! Generated by apigen 2.0.0 from the `core` specification
//! (1.0). Do not edit by hand.

use reqwest::{Method, Response};

use crate::client::{ApiClient, ClientError, Namespace, RequestOptions};

/// Authentication
pub struct Authentication<'a> {
    client: &'a ApiClient,
}

impl<'a> Authentication<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl Namespace for Authentication<'_> {
    const SCOPE: &'static str = "core";
    const BASE_URL: &'static str = "https://api.xata.io";
}

impl Authentication<'_> {
    /// Retrieve a list of existing user API keys
    ///
    /// Path: `/user/keys`
    /// Method: GET
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/user/keys#get-the-list-of-user-api-keys>
    pub async fn get_user_apikeys(
        &self,
    ) -> Result<Response, ClientError> {
        let path = "/user/keys";
        let options = RequestOptions::new();
        self.client
            .request(Method::GET, Self::BASE_URL, &path, options)
            .await
    }
}

impl Authentication<'_> {
    /// Create and return new API key
    ///
    /// Path: `/user/keys/{key_name}`
    /// Method: POST
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/user/keys/key_name#create-and-return-new-api-key>
    ///
    /// # Arguments
    /// * `key_name` - API Key name
    pub async fn create_user_apikey(
        &self,
        key_name: &str,
    ) -> Result<Response, ClientError> {
        let path = format!("/user/keys/{key_name}");
        let options = RequestOptions::new();
        self.client
            .request(Method::POST, Self::BASE_URL, &path, options)
            .await
    }
}

impl Authentication<'_> {
    /// Delete an existing API key
    ///
    /// Path: `/user/keys/{key_name}`
    /// Method: DELETE
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/user/keys/key_name#delete-an-existing-api-key>
    ///
    /// # Arguments
    /// * `key_name` - API Key name
    pub async fn delete_user_apikey(
        &self,
        key_name: &str,
    ) -> Result<Response, ClientError> {
        let path = format!("/user/keys/{key_name}");
        let options = RequestOptions::new();
        self.client
            .request(Method::DELETE, Self::BASE_URL, &path, options)
            .await
    }
}
