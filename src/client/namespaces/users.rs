//! Users management.
//!
//! Generated by apigen 2.0.0 from the `core` specification
//! (1.0). Do not edit by hand.

use reqwest::{Method, Response};

use crate::client::{ApiClient, ClientError, Namespace, RequestOptions};

/// Users
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl Namespace for Users<'_> {
    const SCOPE: &'static str = "core";
    const BASE_URL: &'static str = "https://api.xata.io";
}

impl Users<'_> {
    /// Return details of the user making the request
    ///
    /// Path: `/user`
    /// Method: GET
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/user#get-user-details>
    ///
    /// # Arguments
    /// * `columns` - Columns to include in the response
    /// * `x_request_id`
    pub async fn get_user(
        &self,
        columns: Option<&[&str]>,
        x_request_id: Option<&str>,
    ) -> Result<Response, ClientError> {
        let path = "/user";
        let mut options = RequestOptions::new();
        if let Some(columns) = columns {
            options = options.query("columns", columns.join(","));
        }
        if let Some(x_request_id) = x_request_id {
            options = options.header("X-Request-Id", x_request_id);
        }
        self.client
            .request(Method::GET, Self::BASE_URL, &path, options)
            .await
    }
}

impl Users<'_> {
    /// Update user info
    ///
    /// Path: `/user`
    /// Method: PUT
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/user#update-user-info>
    ///
    /// # Arguments
    /// * `payload` - content
    pub async fn update_user(
        &self,
        payload: serde_json::Value,
    ) -> Result<Response, ClientError> {
        let path = "/user";
        let mut options = RequestOptions::new();
        options = options.json(payload);
        self.client
            .request(Method::PUT, Self::BASE_URL, &path, options)
            .await
    }
}

impl Users<'_> {
    /// Delete user
    ///
    /// Path: `/user`
    /// Method: DELETE
    /// Status: experimental
    /// Docs: <https://xata.io/docs/api-reference/user#delete-user>
    pub async fn delete_user(
        &self,
    ) -> Result<Response, ClientError> {
        let path = "/user";
        let options = RequestOptions::new();
        self.client
            .request(Method::DELETE, Self::BASE_URL, &path, options)
            .await
    }
}
