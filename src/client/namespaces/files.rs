//! Files
//!
//! Generated by apigen 2.0.0 from the `core` specification
//! (1.0). Do not edit by hand.

use reqwest::{Method, Response};

use crate::client::{ApiClient, ClientError, Namespace, RequestOptions};

/// Files
pub struct Files<'a> {
    client: &'a ApiClient,
}

impl<'a> Files<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl Namespace for Files<'_> {
    const SCOPE: &'static str = "core";
    const BASE_URL: &'static str = "https://api.xata.io";
}

impl Files<'_> {
    /// Download content from a file column
    ///
    /// Path: `/db/{db_branch_name}/tables/{table_name}/data/{record_id}/column/{column_name}/file`
    /// Method: GET
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/db/db_branch_name/tables/table_name/data/record_id/column/column_name/file#download-content-from-a-file-column>
    ///
    /// # Arguments
    /// * `table_name`
    /// * `record_id`
    /// * `column_name`
    /// * `db_name` - The name of the database to query. Default: database name from the client.
    /// * `branch_name` - The name of the branch to query. Default: branch name from the client.
    /// * `response_content_type` - Content type of the response. Default: application/octet-stream
    pub async fn get_file(
        &self,
        table_name: &str,
        record_id: &str,
        column_name: &str,
        db_name: Option<&str>,
        branch_name: Option<&str>,
        response_content_type: Option<&str>,
    ) -> Result<Response, ClientError> {
        let db_branch_name = self.client.db_branch_name(db_name, branch_name)?;
        let path = format!("/db/{db_branch_name}/tables/{table_name}/data/{record_id}/column/{column_name}/file");
        let mut options = RequestOptions::new();
        options = options.header("Accept", response_content_type.unwrap_or("application/octet-stream"));
        self.client
            .request(Method::GET, Self::BASE_URL, &path, options)
            .await
    }
}

impl Files<'_> {
    /// Uploads the file content to the given file column
    ///
    /// Path: `/db/{db_branch_name}/tables/{table_name}/data/{record_id}/column/{column_name}/file`
    /// Method: PUT
    /// Status: GA
    /// Docs: <https://xata.io/docs/api-reference/db/db_branch_name/tables/table_name/data/record_id/column/column_name/file#uploads-the-file-content-to-the-given-file-column>
    ///
    /// # Arguments
    /// * `table_name`
    /// * `record_id`
    /// * `column_name`
    /// * `payload` - content
    /// * `db_name` - The name of the database to query. Default: database name from the client.
    /// * `branch_name` - The name of the branch to query. Default: branch name from the client.
    /// * `x_checksum` - SHA-256 of the uploaded content
    /// * `content_type` - Content type of the upload. Default: application/octet-stream
    pub async fn put_file(
        &self,
        table_name: &str,
        record_id: &str,
        column_name: &str,
        payload: Vec<u8>,
        db_name: Option<&str>,
        branch_name: Option<&str>,
        x_checksum: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Response, ClientError> {
        let db_branch_name = self.client.db_branch_name(db_name, branch_name)?;
        let path = format!("/db/{db_branch_name}/tables/{table_name}/data/{record_id}/column/{column_name}/file");
        let mut options = RequestOptions::new().header(
            "Content-Type",
            content_type.unwrap_or("application/octet-stream"),
        );
        options = options.body(payload);
        if let Some(x_checksum) = x_checksum {
            options = options.header("X-Checksum", x_checksum);
        }
        self.client
            .request(Method::PUT, Self::BASE_URL, &path, options)
            .await
    }
}
