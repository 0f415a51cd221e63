//! Thin PostgREST client.
//!
//! Every request carries the project key in `apikey` and a bearer token:
//! the caller's access token for session scope, the service-role key for
//! privileged scope. Which one is decided by whoever builds the client.

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::GatewayError;

pub type Query<'a> = [(&'a str, String)];

#[derive(Clone)]
pub struct PostgrestClient {
    http: Client,
    rest_url: String,
    api_key: SecretString,
    bearer: SecretString,
}

impl PostgrestClient {
    pub fn new(http: Client, base_url: &str, api_key: SecretString, bearer: SecretString) -> Self {
        Self {
            http,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key,
            bearer,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rpc/{}", self.rest_url, function)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.bearer.expose_secret())
    }

    /// `GET /{table}` with PostgREST query parameters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query<'_>,
    ) -> Result<Vec<T>, GatewayError> {
        let response = self
            .authorize(self.http.get(self.table_url(table)))
            .query(query)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Exact row count via `HEAD` and the `Content-Range` header.
    pub async fn count(&self, table: &str, query: &Query<'_>) -> Result<u64, GatewayError> {
        let response = self
            .authorize(self.http.head(self.table_url(table)))
            .header("Prefer", "count=exact")
            .query(query)
            .send()
            .await?;
        let response = check_status(response).await?;

        let header = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or(GatewayError::Missing("content-range header"))?;
        parse_content_range_total(header).ok_or(GatewayError::Missing("content-range total"))
    }

    /// `POST /{table}` returning the written rows.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query<'_>,
        prefer: &str,
        body: &B,
    ) -> Result<Vec<T>, GatewayError> {
        let response = self
            .authorize(self.http.post(self.table_url(table)))
            .header("Prefer", prefer)
            .query(query)
            .json(body)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// `POST /rpc/{function}` decoding the result.
    pub async fn rpc<B: Serialize, T: DeserializeOwned>(
        &self,
        function: &str,
        args: &B,
    ) -> Result<T, GatewayError> {
        Ok(self.call(function, args).await?.json().await?)
    }

    /// `POST /rpc/{function}` ignoring the result.
    pub async fn rpc_discard<B: Serialize>(
        &self,
        function: &str,
        args: &B,
    ) -> Result<(), GatewayError> {
        self.call(function, args).await.map(|_| ())
    }

    async fn call<B: Serialize>(&self, function: &str, args: &B) -> Result<Response, GatewayError> {
        let response = self
            .authorize(self.http.post(self.rpc_url(function)))
            .json(args)
            .send()
            .await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "gateway request rejected");
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}
