use anyhow::{Context, Result as AnyResult};
use futures::future::try_join_all;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::auth::TokenManager;
use crate::config::Config;
use crate::error::{self, GmapError, Result};
use crate::models::{PageParams, SearchParams, TraversalParams};

/// Client for the Globomap HTTP API.
///
/// Holds one reqwest client and the token manager; every operation
/// ensures a valid token before touching a resource endpoint.
pub struct GmapClient {
    client: Client,
    api_url: String,
    auth: TokenManager,
}

impl GmapClient {
    pub fn new(config: &Config) -> AnyResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        let auth = TokenManager::new(
            client.clone(),
            &config.api_url,
            config.username.clone(),
            config.password.clone(),
        );

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            auth,
        })
    }

    /// Issues one authenticated call and decodes the JSON body.
    ///
    /// Params travel as the query string for GET and as the JSON body for
    /// POST. Auth failures propagate unchanged; the call itself is
    /// single-shot, there is no retry.
    pub async fn request<P>(&self, method: Method, path: &str, params: Option<&P>) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let token = self.auth.ensure_token().await?;
        self.send(&token, method, path, params).await
    }

    async fn send<P>(
        &self,
        token: &str,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(method = %method, url = %url, "dispatching request");

        // The API expects the raw token, not a Bearer scheme.
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, token);

        if let Some(params) = params {
            builder = if method == Method::POST {
                builder.json(params)
            } else {
                builder.query(params)
            };
        }

        let response = builder.send().await.map_err(GmapError::transport)?;

        let status = response.status();
        tracing::debug!(status = %status, url = %url, "received response");

        if !status.is_success() {
            return Err(GmapError::Api {
                status: status.as_u16(),
                message: error::response_detail(response).await,
            });
        }

        response.json::<Value>().await.map_err(GmapError::transport)
    }

    pub async fn list_graphs(&self, page: PageParams) -> Result<Value> {
        self.request(Method::GET, "/graphs", Some(&page)).await
    }

    pub async fn list_collections(&self, page: PageParams) -> Result<Value> {
        self.request(Method::GET, "/collections", Some(&page)).await
    }

    pub async fn list_edges(&self, page: PageParams) -> Result<Value> {
        self.request(Method::GET, "/edges", Some(&page)).await
    }

    pub async fn list_queries(&self, page: PageParams) -> Result<Value> {
        self.request(Method::GET, "/queries", Some(&page)).await
    }

    pub async fn get_node(&self, collection: &str, node_id: &str) -> Result<Value> {
        let path = format!("/collections/{}/{}", collection, node_id);
        self.request::<()>(Method::GET, &path, None).await
    }

    /// Executes a pre-defined query, passing `value` as its variable.
    pub async fn run_query(&self, kind: &str, value: &str) -> Result<Value> {
        let path = format!("/queries/{}/execute", kind);
        self.request(Method::GET, &path, Some(&[("variable", value)]))
            .await
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Value> {
        self.request(Method::GET, "/collections/search", Some(params))
            .await
    }

    pub async fn traversal(&self, graph: &str, params: &TraversalParams) -> Result<Value> {
        let path = format!("/graphs/{}/traversal", graph);
        self.request(Method::GET, &path, Some(params)).await
    }

    /// Runs one traversal per graph concurrently, sharing a single token.
    ///
    /// Results keep the order of `graphs`; the first failure rejects the
    /// whole batch without waiting on the rest.
    pub async fn traversal_multiple(
        &self,
        graphs: &[String],
        params: &TraversalParams,
    ) -> Result<Vec<Value>> {
        let token = self.auth.ensure_token().await?;
        let token = &token;

        let calls = graphs.iter().map(|graph| {
            let path = format!("/graphs/{}/traversal", graph);
            async move { self.send(token, Method::GET, &path, Some(params)).await }
        });

        try_join_all(calls).await
    }

    pub async fn list_plugins(&self) -> Result<Value> {
        self.request::<()>(Method::GET, "/plugins/", None).await
    }

    /// Fetches data from a plugin, posting `params` as its request body.
    pub async fn plugin_data<P>(&self, plugin_name: &str, params: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("/plugins/{}/", plugin_name);
        self.request(Method::POST, &path, Some(params)).await
    }
}
