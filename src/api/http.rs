// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `reqwest` implementation of [`PdnsApi`].

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use url::Url;

use super::types::{
    CreateZoneRequest, Cryptokey, CryptokeySpec, PatchZoneRequest, SearchHit, SearchQuery, Zone,
    ZoneKind, ZoneSummary,
};
use super::PdnsApi;
use crate::config::ClientConfig;
use crate::constants::API_KEY_HEADER;
use crate::errors::{PdnsError, Result};
use crate::records::RRSet;

/// PowerDNS API access over HTTP.
///
/// Cloning is cheap and shares the underlying connection pool.
///
/// # Examples
///
/// ```rust,no_run
/// use powerdns_api::api::{HttpApi, PdnsApi};
/// use powerdns_api::config::ClientConfig;
///
/// # async fn example() -> powerdns_api::errors::Result<()> {
/// let config = ClientConfig::new("http://127.0.0.1:8081/api/v1/servers/localhost", "secret")?;
/// let api = HttpApi::new(&config)?;
/// let zones = api.list_zones().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    /// HTTP client for API requests
    client: Arc<HttpClient>,
    /// Endpoint without trailing slash
    base_url: Arc<String>,
    /// Value of the `X-API-Key` header
    api_key: Arc<String>,
}

impl HttpApi {
    /// Create an API handle from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdnsError::Config`] if the endpoint is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url();
        Url::parse(&base_url)
            .map_err(|e| PdnsError::Config(format!("invalid endpoint '{base_url}': {e}")))?;

        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PdnsError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: Arc::new(base_url),
            api_key: Arc::new(config.api_key.clone()),
        })
    }

    /// The normalized endpoint all paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Execute one request and return the response body.
    ///
    /// Every request carries the API key header. Non-success statuses become
    /// [`PdnsError::Transport`] carrying the response body.
    async fn pdns_request<T: Serialize + std::fmt::Debug>(
        &self,
        method: Method,
        url: &str,
        body: Option<&T>,
    ) -> Result<String> {
        debug!(
            method = %method,
            url = %url,
            body = ?body,
            "HTTP API request to PowerDNS"
        );

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(API_KEY_HEADER, self.api_key.as_str());
        if let Some(body_data) = body {
            request = request.json(body_data);
        }

        let response = request.send().await.map_err(|source| PdnsError::Connection {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                method = %method,
                url = %url,
                status = %status,
                error = %error_text,
                "HTTP API request failed"
            );
            return Err(PdnsError::Transport {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                message: error_text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| PdnsError::Connection {
                url: url.to_string(),
                source,
            })?;

        debug!(
            method = %method,
            url = %url,
            status = %status,
            response_len = text.len(),
            "HTTP API request successful"
        );

        Ok(text)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let text = self.pdns_request(Method::GET, url, None::<&()>).await?;
        decode(url, &text)
    }
}

fn decode<R: DeserializeOwned>(url: &str, text: &str) -> Result<R> {
    serde_json::from_str(text).map_err(|source| PdnsError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl PdnsApi for HttpApi {
    async fn list_zones(&self) -> Result<Vec<ZoneSummary>> {
        self.get_json(&self.url("/zones")).await
    }

    async fn create_zone(&self, name: &str, kind: ZoneKind) -> Result<Option<RRSet>> {
        let url = self.url("/zones");
        let body = CreateZoneRequest { name, kind };
        let text = self.pdns_request(Method::POST, &url, Some(&body)).await?;

        info!(zone = %name, kind = ?kind, "Created zone");

        if text.trim().is_empty() {
            return Ok(None);
        }
        let zone: Zone = decode(&url, &text)?;
        Ok(zone.rrsets.into_iter().next())
    }

    async fn get_zone_meta(&self, zone: &str) -> Result<Option<Zone>> {
        match self.get_json(&self.url(&format!("/zones/{zone}"))).await {
            Ok(zone) => Ok(Some(zone)),
            Err(e) if e.is_not_found() => {
                debug!(zone = %zone, "Zone does not exist");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_zone(&self, zone: &str) -> Result<()> {
        let url = self.url(&format!("/zones/{zone}"));
        self.pdns_request(Method::DELETE, &url, None::<&()>).await?;
        info!(zone = %zone, "Deleted zone");
        Ok(())
    }

    async fn patch_record_sets(&self, zone: &str, rrsets: &[RRSet]) -> Result<()> {
        let url = self.url(&format!("/zones/{zone}"));
        let body = PatchZoneRequest { rrsets };
        self.pdns_request(Method::PATCH, &url, Some(&body)).await?;
        info!(zone = %zone, rrsets = rrsets.len(), "Patched record sets");
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Option<Vec<SearchHit>>> {
        if query.query.trim().is_empty() {
            return Ok(None);
        }

        let mut url = Url::parse(&self.url("/search-data"))
            .map_err(|e| PdnsError::Config(format!("invalid endpoint '{}': {e}", self.base_url)))?;
        url.query_pairs_mut()
            .append_pair("q", &query.query)
            .append_pair("max", &query.max.to_string())
            .append_pair("object_type", query.object_type.as_str());

        self.get_json(url.as_str()).await.map(Some)
    }

    async fn create_cryptokey(
        &self,
        zone: &str,
        spec: &CryptokeySpec,
        return_private: bool,
    ) -> Result<Cryptokey> {
        let url = self.url(&format!("/zones/{zone}/cryptokeys"));
        let text = self.pdns_request(Method::POST, &url, Some(spec)).await?;
        let mut key: Cryptokey = decode(&url, &text)?;

        info!(zone = %zone, id = ?key.id, keytype = ?key.keytype, "Created cryptokey");

        if !return_private {
            key.privatekey = None;
        }
        Ok(key)
    }

    async fn list_cryptokeys(&self, zone: &str) -> Result<Vec<Cryptokey>> {
        self.get_json(&self.url(&format!("/zones/{zone}/cryptokeys")))
            .await
    }

    async fn delete_cryptokey(&self, zone: &str, id: u64) -> Result<()> {
        let url = self.url(&format!("/zones/{zone}/cryptokeys/{id}"));
        self.pdns_request(Method::DELETE, &url, None::<&()>).await?;
        info!(zone = %zone, id = id, "Deleted cryptokey");
        Ok(())
    }
}
