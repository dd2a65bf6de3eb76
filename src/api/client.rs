use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{AUTH_SCOPE, AccessToken, CatalogApi, ClientConfig, Credentials};
use crate::error::{ExportError, Result};
use crate::model::ProductPage;

const USER_AGENT: &str = concat!("wms-catalog-export/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Blocking HTTP client for the WMS token and products endpoints.
#[derive(Debug, Clone)]
pub struct WmsClient {
    inner: Client,
    config: ClientConfig,
}

impl WmsClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let inner = builder.build().map_err(ExportError::HttpClient)?;
        Ok(Self { inner, config })
    }
}

impl CatalogApi for WmsClient {
    #[instrument(skip_all, fields(url = %self.config.auth_url))]
    fn acquire_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", AUTH_SCOPE),
        ];

        let response = self
            .inner
            .post(&self.config.auth_url)
            .form(&form)
            .timeout(self.config.auth_timeout)
            .send()
            .map_err(ExportError::AuthTransport)?;
        debug!(status = %response.status(), "token response received");

        if response.status() != StatusCode::OK {
            return Err(ExportError::AuthRejected {
                status: response.status().as_u16(),
            });
        }

        let body: TokenResponse = response.json().map_err(ExportError::AuthTransport)?;
        Ok(AccessToken::new(body.access_token.unwrap_or_default()))
    }

    #[instrument(skip(self, token), fields(url = %self.config.products_url))]
    fn fetch_page(
        &self,
        token: &AccessToken,
        unit_id: &Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<ProductPage> {
        let unit_id = unit_id.to_string();
        let query = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
            ("unidadeId", unit_id),
        ];

        let response = self
            .inner
            .get(&self.config.products_url)
            .query(&query)
            .bearer_auth(token.as_str())
            .timeout(self.config.page_timeout)
            .send()
            .map_err(|source| ExportError::PageTransport { page, source })?;
        debug!(status = %response.status(), "products response received");

        if response.status() != StatusCode::OK {
            return Err(ExportError::PageRejected {
                page,
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .map_err(|source| ExportError::PageTransport { page, source })
    }
}
