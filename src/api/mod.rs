//! Access to the TOTVS WMS REST API.
//!
//! [`CatalogApi`] is the seam between the export run and the network: the
//! production implementation is [`client::WmsClient`], built on a blocking
//! `reqwest` client, and the pagination loop in [`pagination`] only ever talks
//! to the trait.

pub mod client;
pub mod pagination;

use std::time::Duration;

use uuid::Uuid;

use crate::error::Result;
use crate::model::ProductPage;

pub use client::WmsClient;
pub use pagination::{FetchOutcome, fetch_all_products};

/// Default OAuth token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://supply.rac.totvs.app/totvs.rac/connect/token";
/// Default products listing endpoint.
pub const DEFAULT_PRODUCTS_URL: &str =
    "https://supply.logistica.totvs.app/wms/query/api/v1/produtos";
/// OAuth scope requested with the client-credentials grant.
pub const AUTH_SCOPE: &str = "authorization_api";

pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Client credentials for the OAuth client-credentials flow.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Bearer token obtained for a single run.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Endpoints and timeouts used by [`WmsClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub auth_url: String,
    pub products_url: String,
    pub auth_timeout: Duration,
    pub page_timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            use_system_proxy: true,
        }
    }
}

/// Page size and safety bound for the pagination loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// The two WMS operations an export run needs.
pub trait CatalogApi {
    /// Exchanges client credentials for a bearer token. A successful response
    /// without `access_token` yields an empty token.
    fn acquire_token(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Fetches one 1-based page of the products listing for `unit_id`.
    fn fetch_page(
        &self,
        token: &AccessToken,
        unit_id: &Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<ProductPage>;
}
