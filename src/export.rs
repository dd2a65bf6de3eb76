use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::{CatalogApi, Credentials, PageLimits, fetch_all_products};
use crate::error::{ExportError, Result};
use crate::flatten::flatten_products;
use crate::io::excel_write;
use crate::model::OutputRow;

/// Validated input for a single export run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub credentials: Credentials,
    pub unit_id: Uuid,
    pub limits: PageLimits,
}

impl RunRequest {
    /// Checks that every input is present and that the unit id is a UUID.
    /// Surrounding whitespace is ignored.
    pub fn new(client_id: &str, client_secret: &str, unit_id: &str) -> Result<Self> {
        let client_id = required("client id", client_id)?;
        let client_secret = required("client secret", client_secret)?;
        let unit_id = required("unit id", unit_id)?;
        let unit_id = Uuid::parse_str(&unit_id).map_err(|source| ExportError::InvalidUnitId {
            value: unit_id.clone(),
            source,
        })?;

        Ok(Self {
            credentials: Credentials {
                client_id,
                client_secret,
            },
            unit_id,
            limits: PageLimits::default(),
        })
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExportError::MissingInput(field));
    }
    Ok(value.to_string())
}

/// Result of one export run: the rows gathered, in page and record order, and
/// the error that ended the run early, if any.
#[derive(Debug, Default)]
pub struct RunReport {
    pub rows: Vec<OutputRow>,
    pub pages_fetched: u32,
    pub error: Option<ExportError>,
}

impl RunReport {
    /// Serialized workbook for the gathered rows, or `None` when there is
    /// nothing to export.
    pub fn workbook(&self) -> Result<Option<Vec<u8>>> {
        if self.rows.is_empty() {
            return Ok(None);
        }
        excel_write::workbook_bytes(&self.rows).map(Some)
    }

    /// Settles the run against the result of exporting its rows, returning
    /// the number of rows on success. The run's own error wins; an export
    /// failure next to it is logged.
    pub fn finish(self, exported: Result<()>) -> Result<usize> {
        match self.error {
            None => exported.map(|()| self.rows.len()),
            Some(run_error) => {
                if let Err(export_error) = exported {
                    error!(%export_error, "failed to export the rows gathered before the run stopped");
                }
                Err(run_error)
            }
        }
    }
}

/// Authenticates, pages through the catalog and flattens every product.
///
/// Authentication failures end the run with no rows. A failing page keeps the
/// rows of the pages before it.
pub fn run_export<A: CatalogApi + ?Sized>(api: &A, request: &RunRequest) -> RunReport {
    let token = match api.acquire_token(&request.credentials) {
        Ok(token) => token,
        Err(error) => {
            return RunReport {
                error: Some(error),
                ..RunReport::default()
            };
        }
    };

    if token.is_empty() {
        warn!("token endpoint returned no access token, nothing to fetch");
        return RunReport::default();
    }

    let outcome = fetch_all_products(api, &token, &request.unit_id, &request.limits);
    let rows = flatten_products(&outcome.products);
    info!(
        pages = outcome.pages_fetched,
        products = outcome.products.len(),
        rows = rows.len(),
        "catalog fetched"
    );

    RunReport {
        rows,
        pages_fetched: outcome.pages_fetched,
        error: outcome.error,
    }
}
