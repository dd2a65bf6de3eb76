use tracing::{info, warn};
use uuid::Uuid;

use super::{AccessToken, CatalogApi, PageLimits};
use crate::error::ExportError;
use crate::model::Product;

/// Products gathered by [`fetch_all_products`], with the error that stopped
/// pagination early, if any.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub products: Vec<Product>,
    /// Number of pages that were answered successfully.
    pub pages_fetched: u32,
    pub error: Option<ExportError>,
}

/// Walks the products listing from page 1.
///
/// Stops when the server reports `hasNext = false`, returns an empty page,
/// fails a request, or when `limits.max_pages` pages have been read. A failed
/// request or the page bound leaves the products of earlier pages in place and
/// records the error in the outcome.
pub fn fetch_all_products<A: CatalogApi + ?Sized>(
    api: &A,
    token: &AccessToken,
    unit_id: &Uuid,
    limits: &PageLimits,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();
    let mut page = 1;

    loop {
        if page > limits.max_pages {
            warn!(max_pages = limits.max_pages, "page limit reached, stopping");
            outcome.error = Some(ExportError::PageLimitReached {
                max_pages: limits.max_pages,
            });
            break;
        }

        info!("Fetching page {page}...");
        let response = match api.fetch_page(token, unit_id, page, limits.page_size) {
            Ok(response) => response,
            Err(error) => {
                outcome.error = Some(error);
                break;
            }
        };
        outcome.pages_fetched = page;

        if response.items.is_empty() {
            break;
        }
        outcome.products.extend(response.items.into_iter().flatten());

        if !response.has_next {
            break;
        }
        page += 1;
    }

    outcome
}
