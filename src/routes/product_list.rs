//! Product list route (`/`). Holds the visible page, the active filter and
//! the delete confirmation state.
//!
//! Fetches are numbered. A response is applied only when its number is the
//! latest one issued, so a slow response for an old filter can never
//! overwrite a newer one. Callers that need overlapping fetches drive the
//! three steps (`fetch`, `PendingFetch::send`, `apply`) themselves;
//! `load_products` runs them back to back.

use crate::{
    app_lib::AppError,
    features::products::{CatalogClient, Category, ListParams, Page, Product, DEFAULT_PAGE_SIZE},
};
use tracing::{debug, error, info};

const LOAD_FAILED: &str = "Failed to load products.";
const DELETE_FAILED: &str = "Failed to delete product. Please try again.";

/// Filter mode for a fetch, derived from the keyword and category fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductQuery {
    All,
    Search(String),
    Category(Category),
}

/// A fetch that has been issued but not sent yet.
#[derive(Clone, Debug)]
pub struct PendingFetch {
    pub seq: u64,
    pub page: u32,
    pub query: ProductQuery,
    catalog: CatalogClient,
}

impl PendingFetch {
    pub async fn send(self) -> FetchOutcome {
        let result = match &self.query {
            ProductQuery::All => self.catalog.list(&ListParams::page(self.page)).await,
            ProductQuery::Search(keyword) => {
                self.catalog
                    .search(keyword, self.page, DEFAULT_PAGE_SIZE)
                    .await
            }
            ProductQuery::Category(category) => {
                self.catalog
                    .list_by_category(*category, self.page, DEFAULT_PAGE_SIZE)
                    .await
            }
        };

        FetchOutcome {
            seq: self.seq,
            result,
        }
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<Page<Product>, AppError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No candidate with an id was staged; nothing was sent.
    Skipped,
    Deleted,
    /// The request failed; `delete_error` holds the message.
    Failed,
}

pub struct ProductListView {
    catalog: CatalogClient,
    pub products: Vec<Product>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub is_loading: bool,
    pub is_admin: bool,
    pub search_keyword: String,
    pub selected_category: Option<Category>,
    pub load_error: Option<String>,
    pub delete_error: Option<String>,
    product_to_delete: Option<Product>,
    show_delete_confirm: bool,
    deleting_id: Option<i64>,
    last_issued: u64,
}

impl ProductListView {
    #[must_use]
    pub fn new(catalog: CatalogClient, is_admin: bool) -> Self {
        Self {
            catalog,
            products: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            current_page: 0,
            is_loading: false,
            is_admin,
            search_keyword: String::new(),
            selected_category: None,
            load_error: None,
            delete_error: None,
            product_to_delete: None,
            show_delete_confirm: false,
            deleting_id: None,
            last_issued: 0,
        }
    }

    /// Loads the first page of the unfiltered list.
    pub async fn init(&mut self) {
        self.load_products(0).await;
    }

    /// Current filter mode. A non-blank keyword wins over a category.
    #[must_use]
    pub fn query(&self) -> ProductQuery {
        let keyword = self.search_keyword.trim();
        if !keyword.is_empty() {
            ProductQuery::Search(keyword.to_string())
        } else if let Some(category) = self.selected_category {
            ProductQuery::Category(category)
        } else {
            ProductQuery::All
        }
    }

    /// Issues a fetch for `page` under the current filter and marks the view
    /// as loading. Earlier fetches become stale.
    pub fn fetch(&mut self, page: u32) -> PendingFetch {
        self.last_issued += 1;
        self.is_loading = true;
        let pending = PendingFetch {
            seq: self.last_issued,
            page,
            query: self.query(),
            catalog: self.catalog.clone(),
        };
        debug!(seq = pending.seq, page, query = ?pending.query, "fetch issued");
        pending
    }

    /// Applies a completed fetch. Returns `false` when the outcome is stale
    /// and was dropped.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.last_issued {
            debug!(
                seq = outcome.seq,
                latest = self.last_issued,
                "dropping stale product page"
            );
            return false;
        }

        self.is_loading = false;
        match outcome.result {
            Ok(page) => {
                self.products = page.content;
                self.total_elements = page.total_elements;
                self.total_pages = page.total_pages;
                self.current_page = page.number;
                self.load_error = None;
            }
            Err(err) => {
                error!("Failed to load products: {err}");
                self.load_error = Some(LOAD_FAILED.to_string());
            }
        }
        true
    }

    pub async fn load_products(&mut self, page: u32) {
        let outcome = self.fetch(page).send().await;
        self.apply(outcome);
    }

    pub async fn on_search(&mut self) {
        self.selected_category = None;
        self.load_products(0).await;
    }

    pub async fn on_category_change(&mut self) {
        self.search_keyword.clear();
        self.load_products(0).await;
    }

    pub async fn on_clear_filters(&mut self) {
        self.search_keyword.clear();
        self.selected_category = None;
        self.load_products(0).await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.load_products(page).await;
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Moves one page forward; returns `false` on the last page.
    pub async fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.load_products(self.current_page + 1).await;
        true
    }

    pub async fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.load_products(self.current_page - 1).await;
        true
    }

    pub fn confirm_delete(&mut self, product: Product) {
        self.delete_error = None;
        self.product_to_delete = Some(product);
        self.show_delete_confirm = true;
    }

    pub fn cancel_delete(&mut self) {
        self.product_to_delete = None;
        self.show_delete_confirm = false;
    }

    /// Deletes the staged candidate and reloads the current page. On failure
    /// the candidate is discarded, the dialog closes and `delete_error` is set.
    pub async fn execute_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.product_to_delete.as_ref().and_then(|p| p.id) else {
            return DeleteOutcome::Skipped;
        };

        self.deleting_id = Some(id);
        self.delete_error = None;
        let result = self.catalog.delete(id).await;
        self.deleting_id = None;
        self.product_to_delete = None;
        self.show_delete_confirm = false;

        match result {
            Ok(()) => {
                info!(id, "product deleted");
                self.load_products(self.current_page).await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(id, "Failed to delete product: {err}");
                self.delete_error = Some(DELETE_FAILED.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    #[must_use]
    pub fn product_to_delete(&self) -> Option<&Product> {
        self.product_to_delete.as_ref()
    }

    #[must_use]
    pub fn show_delete_confirm(&self) -> bool {
        self.show_delete_confirm
    }

    #[must_use]
    pub fn deleting_id(&self) -> Option<i64> {
        self.deleting_id
    }

    #[must_use]
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}
