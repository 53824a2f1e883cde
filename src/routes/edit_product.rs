//! Edit-product route (admin-gated). Loads the product named by the route id,
//! prefills the form and submits updates.

use crate::{
    features::products::CatalogClient,
    routes::{
        product_form::{submit_product, FormMessages, FormStatus, ProductForm, SubmitOutcome},
        Route,
    },
};
use tracing::error;

const MESSAGES: FormMessages = FormMessages {
    success: "Product updated successfully!",
    failure: "Failed to update product. Please try again.",
};
const LOAD_FAILED: &str = "Failed to load product.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

pub struct EditProductView {
    catalog: CatalogClient,
    product_id: i64,
    pub form: ProductForm,
    pub status: FormStatus,
    pub state: LoadState,
}

impl EditProductView {
    /// Builds the view and loads the product before returning it.
    pub async fn open(catalog: CatalogClient, product_id: i64) -> Self {
        let mut view = Self {
            catalog,
            product_id,
            form: ProductForm::default(),
            status: FormStatus::default(),
            state: LoadState::Loading,
        };
        view.load().await;
        view
    }

    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.catalog.get_by_id(self.product_id).await {
            Ok(product) => {
                self.form = ProductForm::from_product(&product);
                self.state = LoadState::Ready;
            }
            Err(err) => {
                error!(id = self.product_id, "Failed to load product: {err}");
                self.status.error_message = Some(LOAD_FAILED.to_string());
                self.state = LoadState::Failed;
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state != LoadState::Ready {
            return SubmitOutcome::NotReady;
        }

        let catalog = &self.catalog;
        let id = self.product_id;
        submit_product(&mut self.form, &mut self.status, &MESSAGES, |payload| async move {
            catalog.update(id, &payload).await
        })
        .await
    }

    #[must_use]
    pub fn go_back(&self) -> Route {
        Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        features::products::client::tests::{api_for, can_bind_localhost, product_json},
        routes::ProductField,
    };
    use anyhow::{anyhow, Result};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_product() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(5, "Atlas")))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn open_prefills_the_form() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = server_with_product().await;
        let view = EditProductView::open(CatalogClient::new(api_for(&server)?), 5).await;

        assert_eq!(view.state, LoadState::Ready);
        assert_eq!(view.product_id(), 5);
        assert_eq!(view.form.name, "Atlas");
        assert_eq!(view.form.price, Some(12.5));
        assert_eq!(view.form.currency, "GBP");
        assert!(view.form.is_valid());
        Ok(())
    }

    #[tokio::test]
    async fn load_failure_leaves_view_unusable() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut view = EditProductView::open(CatalogClient::new(api_for(&server)?), 5).await;
        assert_eq!(view.state, LoadState::Failed);
        assert_eq!(view.status.error_message.as_deref(), Some("Failed to load product."));
        assert_eq!(view.submit().await, SubmitOutcome::NotReady);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_edit_sends_nothing() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = server_with_product().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut view = EditProductView::open(CatalogClient::new(api_for(&server)?), 5).await;
        view.form.description.clear();
        assert_eq!(view.submit().await, SubmitOutcome::Invalid);
        assert!(view.form.is_touched(ProductField::ImageUrl));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn update_redirects_after_the_delay() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = server_with_product().await;
        Mock::given(method("PUT"))
            .and(path("/api/products/5"))
            .and(body_json(json!({
                "name": "Atlas of the World",
                "description": "A sturdy product for testing",
                "price": 12.5,
                "category": "Books",
                "stockQuantity": 3,
                "imageUrl": "https://img.example/p.png"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(product_json(5, "Atlas of the World")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut view = EditProductView::open(CatalogClient::new(api_for(&server)?), 5).await;
        view.form.name = "Atlas of the World".to_string();

        let redirect = match view.submit().await {
            SubmitOutcome::Saved { redirect, .. } => redirect,
            other => return Err(anyhow!("expected save, got {other:?}")),
        };
        assert_eq!(
            view.status.success_message.as_deref(),
            Some("Product updated successfully!")
        );

        let early = tokio::time::timeout(Duration::from_millis(1900), redirect.wait()).await;
        assert!(early.is_err(), "redirect completed before the delay");
        assert_eq!(redirect.wait().await, Route::Home);
        Ok(())
    }

    #[tokio::test]
    async fn update_failure_keeps_form_and_reports() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = server_with_product().await;
        Mock::given(method("PUT"))
            .and(path("/api/products/5"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": {
                    "name": "Product name must be between 2 and 100 characters",
                    "stockQuantity": "Stock quantity cannot exceed 100,000"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut view = EditProductView::open(CatalogClient::new(api_for(&server)?), 5).await;
        assert_eq!(view.submit().await, SubmitOutcome::Failed);
        assert_eq!(
            view.status.error_message.as_deref(),
            Some(
                "Product name must be between 2 and 100 characters • Stock quantity cannot exceed 100,000"
            )
        );
        assert_eq!(view.state, LoadState::Ready);
        assert!(!view.status.is_submitting);
        Ok(())
    }
}
