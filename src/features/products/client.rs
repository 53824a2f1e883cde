//! Client wrappers for the product API. Every call is a single request with
//! no caching; errors are returned untouched so views decide what to show.

use crate::{
    app_lib::{AppError, ApiClient},
    features::products::types::{Category, ListParams, Page, Product, ProductPayload},
};
use secrecy::SecretString;
use tracing::instrument;

const PRODUCTS: [&str; 2] = ["api", "products"];

#[derive(Clone, Debug)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Returns a client that authenticates with `token` when present.
    #[must_use]
    pub fn with_token(&self, token: Option<SecretString>) -> Self {
        Self {
            api: self.api.with_bearer(token),
        }
    }

    /// Lists products page by page, sorted by `params.sort_by`.
    ///
    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self))]
    pub async fn list(&self, params: &ListParams) -> Result<Page<Product>, AppError> {
        let url = self.api.endpoint(
            &PRODUCTS,
            &[
                ("page", params.page.to_string()),
                ("size", params.size.to_string()),
                ("sortBy", params.sort_by.clone()),
            ],
        )?;
        self.api.get_json(url).await
    }

    /// Full-text search over products.
    ///
    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str, page: u32, size: u32) -> Result<Page<Product>, AppError> {
        let url = self.api.endpoint(
            &[PRODUCTS[0], PRODUCTS[1], "search"],
            &[
                ("keyword", keyword.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )?;
        self.api.get_json(url).await
    }

    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category: Category,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, AppError> {
        let url = self.api.endpoint(
            &[PRODUCTS[0], PRODUCTS[1], "category", category.as_str()],
            &[("page", page.to_string()), ("size", size.to_string())],
        )?;
        self.api.get_json(url).await
    }

    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Product, AppError> {
        let id = id.to_string();
        let url = self.api.endpoint(&[PRODUCTS[0], PRODUCTS[1], &id], &[])?;
        self.api.get_json(url).await
    }

    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, AppError> {
        let url = self.api.endpoint(&PRODUCTS, &[])?;
        self.api.post_json(url, payload).await
    }

    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product, AppError> {
        let id = id.to_string();
        let url = self.api.endpoint(&[PRODUCTS[0], PRODUCTS[1], &id], &[])?;
        self.api.put_json(url, payload).await
    }

    /// # Errors
    /// Returns the `AppError` of the failed request.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let id = id.to_string();
        let url = self.api.endpoint(&[PRODUCTS[0], PRODUCTS[1], &id], &[])?;
        self.api.delete(url).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app_lib::AppConfig;
    use anyhow::Result;
    use serde_json::{json, Value};
    use std::{net::TcpListener, path::PathBuf};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    pub(crate) fn api_for(server: &MockServer) -> Result<ApiClient> {
        let config = AppConfig::new(
            Some(&server.uri()),
            Some(PathBuf::from("unused.json")),
            None,
        )?;
        Ok(ApiClient::new(&config)?)
    }

    /// Client pointed at a closed port, for tests that must not reach a server.
    pub(crate) fn offline_api() -> Result<ApiClient> {
        let config = AppConfig::new(
            Some("http://127.0.0.1:9"),
            Some(PathBuf::from("unused.json")),
            None,
        )?;
        Ok(ApiClient::new(&config)?)
    }

    pub(crate) fn product_json(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "A sturdy product for testing",
            "price": 12.5,
            "category": "Books",
            "stockQuantity": 3,
            "imageUrl": "https://img.example/p.png"
        })
    }

    pub(crate) fn page_json(products: Vec<Value>, number: u32, total_pages: u32) -> Value {
        let total = products.len();
        json!({
            "content": products,
            "totalElements": total,
            "totalPages": total_pages,
            "number": number,
            "size": 8,
            "last": number + 1 >= total_pages
        })
    }

    fn sample_payload() -> ProductPayload {
        ProductPayload {
            name: "Novel".to_string(),
            description: "A long and winding story".to_string(),
            price: 9.99,
            category: Category::Books,
            stock_quantity: 10,
            image_url: "https://img.example/novel.png".to_string(),
        }
    }

    #[tokio::test]
    async fn list_sends_default_paging() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .and(query_param("page", "0"))
            .and(query_param("size", "8"))
            .and(query_param("sortBy", "id"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![product_json(1, "Novel")], 0, 1)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(api_for(&server)?);
        let page = client.list(&ListParams::default()).await?;
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, "Novel");
        Ok(())
    }

    #[tokio::test]
    async fn search_and_category_use_their_paths() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products/search"))
            .and(query_param("keyword", "lamp"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 2, 3)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/category/Books"))
            .and(query_param("page", "0"))
            .and(query_param("size", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(api_for(&server)?);
        let found = client.search("lamp", 2, 8).await?;
        assert_eq!(found.number, 2);
        let books = client.list_by_category(Category::Books, 0, 8).await?;
        assert!(books.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_posts_payload_without_currency() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(header("authorization", "Bearer admin-token"))
            .and(body_json(json!({
                "name": "Novel",
                "description": "A long and winding story",
                "price": 9.99,
                "category": "Books",
                "stockQuantity": 10,
                "imageUrl": "https://img.example/novel.png"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(product_json(7, "Novel")))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(api_for(&server)?)
            .with_token(Some(SecretString::from("admin-token".to_string())));
        let created = client.create(&sample_payload()).await?;
        assert_eq!(created.id, Some(7));
        Ok(())
    }

    #[tokio::test]
    async fn update_get_and_delete_address_the_id() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(7, "Novel")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(7, "Novel")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(api_for(&server)?);
        let updated = client.update(7, &sample_payload()).await?;
        assert_eq!(updated.id, Some(7));
        let fetched = client.get_by_id(7).await?;
        assert_eq!(fetched, updated);
        client.delete(7).await?;
        Ok(())
    }

    #[tokio::test]
    async fn missing_product_surfaces_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products/404"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Product not found"))
            .mount(&server)
            .await;

        let client = CatalogClient::new(api_for(&server)?);
        let err = client.get_by_id(404).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        Ok(())
    }
}
