//! Create-product route (admin-gated). Submits a new product and sends the
//! user back to the catalog after a short delay.

use crate::{
    features::products::CatalogClient,
    routes::{
        product_form::{submit_product, FormMessages, FormStatus, ProductForm, SubmitOutcome},
        Route,
    },
};

const MESSAGES: FormMessages = FormMessages {
    success: "Product created successfully!",
    failure: "Failed to create product. Please try again.",
};

pub struct CreateProductView {
    catalog: CatalogClient,
    pub form: ProductForm,
    pub status: FormStatus,
}

impl CreateProductView {
    #[must_use]
    pub fn new(catalog: CatalogClient) -> Self {
        Self {
            catalog,
            form: ProductForm::default(),
            status: FormStatus::default(),
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let catalog = &self.catalog;
        submit_product(&mut self.form, &mut self.status, &MESSAGES, |payload| async move {
            catalog.create(&payload).await
        })
        .await
    }

    #[must_use]
    pub fn go_back(&self) -> Route {
        Route::Home
    }
}
