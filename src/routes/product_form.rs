//! Product form shared by the create and edit views: field values, validation
//! rules, touched state and the submission routine.

use crate::{
    app_lib::{
        validation::{check_min, check_text, Touched, Violation},
        AppError,
    },
    features::products::{Category, Product, ProductPayload},
    routes::{Redirect, Route},
};
use std::future::Future;
use tracing::{error, info};

pub const DEFAULT_CURRENCY: &str = "GBP";
const ERROR_SEPARATOR: &str = " • ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProductField {
    Name,
    Description,
    Price,
    Currency,
    Category,
    StockQuantity,
    ImageUrl,
}

impl ProductField {
    pub const ALL: [ProductField; 7] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::Price,
        ProductField::Currency,
        ProductField::Category,
        ProductField::StockQuantity,
        ProductField::ImageUrl,
    ];

    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::Currency => "currency",
            ProductField::Category => "category",
            ProductField::StockQuantity => "stockQuantity",
            ProductField::ImageUrl => "imageUrl",
        }
    }
}

/// Values bound to the product form. `currency` is shown to the user but is
/// never submitted.
#[derive(Clone, Debug)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: String,
    pub category: Option<Category>,
    pub stock_quantity: Option<i64>,
    pub image_url: String,
    touched: Touched<ProductField>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: None,
            currency: DEFAULT_CURRENCY.to_string(),
            category: None,
            stock_quantity: None,
            image_url: String::new(),
            touched: Touched::default(),
        }
    }
}

impl ProductForm {
    /// Prefills the form from an existing product. A category outside the
    /// known set is left empty so the form asks for one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: Some(product.price),
            category: product.known_category(),
            stock_quantity: Some(product.stock_quantity),
            image_url: product.image_url.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn violation(&self, field: ProductField) -> Option<Violation> {
        match field {
            ProductField::Name => check_text(&self.name, Some(2)),
            ProductField::Description => check_text(&self.description, Some(10)),
            ProductField::Price => check_min(self.price, 0.01),
            ProductField::Currency => None,
            ProductField::Category => self.category.is_none().then_some(Violation::Required),
            #[allow(clippy::cast_precision_loss)]
            ProductField::StockQuantity => check_min(self.stock_quantity.map(|q| q as f64), 0.0),
            ProductField::ImageUrl => check_text(&self.image_url, None),
        }
    }

    /// Violation to display inline: only for touched fields.
    #[must_use]
    pub fn visible_error(&self, field: ProductField) -> Option<Violation> {
        if self.touched.is_touched(field) {
            self.violation(field)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        ProductField::ALL
            .iter()
            .all(|field| self.violation(*field).is_none())
    }

    pub fn touch(&mut self, field: ProductField) {
        self.touched.touch(field);
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.mark_all(&ProductField::ALL);
    }

    #[must_use]
    pub fn is_touched(&self, field: ProductField) -> bool {
        self.touched.is_touched(field)
    }

    /// Submission body for a valid form. Currency is dropped here.
    #[must_use]
    pub fn payload(&self) -> Option<ProductPayload> {
        if !self.is_valid() {
            return None;
        }

        Some(ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price?,
            category: self.category?,
            stock_quantity: self.stock_quantity?,
            image_url: self.image_url.clone(),
        })
    }
}

/// Submission feedback shown next to the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormStatus {
    pub is_submitting: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed locally; every field is now touched and nothing was sent.
    Invalid,
    /// The form cannot be submitted yet (the product it edits is not loaded).
    NotReady,
    /// Saved; navigate once the redirect delay has passed.
    Saved { product: Product, redirect: Redirect },
    /// The request failed; `FormStatus::error_message` says why.
    Failed,
}

pub(crate) struct FormMessages {
    pub success: &'static str,
    pub failure: &'static str,
}

/// Message for a failed save: the joined field messages of a structured
/// validation error, otherwise `fallback`.
pub(crate) fn failure_message(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Validation(errors) if !errors.is_empty() => errors.join(ERROR_SEPARATOR),
        _ => fallback.to_string(),
    }
}

/// Validates the form and, when valid, sends its payload through `send`.
pub(crate) async fn submit_product<F, Fut>(
    form: &mut ProductForm,
    status: &mut FormStatus,
    messages: &FormMessages,
    send: F,
) -> SubmitOutcome
where
    F: FnOnce(ProductPayload) -> Fut,
    Fut: Future<Output = Result<Product, AppError>>,
{
    let Some(payload) = form.payload() else {
        form.mark_all_touched();
        return SubmitOutcome::Invalid;
    };

    status.is_submitting = true;
    status.success_message = None;
    status.error_message = None;

    let result = send(payload).await;
    status.is_submitting = false;

    match result {
        Ok(product) => {
            info!(id = ?product.id, "product saved");
            status.success_message = Some(messages.success.to_string());
            SubmitOutcome::Saved {
                product,
                redirect: Redirect::delayed(Route::Home),
            }
        }
        Err(err) => {
            error!("Failed to save product: {err}");
            status.error_message = Some(failure_message(&err, messages.failure));
            SubmitOutcome::Failed
        }
    }
}
