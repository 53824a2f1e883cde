//! Route table and the view models behind each route. A view model holds the
//! state a screen binds to and exposes the screen's operations; it never
//! renders anything itself.

mod create_product;
mod edit_product;
mod login;
mod navbar;
mod product_form;
mod product_list;
mod register;

pub use create_product::CreateProductView;
pub use edit_product::{EditProductView, LoadState};
pub use login::{LoginField, LoginView};
pub use navbar::Navbar;
pub use product_form::{FormStatus, ProductField, ProductForm, SubmitOutcome, DEFAULT_CURRENCY};
pub use product_list::{DeleteOutcome, FetchOutcome, PendingFetch, ProductListView, ProductQuery};
pub use register::{RegisterField, RegisterView};

use std::{fmt, time::Duration};

/// Delay between a successful product save and the redirect to the list, so
/// the success message stays readable.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    CreateProduct,
    EditProduct(i64),
}

impl Route {
    /// Matches a path against the route table. Query strings and fragments are
    /// ignored; `None` means the path is unmatched.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('/');
        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["create-product"] => Some(Route::CreateProduct),
            ["edit-product", id] => id.parse().ok().map(Route::EditProduct),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::CreateProduct => "/create-product".to_string(),
            Route::EditProduct(id) => paths::edit_product(*id),
        }
    }

    #[must_use]
    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::CreateProduct | Route::EditProduct(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.path())
    }
}

pub mod paths {
    #[must_use]
    pub fn edit_product(id: i64) -> String {
        format!("/edit-product/{id}")
    }
}

/// A pending navigation that completes after `after` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

impl Redirect {
    #[must_use]
    pub fn delayed(to: Route) -> Self {
        Self {
            to,
            after: REDIRECT_DELAY,
        }
    }

    /// Waits out the delay and returns the destination.
    pub async fn wait(self) -> Route {
        if !self.after.is_zero() {
            tokio::time::sleep(self.after).await;
        }
        self.to
    }
}

/// Result of submitting a login or register form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Validation failed locally; nothing was sent.
    Invalid,
    /// The session was stored; navigate to the route.
    Success(Route),
    /// The exchange failed; the view shows its fixed message.
    Failed,
}
