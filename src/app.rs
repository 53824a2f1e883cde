//! Application shell: owns the session context and the catalog client and
//! resolves paths to views, running the admin guard before any view exists.

use crate::{
    app_lib::{ApiClient, AppConfig, AppError},
    features::{
        auth::{require_admin, FileStorage, GuardDecision, Session, SessionStorage},
        products::CatalogClient,
    },
    routes::{
        CreateProductView, EditProductView, LoginView, Navbar, ProductListView, RegisterView,
        Route,
    },
};
use tracing::debug;

/// The view shown for a resolved route.
pub enum View {
    ProductList(ProductListView),
    Login(LoginView),
    Register(RegisterView),
    CreateProduct(CreateProductView),
    EditProduct(EditProductView),
}

impl View {
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            View::ProductList(_) => Route::Home,
            View::Login(_) => Route::Login,
            View::Register(_) => Route::Register,
            View::CreateProduct(_) => Route::CreateProduct,
            View::EditProduct(view) => Route::EditProduct(view.product_id()),
        }
    }
}

pub struct App {
    session: Session,
    catalog: CatalogClient,
}

impl App {
    /// Builds the app with the session persisted at `config.session_file`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_storage(config, FileStorage::new(config.session_file.clone()))
    }

    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn with_storage(
        config: &AppConfig,
        storage: impl SessionStorage + 'static,
    ) -> Result<Self, AppError> {
        let api = ApiClient::new(config)?;
        Ok(Self {
            session: Session::new(api.clone(), storage),
            catalog: CatalogClient::new(api),
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn navbar(&self) -> Navbar {
        Navbar::init(&self.session)
    }

    /// Catalog client carrying the current session token.
    #[must_use]
    pub fn catalog(&self) -> CatalogClient {
        self.catalog.with_token(self.session.token())
    }

    /// Final route for `path`: unmatched paths go home and admin routes pass
    /// through the guard.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Route {
        let Some(route) = Route::parse(path) else {
            debug!(path, "unmatched path");
            return Route::Home;
        };

        if !route.requires_admin() {
            return route;
        }
        match require_admin(&self.session) {
            GuardDecision::Allow => route,
            GuardDecision::Redirect(to) => to,
        }
    }

    /// Resolves `path` and builds its view. Views that load data on entry
    /// (list, edit) have loaded by the time this returns.
    pub async fn navigate(&self, path: &str) -> View {
        let route = self.resolve(path);
        debug!(%route, "navigating");
        match route {
            Route::Home => {
                let mut view = ProductListView::new(self.catalog(), self.session.is_admin());
                view.init().await;
                View::ProductList(view)
            }
            Route::Login => View::Login(LoginView::new()),
            Route::Register => View::Register(RegisterView::new()),
            Route::CreateProduct => View::CreateProduct(CreateProductView::new(self.catalog())),
            Route::EditProduct(id) => {
                View::EditProduct(EditProductView::open(self.catalog(), id).await)
            }
        }
    }
}
