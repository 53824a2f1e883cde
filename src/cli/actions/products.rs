use crate::{
    app::{App, View},
    cli::globals::GlobalArgs,
    features::{
        auth::{require_admin, GuardDecision},
        products::{Category, Product},
    },
    routes::{
        paths, DeleteOutcome, FormStatus, LoadState, ProductField, ProductForm, ProductListView,
        Route, SubmitOutcome,
    },
};
use anyhow::{anyhow, bail, Context, Result};
use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
};
use tracing::debug;

#[derive(Debug)]
pub struct ListArgs {
    pub globals: GlobalArgs,
    pub page: u32,
    pub search: Option<String>,
    pub category: Option<Category>,
}

#[derive(Debug)]
pub struct ShowArgs {
    pub globals: GlobalArgs,
    pub id: i64,
}

/// Form values given on the command line. Unset fields keep the form's
/// current value.
#[derive(Debug, Default)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<Category>,
    pub stock_quantity: Option<i64>,
    pub image_url: Option<String>,
}

impl ProductFields {
    pub fn apply(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = Some(price);
        }
        if let Some(currency) = self.currency {
            form.currency = currency;
        }
        if let Some(category) = self.category {
            form.category = Some(category);
        }
        if let Some(stock) = self.stock_quantity {
            form.stock_quantity = Some(stock);
        }
        if let Some(image_url) = self.image_url {
            form.image_url = image_url;
        }
    }
}

#[derive(Debug)]
pub struct CreateArgs {
    pub globals: GlobalArgs,
    pub fields: ProductFields,
}

#[derive(Debug)]
pub struct EditArgs {
    pub globals: GlobalArgs,
    pub id: i64,
    pub fields: ProductFields,
}

#[derive(Debug)]
pub struct DeleteArgs {
    pub globals: GlobalArgs,
    pub id: i64,
    pub yes: bool,
}

fn denied(view: &View, wanted: &str) -> anyhow::Error {
    match view.route() {
        Route::Login => anyhow!("Please log in as an administrator to open {wanted}"),
        _ => anyhow!("Administrator access required for {wanted}"),
    }
}

/// List one page of products under the requested filter.
/// # Errors
/// Returns an error if the page cannot be loaded.
pub async fn list(args: ListArgs) -> Result<()> {
    let app = args.globals.app()?;
    let mut view = ProductListView::new(app.catalog(), app.session().is_admin());
    view.search_keyword = args.search.unwrap_or_default();
    view.selected_category = args.category;
    view.load_products(args.page).await;

    if let Some(message) = view.load_error.take() {
        bail!(message);
    }
    print!("{}", format_page(&view));
    Ok(())
}

/// # Errors
/// Returns an error if the product cannot be loaded.
pub async fn show(args: ShowArgs) -> Result<()> {
    let app = args.globals.app()?;
    let product = app
        .catalog()
        .get_by_id(args.id)
        .await
        .map_err(|err| anyhow!("Failed to load product {}: {err}", args.id))?;
    print!("{}", format_product(&product));
    Ok(())
}

/// Create a product through the admin-gated create view.
/// # Errors
/// Returns an error if access is denied, the form is invalid or saving fails.
pub async fn create(args: CreateArgs) -> Result<()> {
    let app = args.globals.app()?;
    let path = Route::CreateProduct.path();
    let mut view = match app.navigate(&path).await {
        View::CreateProduct(view) => view,
        other => return Err(denied(&other, &path)),
    };

    args.fields.apply(&mut view.form);
    let outcome = view.submit().await;
    report(outcome, &view.form, &view.status)
}

/// Edit a product through the admin-gated edit view.
/// # Errors
/// Returns an error if access is denied, loading fails, the form is invalid or
/// saving fails.
pub async fn edit(args: EditArgs) -> Result<()> {
    let app = args.globals.app()?;
    let path = paths::edit_product(args.id);
    let mut view = match app.navigate(&path).await {
        View::EditProduct(view) => view,
        other => return Err(denied(&other, &path)),
    };

    if view.state == LoadState::Failed {
        bail!(view.status.error_message.unwrap_or_default());
    }

    args.fields.apply(&mut view.form);
    let outcome = view.submit().await;
    report(outcome, &view.form, &view.status)
}

/// Delete a product after confirmation.
/// # Errors
/// Returns an error if access is denied or the delete fails.
pub async fn delete(args: DeleteArgs) -> Result<()> {
    let app = args.globals.app()?;
    ensure_admin(&app)?;

    let catalog = app.catalog();
    let product = catalog
        .get_by_id(args.id)
        .await
        .map_err(|err| anyhow!("Failed to load product {}: {err}", args.id))?;

    if !args.yes && !confirm(&format!("Delete \"{}\" (#{})?", product.name, args.id))? {
        println!("Cancelled");
        return Ok(());
    }

    let mut view = ProductListView::new(catalog, true);
    view.confirm_delete(product);
    match view.execute_delete().await {
        DeleteOutcome::Deleted => {
            println!("Deleted product #{}", args.id);
            Ok(())
        }
        DeleteOutcome::Failed => bail!(view.delete_error.unwrap_or_default()),
        DeleteOutcome::Skipped => bail!("Product #{} has no id", args.id),
    }
}

fn ensure_admin(app: &App) -> Result<()> {
    match require_admin(app.session()) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Redirect(Route::Login) => {
            bail!("Please log in as an administrator to delete products")
        }
        GuardDecision::Redirect(_) => bail!("Administrator access required to delete products"),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn report(outcome: SubmitOutcome, form: &ProductForm, status: &FormStatus) -> Result<()> {
    match outcome {
        SubmitOutcome::Saved { product, redirect } => {
            debug!(to = %redirect.to, "save complete");
            println!("{}", status.success_message.as_deref().unwrap_or_default());
            print!("{}", format_product(&product));
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let problems: Vec<String> = ProductField::ALL
                .iter()
                .filter_map(|field| {
                    form.visible_error(*field)
                        .map(|violation| format!("{} {violation}", field.as_str()))
                })
                .collect();
            bail!("Invalid product: {}", problems.join(", "))
        }
        SubmitOutcome::NotReady => bail!("Product is not loaded"),
        SubmitOutcome::Failed => bail!(status.error_message.clone().unwrap_or_default()),
    }
}

fn format_product(product: &Product) -> String {
    let mut out = String::new();
    let id = product.id.map(|id| id.to_string()).unwrap_or_default();
    let _ = writeln!(out, "#{id} {}", product.name);
    let _ = writeln!(out, "  category:    {}", product.category);
    let _ = writeln!(out, "  price:       {:.2}", product.price);
    let _ = writeln!(out, "  stock:       {}", product.stock_quantity);
    let _ = writeln!(out, "  image:       {}", product.image_url);
    let _ = writeln!(out, "  description: {}", product.description);
    out
}

fn format_page(view: &ProductListView) -> String {
    let mut out = String::new();
    if view.products.is_empty() {
        let _ = writeln!(out, "No products found");
        return out;
    }

    for product in &view.products {
        let id = product.id.map(|id| id.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{id:>6}  {:<32}  {:>10.2}  {:>5}  {}",
            product.name, product.price, product.stock_quantity, product.category
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} products)",
        view.current_page.saturating_add(1),
        view.total_pages.max(1),
        view.total_elements
    );
    out
}
