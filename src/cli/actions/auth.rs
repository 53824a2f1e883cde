use crate::{
    app::View,
    cli::globals::GlobalArgs,
    routes::{AuthOutcome, LoginField, RegisterField, Route},
};
use anyhow::{anyhow, bail, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct RegisterArgs {
    pub globals: GlobalArgs,
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

fn label(field: &impl std::fmt::Debug) -> String {
    format!("{field:?}").to_lowercase()
}

fn unexpected(view: &View, wanted: Route) -> anyhow::Error {
    anyhow!("Expected {wanted}, router returned {}", view.route())
}

/// Log in through the login view and print who is signed in.
/// # Errors
/// Returns an error if validation or the login exchange fails.
pub async fn login(args: LoginArgs) -> Result<()> {
    let mut app = args.globals.app()?;
    let mut view = match app.navigate(&Route::Login.path()).await {
        View::Login(view) => view,
        other => return Err(unexpected(&other, Route::Login)),
    };

    view.email = args.email;
    view.password = args.password.expose_secret().to_string();

    match view.submit(app.session_mut()).await {
        AuthOutcome::Success(next) => {
            debug!(%next, "login complete");
            let navbar = app.navbar();
            let role = if navbar.is_admin { "admin" } else { "user" };
            println!("Logged in as {} ({role})", navbar.user_name);
            Ok(())
        }
        AuthOutcome::Invalid => {
            let problems: Vec<String> = LoginField::ALL
                .iter()
                .filter_map(|field| {
                    view.visible_error(*field)
                        .map(|violation| format!("{} {violation}", label(field)))
                })
                .collect();
            bail!("Invalid login: {}", problems.join(", "))
        }
        AuthOutcome::Failed => bail!(view.error_message.unwrap_or_default()),
    }
}

/// # Errors
/// Returns an error if validation or the registration fails.
pub async fn register(args: RegisterArgs) -> Result<()> {
    let mut app = args.globals.app()?;
    let mut view = match app.navigate(&Route::Register.path()).await {
        View::Register(view) => view,
        other => return Err(unexpected(&other, Route::Register)),
    };

    view.name = args.name;
    view.email = args.email;
    view.password = args.password.expose_secret().to_string();

    match view.submit(app.session_mut()).await {
        AuthOutcome::Success(_) => {
            println!("Registered and logged in as {}", app.navbar().user_name);
            Ok(())
        }
        AuthOutcome::Invalid => {
            let problems: Vec<String> = RegisterField::ALL
                .iter()
                .filter_map(|field| {
                    view.visible_error(*field)
                        .map(|violation| format!("{} {violation}", label(field)))
                })
                .collect();
            bail!("Invalid registration: {}", problems.join(", "))
        }
        AuthOutcome::Failed => bail!(view.error_message.unwrap_or_default()),
    }
}

/// # Errors
/// Returns an error if the stored session cannot be removed.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let mut app = globals.app()?;
    let mut navbar = app.navbar();
    let next = navbar.logout(app.session_mut())?;
    debug!(%next, "logout complete");
    println!("Logged out");
    Ok(())
}

/// # Errors
/// Returns an error if the configuration is invalid.
pub fn whoami(globals: &GlobalArgs) -> Result<()> {
    let app = globals.app()?;
    println!("{}", describe_session(&app));
    Ok(())
}

fn describe_session(app: &crate::app::App) -> String {
    let navbar = app.navbar();
    if !navbar.is_logged_in {
        return "Not logged in".to_string();
    }

    let session = app.session();
    let role = session.role().map(|role| role.to_string()).unwrap_or_default();
    format!(
        "{} <{}> [{role}]",
        navbar.user_name,
        session.email().unwrap_or_default()
    )
}
