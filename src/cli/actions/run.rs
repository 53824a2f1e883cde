use crate::cli::actions::{auth, products, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => auth::login(args).await,
        Action::Register(args) => auth::register(args).await,
        Action::Logout(globals) => auth::logout(&globals),
        Action::Whoami(globals) => auth::whoami(&globals),
        Action::List(args) => products::list(args).await,
        Action::Show(args) => products::show(args).await,
        Action::Create(args) => products::create(args).await,
        Action::Edit(args) => products::edit(args).await,
        Action::Delete(args) => products::delete(args).await,
    }
}
