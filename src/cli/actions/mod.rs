pub mod auth;
pub mod products;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Login(auth::LoginArgs),
    Register(auth::RegisterArgs),
    Logout(GlobalArgs),
    Whoami(GlobalArgs),
    List(products::ListArgs),
    Show(products::ShowArgs),
    Create(products::CreateArgs),
    Edit(products::EditArgs),
    Delete(products::DeleteArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
