use crate::cli::{
    actions::{
        auth::{LoginArgs, RegisterArgs},
        products::{CreateArgs, DeleteArgs, EditArgs, ListArgs, ProductFields, ShowArgs},
        Action,
    },
    commands::{auth, products},
    globals::GlobalArgs,
};
use crate::features::products::Category;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("missing required argument: --{id}"))
}

fn product_id(matches: &ArgMatches) -> Result<i64> {
    matches
        .get_one::<i64>(products::ARG_ID)
        .copied()
        .context("missing required argument: <id>")
}

fn product_fields(matches: &ArgMatches) -> ProductFields {
    ProductFields {
        name: matches.get_one::<String>(products::ARG_NAME).cloned(),
        description: matches.get_one::<String>(products::ARG_DESCRIPTION).cloned(),
        price: matches.get_one::<f64>(products::ARG_PRICE).copied(),
        currency: matches.get_one::<String>(products::ARG_CURRENCY).cloned(),
        category: matches.get_one::<Category>(products::ARG_CATEGORY).copied(),
        stock_quantity: matches.get_one::<i64>(products::ARG_STOCK).copied(),
        image_url: matches.get_one::<String>(products::ARG_IMAGE_URL).cloned(),
    }
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::from_matches(matches);

    let Some((name, sub)) = matches.subcommand() else {
        bail!("missing subcommand");
    };

    let action = match name {
        auth::CMD_LOGIN => Action::Login(LoginArgs {
            globals,
            email: required(sub, auth::ARG_EMAIL)?.clone(),
            password: SecretString::from(required(sub, auth::ARG_PASSWORD)?.clone()),
        }),
        auth::CMD_REGISTER => Action::Register(RegisterArgs {
            globals,
            name: required(sub, auth::ARG_NAME)?.clone(),
            email: required(sub, auth::ARG_EMAIL)?.clone(),
            password: SecretString::from(required(sub, auth::ARG_PASSWORD)?.clone()),
        }),
        auth::CMD_LOGOUT => Action::Logout(globals),
        auth::CMD_WHOAMI => Action::Whoami(globals),
        products::CMD_LIST => Action::List(ListArgs {
            globals,
            page: sub.get_one::<u32>(products::ARG_PAGE).copied().unwrap_or(0),
            search: sub.get_one::<String>(products::ARG_SEARCH).cloned(),
            category: sub.get_one::<Category>(products::ARG_CATEGORY).copied(),
        }),
        products::CMD_SHOW => Action::Show(ShowArgs {
            globals,
            id: product_id(sub)?,
        }),
        products::CMD_CREATE => Action::Create(CreateArgs {
            globals,
            fields: product_fields(sub),
        }),
        products::CMD_EDIT => Action::Edit(EditArgs {
            globals,
            id: product_id(sub)?,
            fields: product_fields(sub),
        }),
        products::CMD_DELETE => Action::Delete(DeleteArgs {
            globals,
            id: product_id(sub)?,
            yes: sub.get_flag(products::ARG_YES),
        }),
        other => bail!("unknown subcommand: {other}"),
    };

    Ok(action)
}
