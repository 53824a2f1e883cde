use crate::{features::products::Category, routes::DEFAULT_CURRENCY};
use clap::{builder::ValueParser, Arg, ArgAction, ArgGroup, Command};

pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_CREATE: &str = "create";
pub const CMD_EDIT: &str = "edit";
pub const CMD_DELETE: &str = "delete";

pub const ARG_ID: &str = "id";
pub const ARG_PAGE: &str = "page";
pub const ARG_SEARCH: &str = "search";
pub const ARG_CATEGORY: &str = "category";
pub const ARG_NAME: &str = "name";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_PRICE: &str = "price";
pub const ARG_CURRENCY: &str = "currency";
pub const ARG_STOCK: &str = "stock";
pub const ARG_IMAGE_URL: &str = "image-url";
pub const ARG_YES: &str = "yes";

#[must_use]
pub fn validator_category() -> ValueParser {
    ValueParser::from(|value: &str| value.parse::<Category>())
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Product id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

/// Product form fields. `required` is set for create; edit only overrides
/// the fields that are given.
fn form_args(command: Command, required: bool) -> Command {
    command
        .arg(
            Arg::new(ARG_NAME)
                .long("name")
                .help("Product name (at least 2 characters)")
                .required(required),
        )
        .arg(
            Arg::new(ARG_DESCRIPTION)
                .long("description")
                .help("Description (at least 10 characters)")
                .required(required),
        )
        .arg(
            Arg::new(ARG_PRICE)
                .long("price")
                .help("Price, at least 0.01")
                .required(required)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new(ARG_CURRENCY)
                .long("currency")
                .help(format!("Display currency, never sent (default: {DEFAULT_CURRENCY})")),
        )
        .arg(
            Arg::new(ARG_CATEGORY)
                .long("category")
                .help("One of: Electronics, Clothing, Books, Home & Kitchen, Sports, Toys, Beauty, Automotive")
                .required(required)
                .value_parser(validator_category()),
        )
        .arg(
            Arg::new(ARG_STOCK)
                .long("stock")
                .help("Stock quantity, 0 or more")
                .required(required)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_IMAGE_URL)
                .long("image-url")
                .help("Image URL")
                .required(required),
        )
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LIST)
                .about("List products, optionally filtered by keyword or category")
                .arg(
                    Arg::new(ARG_PAGE)
                        .long("page")
                        .help("Zero-based page number")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(ARG_SEARCH)
                        .short('s')
                        .long("search")
                        .help("Search keyword"),
                )
                .arg(
                    Arg::new(ARG_CATEGORY)
                        .short('c')
                        .long("category")
                        .help("Category filter")
                        .value_parser(validator_category()),
                )
                .group(
                    ArgGroup::new("filter")
                        .args([ARG_SEARCH, ARG_CATEGORY])
                        .multiple(false),
                ),
        )
        .subcommand(
            Command::new(CMD_SHOW)
                .about("Show one product")
                .arg(id_arg()),
        )
        .subcommand(form_args(
            Command::new(CMD_CREATE).about("Create a product (admin)"),
            true,
        ))
        .subcommand(form_args(
            Command::new(CMD_EDIT)
                .about("Edit a product (admin)")
                .arg(id_arg()),
            false,
        ))
        .subcommand(
            Command::new(CMD_DELETE)
                .about("Delete a product (admin)")
                .arg(id_arg())
                .arg(
                    Arg::new(ARG_YES)
                        .short('y')
                        .long("yes")
                        .help("Skip the confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
}
