pub mod auth;
pub mod logging;
pub mod products;

use crate::app_lib::config::DEFAULT_API_BASE_URL;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!(
            "{} - {}",
            env!("CARGO_PKG_VERSION"),
            crate::app_lib::GIT_COMMIT_HASH
        )
        .into_boxed_str(),
    );

    let command = Command::new("catalog")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the catalog API")
                .default_value(DEFAULT_API_BASE_URL)
                .env("CATALOG_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Where the login session is stored (default: ~/.config/catalog/session.json)")
                .env("CATALOG_SESSION_FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds, 0 disables it (default: none)")
                .env("CATALOG_TIMEOUT")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        );

    let command = auth::with_subcommands(command);
    let command = products::with_subcommands(command);
    logging::with_args(command)
}
