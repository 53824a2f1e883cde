use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Account email")
        .env("CATALOG_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("CATALOG_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Log in and store the session")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create an account and store the session")
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Remove the stored session"))
        .subcommand(Command::new(CMD_WHOAMI).about("Show the stored session"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [("CATALOG_EMAIL", None::<&str>), ("CATALOG_PASSWORD", None)],
            || {
                let matches = with_subcommands(Command::new("catalog")).get_matches_from([
                    "catalog",
                    "login",
                    "-e",
                    "ana@shop.example",
                    "-p",
                    "secret1",
                ]);
                let login = matches.subcommand_matches(CMD_LOGIN);
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(ARG_EMAIL)).cloned(),
                    Some("ana@shop.example".to_string())
                );
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(ARG_PASSWORD)).cloned(),
                    Some("secret1".to_string())
                );
            },
        );
    }

    #[test]
    fn test_password_from_env() {
        temp_env::with_vars(
            [
                ("CATALOG_EMAIL", Some("bo@shop.example")),
                ("CATALOG_PASSWORD", Some("secret1")),
            ],
            || {
                let matches = with_subcommands(Command::new("catalog"))
                    .get_matches_from(["catalog", "register", "--name", "Bo"]);
                let register = matches.subcommand_matches(CMD_REGISTER);
                assert_eq!(
                    register.and_then(|m| m.get_one::<String>(ARG_PASSWORD)).cloned(),
                    Some("secret1".to_string())
                );
            },
        );
    }

    #[test]
    fn test_register_requires_name() {
        temp_env::with_vars(
            [
                ("CATALOG_EMAIL", Some("bo@shop.example")),
                ("CATALOG_PASSWORD", Some("secret1")),
            ],
            || {
                let result = with_subcommands(Command::new("catalog"))
                    .try_get_matches_from(["catalog", "register"]);
                assert!(result.is_err());
            },
        );
    }
}
