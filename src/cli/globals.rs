use crate::{
    app::App,
    app_lib::{AppConfig, AppError},
};
use std::path::PathBuf;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub timeout: Option<u64>,
}

impl GlobalArgs {
    #[must_use]
    pub fn from_matches(matches: &clap::ArgMatches) -> Self {
        use crate::cli::commands::{ARG_API_URL, ARG_SESSION_FILE, ARG_TIMEOUT};

        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_file: matches.get_one::<PathBuf>(ARG_SESSION_FILE).cloned(),
            timeout: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
        }
    }

    /// # Errors
    /// Returns `AppError::Config` for an invalid API URL.
    pub fn config(&self) -> Result<AppConfig, AppError> {
        AppConfig::new(
            self.api_url.as_deref(),
            self.session_file.clone(),
            self.timeout,
        )
    }

    /// # Errors
    /// Returns `AppError::Config` for an invalid API URL or HTTP client setup.
    pub fn app(&self) -> Result<App, AppError> {
        App::new(&self.config()?)
    }
}
