//! Client configuration

use clap::Args;

pub mod backend;
pub mod logging;
pub mod storage;

pub use backend::BackendConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

/// Storefront client configuration, read from CLI arguments and the
/// environment.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Durable storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Loads `.env` from the working directory, if present.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: StorefrontConfig,
    }

    #[test]
    fn explicit_arguments_are_parsed() -> TestResult {
        let cli = TestCli::try_parse_from([
            "storefront",
            "--backend-url",
            "https://shop.example.com/",
            "--request-timeout-secs",
            "3",
            "--data-dir",
            "/tmp/storefront",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])?;

        assert_eq!(cli.config.backend.backend_url, "https://shop.example.com/");
        assert_eq!(cli.config.backend.request_timeout_secs, 3);
        assert_eq!(cli.config.storage.data_dir.to_str(), Some("/tmp/storefront"));
        assert_eq!(cli.config.logging.log_level, "debug");
        assert!(matches!(cli.config.logging.log_format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = TestCli::try_parse_from(["storefront", "--log-format", "xml"]);

        assert!(result.is_err());
    }
}
