//! Client log settings
//!
//! Logs are diagnostics for the person running the client; toasts and command
//! output are separate and unaffected by these settings.

use clap::Args;

/// Crates of the HTTP stack, capped at `warn` unless named explicitly in the
/// level directive.
const HTTP_STACK: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Log line format on stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    #[default]
    Compact,

    /// One JSON object per event, for piping into a collector.
    Json,
}

/// Logging settings of the storefront client.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive, e.g. `debug` or `storefront_app=trace`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives: the configured level followed by a `warn` cap for
    /// each HTTP stack crate the level does not mention.
    pub fn directives(&self) -> String {
        let level = self.log_level.trim();
        let mut directives = vec![level.to_owned()];

        directives.extend(
            HTTP_STACK
                .into_iter()
                .filter(|target| !level.contains(&format!("{target}=")))
                .map(|target| format!("{target}=warn")),
        );

        directives.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str) -> LoggingConfig {
        LoggingConfig {
            log_level: log_level.to_owned(),
            log_format: LogFormat::default(),
        }
    }

    #[test]
    fn http_stack_is_capped_at_warn() {
        assert_eq!(
            config("debug").directives(),
            "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"
        );
    }

    #[test]
    fn explicit_http_stack_directive_wins() {
        assert_eq!(
            config("info,reqwest=debug").directives(),
            "info,reqwest=debug,hyper=warn,hyper_util=warn,rustls=warn"
        );
    }
}
