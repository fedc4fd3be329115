//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::{BuildResult, ConfigForm};

/// Posts build status updates to an HTTP status service
#[derive(Parser, Debug)]
#[command(name = "statuses")]
#[command(about = "Posts build status updates to an HTTP status service")]
#[command(long_about = "
statuses posts a one-line status update to an HTTP status service when a
build completes. By default only failures and recoveries are announced.

EXAMPLES:
    # Point the notifier at a status endpoint
    statuses configure --server-url https://status.example.com/api \\
        --user ci-bot --pass s3cret --recipients @team

    # Check the endpoint accepts the stored credentials
    statuses test-connection

    # Report a finished build
    statuses publish --project Project --result FAILURE --previous SUCCESS \\
        --build-path job/Project/42/

    # Use a specific settings file
    statuses --config /etc/statuses/settings.toml show
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file to use instead of the layered `config/` directory
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Settings environment layer (development, test, production)
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update and persist the notifier configuration
    ///
    /// Options left out keep their stored value, except the two checkboxes
    /// (--include-url, --notify-every-build) which are reset on every call.
    /// The value "(Default)" clears a text field.
    Configure {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Label prefixed to every message, e.g. "@team"
        #[arg(long, value_name = "LABEL")]
        recipients: Option<String>,

        /// Append the absolute build URL to each message
        #[arg(long)]
        include_url: bool,

        /// Notify on every build, not only failures and recoveries
        #[arg(long)]
        notify_every_build: bool,

        /// Externally visible base URL of the CI host
        #[arg(long, value_name = "URL")]
        hudson_url: Option<String>,

        /// Whole form as a JSON object, e.g. '{"serverUrl": "...", "includeUrl": true}'
        ///
        /// Takes the place of every other option, STATUSES_PASS included.
        #[arg(
            long,
            value_name = "JSON",
            value_parser = super::validation::parse_form_json,
            conflicts_with_all = ["server_url", "check_ssl", "user", "recipients", "include_url", "notify_every_build", "hudson_url"]
        )]
        form: Option<ConfigForm>,
    },

    /// Check the endpoint accepts the credentials (nothing is saved)
    ///
    /// Options override the stored configuration for this check only.
    TestConnection {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Report a completed build
    Publish {
        /// Project (job) name
        #[arg(long)]
        project: String,

        /// Result of the build, e.g. SUCCESS, UNSTABLE, FAILURE, ABORTED
        #[arg(long, value_name = "RESULT")]
        result: BuildResult,

        /// Result of the build that ran before it, if any
        #[arg(long, value_name = "RESULT")]
        previous: Option<BuildResult>,

        /// Build URL relative to the CI host base URL, e.g. "job/Project/42/"
        #[arg(long, value_name = "PATH", default_value = "")]
        build_path: String,

        /// Job-specific recipients label, overriding the configured one
        #[arg(long, value_name = "LABEL")]
        recipients: Option<String>,
    },

    /// Print the stored configuration (password redacted)
    Show,
}

/// Endpoint and credential options shared by `configure` and `test-connection`
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Status endpoint URL
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Whether the endpoint's TLS certificate should be verified
    #[arg(long, value_name = "BOOL")]
    pub check_ssl: Option<bool>,

    /// Basic auth user
    #[arg(long)]
    pub user: Option<String>,

    /// Basic auth password; prefer STATUSES_PASS over putting it on the command line
    #[arg(long, env = "STATUSES_PASS", hide_env_values = true)]
    pub pass: Option<String>,
}

impl ConnectionArgs {
    /// The options as a configuration form carrying only connection fields
    pub fn to_form(&self) -> ConfigForm {
        ConfigForm {
            server_url: self.server_url.clone(),
            check_ssl: self.check_ssl,
            user: self.user.clone(),
            pass: self.pass.clone(),
            ..Default::default()
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["statuses", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["statuses"]).is_err());
    }

    #[test]
    fn test_configure_command() {
        let cli = Cli::try_parse_from([
            "statuses",
            "configure",
            "--server-url",
            "https://status.example.com/api",
            "--check-ssl",
            "true",
            "--user",
            "ci-bot",
            "--recipients",
            "@team",
            "--include-url",
        ])
        .unwrap();

        let Commands::Configure {
            connection,
            recipients,
            include_url,
            notify_every_build,
            form,
            ..
        } = cli.command
        else {
            panic!("Expected Configure command");
        };
        assert_eq!(connection.server_url.as_deref(), Some("https://status.example.com/api"));
        assert_eq!(connection.check_ssl, Some(true));
        assert_eq!(connection.user.as_deref(), Some("ci-bot"));
        assert_eq!(recipients.as_deref(), Some("@team"));
        assert!(include_url);
        assert!(!notify_every_build);
        assert!(form.is_none());
    }

    #[test]
    fn test_configure_form_conflicts_with_fields() {
        let result = Cli::try_parse_from([
            "statuses",
            "configure",
            "--form",
            r#"{"serverUrl": "https://status.example.com/api"}"#,
            "--include-url",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_publish_command() {
        let cli = Cli::try_parse_from([
            "statuses",
            "publish",
            "--project",
            "Project",
            "--result",
            "failure",
            "--previous",
            "SUCCESS",
            "--build-path",
            "job/Project/42/",
        ])
        .unwrap();

        let Commands::Publish {
            project,
            result,
            previous,
            build_path,
            recipients,
        } = cli.command
        else {
            panic!("Expected Publish command");
        };
        assert_eq!(project, "Project");
        assert_eq!(result, BuildResult::Failure);
        assert_eq!(previous, Some(BuildResult::Success));
        assert_eq!(build_path, "job/Project/42/");
        assert!(recipients.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["statuses", "show", "--verbose", "--env", "prod"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.env, Some(Environment::Production)));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["statuses", "--verbose", "--quiet", "show"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_connection_args_to_form() {
        let args = ConnectionArgs {
            server_url: Some("https://status.example.com/api".to_string()),
            pass: Some("s3cret".to_string()),
            ..Default::default()
        };
        let form = args.to_form();
        assert_eq!(form.server_url, args.server_url);
        assert_eq!(form.pass, args.pass);
        assert_eq!(form.include_url, None);
    }
}
