//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use catalog_admin_client::{ClientConfig, Trashed};
use catalog_admin_core::DomainResolver;

/// Catalog admin CLI - auth, catalog queries and image management.
#[derive(Parser, Debug)]
#[command(name = "catadmin")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the persisted session token.
    #[arg(long, env = "CATADMIN_STATE_DIR", default_value = ".catadmin")]
    pub state_dir: PathBuf,

    /// Hostname whose backends to use (e.g., admin.novostroy.org).
    #[arg(long, env = "CATADMIN_HOST")]
    pub host: Option<String>,

    /// GraphQL endpoint; overrides the one derived from --host.
    #[arg(long, env = "GRAPHQL_API_URL")]
    pub graphql_url: Option<String>,

    /// Auth API base; overrides the one derived from --host.
    #[arg(long, env = "AUTH_API_URL")]
    pub auth_url: Option<String>,

    /// Send auth calls through the auth proxy served at this origin.
    #[arg(long, env = "CATADMIN_PROXY_ORIGIN")]
    pub proxy_origin: Option<String>,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Log in and persist the session token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "CATADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the session token.
    Logout,
    /// Show the current session.
    Whoami,
    /// Exchange the session token for a fresh one.
    Refresh,
    /// Show the backends a hostname maps to.
    Resolve {
        /// Hostname, optionally with a port.
        host: String,
    },
    /// List rubrics.
    Rubrics {
        /// Soft-delete visibility: WITH, ONLY or WITHOUT.
        #[arg(long)]
        trashed: Option<Trashed>,
    },
    /// List categories, or one rubric's categories.
    Categories {
        /// Rubric slug.
        #[arg(long)]
        rubric_slug: Option<String>,
        /// Soft-delete visibility: WITH, ONLY or WITHOUT.
        #[arg(long, conflicts_with = "rubric_slug")]
        trashed: Option<Trashed>,
    },
    /// Run a GraphQL document from a file.
    Query {
        /// File containing the GraphQL document.
        file: PathBuf,
        /// Variables as a JSON object.
        #[arg(long)]
        vars: Option<String>,
    },
    /// Manage record images.
    #[command(subcommand)]
    Images(ImageCommand),
}

/// Image commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ImageCommand {
    /// List a record's images.
    List {
        /// Backend model name of the record.
        owner_type: String,
        /// Record id.
        owner_id: String,
    },
    /// Upload images for a record.
    Upload {
        /// Backend model name of the record.
        owner_type: String,
        /// Record id.
        owner_id: String,
        /// Image files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete an image.
    Delete {
        /// Image id.
        id: String,
    },
    /// Flip an image's active flag.
    Toggle {
        /// Image id.
        id: String,
    },
}

impl Args {
    /// Path of the token file inside the state directory.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.state_dir.join("storage.json")
    }

    /// Client configuration from `--host` plus the explicit overrides.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = self.host.as_deref().map_or_else(ClientConfig::default, |host| {
            ClientConfig::from_domain(&DomainResolver::default().resolve(host))
        });

        if let Some(url) = &self.graphql_url {
            config.graphql_url.clone_from(url);
        }
        if let Some(url) = &self.auth_url {
            config.auth_api_base.clone_from(url);
        }
        if let Some(origin) = &self.proxy_origin {
            config = config.with_proxy_origin(origin.clone());
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_admin_client::AuthEndpoint;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("catadmin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_login() {
        let args = parse(&["login", "--email", "a@b.com", "--password", "pw"]);
        assert_eq!(
            args.command,
            Command::Login {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
            }
        );
    }

    #[test]
    fn parses_trashed_case_insensitively() {
        let args = parse(&["rubrics", "--trashed", "only"]);
        assert_eq!(args.command, Command::Rubrics { trashed: Some(Trashed::Only) });
    }

    #[test]
    fn rubric_slug_conflicts_with_trashed() {
        let result = Args::try_parse_from([
            "catadmin",
            "categories",
            "--rubric-slug",
            "kitchens",
            "--trashed",
            "WITH",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn upload_needs_files() {
        let result = Args::try_parse_from(["catadmin", "images", "upload", "Model", "1"]);
        assert!(result.is_err());

        let args = parse(&["images", "upload", "Model", "1", "a.png", "b.jpg"]);
        match args.command {
            Command::Images(ImageCommand::Upload { files, .. }) => assert_eq!(files.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_follows_host() {
        let args = parse(&["--host", "admin.novostroy.org", "whoami"]);
        let config = args.client_config();
        assert_eq!(config.graphql_url, "https://crud.novostroy.org/graphql");
        assert_eq!(config.auth_api_base, "https://auth.novostroy.org");
    }

    #[test]
    fn explicit_urls_override_host() {
        let args = parse(&[
            "--host",
            "admin.novostroy.org",
            "--graphql-url",
            "http://127.0.0.1:9000/graphql",
            "--proxy-origin",
            "http://127.0.0.1:3000",
            "whoami",
        ]);
        let config = args.client_config();
        assert_eq!(config.graphql_url, "http://127.0.0.1:9000/graphql");
        assert_eq!(
            config.auth_endpoint(),
            AuthEndpoint::Proxied("http://127.0.0.1:3000".to_string())
        );
    }

    #[test]
    fn token_lives_in_state_dir() {
        let args = parse(&["--state-dir", "/tmp/cat", "logout"]);
        assert_eq!(args.token_path(), PathBuf::from("/tmp/cat/storage.json"));
    }
}
