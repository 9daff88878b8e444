use crate::{api::GithubApi, config::Config, Result};
use log::{info, warn};
use std::path::PathBuf;
use structopt::StructOpt;

mod assign;
mod list;
#[cfg(test)]
mod test_api;

pub use assign::{add_collaborators, remove_collaborators, run_add, run_remove, AssignOptions};
pub use list::{
    collect_repository_permissions, list_collaborators, run_list, CollectedRepositories,
    ListOptions,
};

/// Flags shared by every command for reaching the Github API
#[derive(Debug, StructOpt)]
pub struct ClientOptions {
    #[structopt(short, long)]
    /// GitHub Personal Access Token (default "gh auth token")
    pub token: Option<String>,

    #[structopt(long)]
    /// GitHub Enterprise Server hostname (default "github.com")
    pub hostname: Option<String>,

    #[structopt(short, long)]
    /// To debug logging
    pub debug: bool,

    #[structopt(long, parse(from_os_str))]
    /// TOML file providing defaults for hostname, token and max-pages
    pub config: Option<PathBuf>,
}

impl ClientOptions {
    /// The config file, if any, with the command line flags layered on top.
    pub fn config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        Ok(config.with_overrides(self.hostname.clone(), self.token.clone()))
    }

    pub fn connect(&self, config: &Config) -> Result<GithubApi> {
        let token = config.resolve_token();
        if token.is_none() {
            warn!(
                "no token found for {}, requests will be unauthenticated",
                config.hostname()
            );
        }

        info!("Connecting to {}", config.hostname());
        GithubApi::new(config.hostname(), token.as_deref(), config.max_pages())
    }
}

/// Tally of a batch run. Individual failures are logged as they happen and
/// never stop the batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Items processed: input rows, or collaborators for a report
    pub attempted: usize,
    pub failed: usize,
    /// Report rows written
    pub written: usize,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
