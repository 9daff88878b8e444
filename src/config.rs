use crate::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::{
    env, fs,
    path::Path,
    process::{Command, Stdio},
};

pub const DEFAULT_HOSTNAME: &str = "github.com";

/// Upper bound on the pages fetched for a single listing
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Optional settings read from a TOML file. Command line flags take
/// precedence over anything set here.
///
/// ```toml
/// hostname = "github.example.com"
/// token = "ghp_..."
/// max-pages = 200
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    hostname: Option<String>,
    token: Option<String>,
    max_pages: Option<usize>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        Self::from_toml(&contents)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        if config.max_pages == Some(0) {
            return Err("max-pages must be greater than zero".into());
        }
        Ok(config)
    }

    /// Layers command line values on top of the file settings.
    pub fn with_overrides(mut self, hostname: Option<String>, token: Option<String>) -> Self {
        if hostname.is_some() {
            self.hostname = hostname;
        }
        if token.is_some() {
            self.token = token;
        }
        self
    }

    pub fn hostname(&self) -> &str {
        self.hostname
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(DEFAULT_HOSTNAME)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages.unwrap_or(DEFAULT_MAX_PAGES)
    }

    /// The configured token, or the ambient credential stored for the host.
    pub fn resolve_token(&self) -> Option<String> {
        match self.token() {
            Some(token) => Some(token.to_owned()),
            None => resolve_token(self.hostname()),
        }
    }
}

/// Looks up a stored credential for `hostname`, first in the environment and
/// then through the `gh` command line tool.
pub fn resolve_token(hostname: &str) -> Option<String> {
    token_from_env(hostname, |key| env::var(key).ok()).or_else(|| token_from_gh_cli(hostname))
}

fn is_github_cloud(hostname: &str) -> bool {
    let host = hostname.trim().to_ascii_lowercase();
    host == DEFAULT_HOSTNAME || host.ends_with(".ghe.com")
}

fn token_from_env<F>(hostname: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let keys: &[&str] = if is_github_cloud(hostname) {
        &["GH_TOKEN", "GITHUB_TOKEN"]
    } else {
        &["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    };

    keys.iter().find_map(|key| {
        let token = lookup(key).filter(|t| !t.trim().is_empty())?;
        debug!("using token from ${}", key);
        Some(token.trim().to_owned())
    })
}

fn token_from_gh_cli(hostname: &str) -> Option<String> {
    let output = Command::new("gh")
        .args(&["auth", "token", "--hostname", hostname])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8(output.stdout).ok()?.trim().to_owned();
    if token.is_empty() {
        None
    } else {
        debug!("using token stored by gh for {}", hostname);
        Some(token)
    }
}
