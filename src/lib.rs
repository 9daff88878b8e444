mod api;
pub mod commands;
mod config;
mod error;
mod graphql;
pub mod import;
pub mod model;
pub mod report;

pub use api::{CollaboratorApi, GithubApi};
pub use config::{resolve_token, Config};
pub use error::{Error, Result};
