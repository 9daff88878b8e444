//! Types and a client for the subset of Github's v3 REST and v4 GraphQL APIs
//! used to manage repository collaborators.
//! https://docs.github.com/en/rest
//! https://docs.github.com/en/graphql

pub mod client;
mod repo;
mod user;

pub use client::Client;
pub use repo::*;
pub use user::*;
