//! Minimal client for the GitHub user search API.

mod client;
pub mod domain;
mod github_url;

pub use client::*;
pub use domain::*;
pub use github_url::*;
