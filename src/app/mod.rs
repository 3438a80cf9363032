// src/app/mod.rs
mod issuer;

pub use issuer::{issue, ConfigSource, IssueReport, IssueRequest};
