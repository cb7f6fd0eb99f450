//! GraphQL transport
//!
//! Every CloudHealth call is a POST of `{query, variables}` to one fixed
//! endpoint. This module owns that envelope, the bearer token, and the
//! operation documents the tools use.

mod client;
pub mod operations;

pub use client::{check_errors, value_at, GraphQlClient, GraphQlRequest};

#[cfg(test)]
mod tests;
