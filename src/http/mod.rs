//! HTTP client module
//!
//! Thin reqwest wrapper shared by the GraphQL client and the downloader.
//!
//! # Features
//!
//! - **Fixed timeouts**: every call fails hard once its timeout elapses
//! - **Status classification**: non-2xx responses become `Error::HttpStatus`
//! - **Optional pacing**: token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
