//! Search domain - the SerpApi client shared by the travel tools.

mod client;

pub use client::{SearchError, SerpApiClient};
