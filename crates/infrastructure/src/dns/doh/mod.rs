//! DNS-over-HTTPS backend using the JSON API (`application/dns-json`).

pub mod client;
pub mod request_builder;
pub mod response_parser;

pub use client::{default_doh_client, DohQueryClient};
pub use madoh_domain::config::DEFAULT_DOH_URL;
pub use request_builder::{RequestBuilder, DNS_JSON_CONTENT_TYPE};
pub use response_parser::{DohAnswer, DohResponse, ResponseParser};
