//! madoh Infrastructure Layer
//!
//! DNS backends implementing the application's `DnsBackend` port.
pub mod dns;
