#![allow(dead_code)]


pub use doh_server_mock::{MockDohServer, RecordedRequest};
