pub mod resolve_multiaddr;

pub use resolve_multiaddr::{parse_multiaddr, MultiaddrResolver};
