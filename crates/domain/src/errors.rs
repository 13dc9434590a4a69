use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid DoH endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("DoH request to {url} failed: {cause}")]
    Transport { url: String, cause: String },

    #[error("Got HTTP error from resolver: {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to decode DoH response: {cause}")]
    Decode { cause: String },

    #[error("Invalid multiaddr: {0}")]
    InvalidMultiaddr(String),

    #[error("DNS lookup for {name} failed: {cause}")]
    Lookup { name: String, cause: String },
}

impl DomainError {
    /// HTTP status carried by a protocol error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            DomainError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}
