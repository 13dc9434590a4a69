use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// A resolved host address, as handed to the multiaddr resolver.
///
/// `ip` is `None` when the upstream answer did not contain a valid IP
/// literal; the value is passed through so the caller decides what to do
/// with bad upstream data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAddress {
    pub ip: Option<IpAddr>,
    pub zone: Option<String>,
}

impl HostAddress {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip: Some(ip), zone: None }
    }

    /// Parses an answer string, keeping unparseable data as an absent IP.
    pub fn parse_lossy(data: &str) -> Self {
        Self {
            ip: IpAddr::from_str(data).ok(),
            zone: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ip.is_some()
    }
}

impl From<IpAddr> for HostAddress {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.ip, &self.zone) {
            (Some(ip), Some(zone)) => write!(f, "{}%{}", ip, zone),
            (Some(ip), None) => write!(f, "{}", ip),
            (None, _) => write!(f, "<invalid>"),
        }
    }
}
