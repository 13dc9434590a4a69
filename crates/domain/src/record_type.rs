use std::fmt;

/// DNS resource record type, identified on the wire by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    TXT,
    /// Any other type code, kept verbatim.
    Unknown(u16),
}

impl RecordType {
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::TXT => 16,
            RecordType::Unknown(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::TXT => "TXT",
            RecordType::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Unknown(code) => write!(f, "TYPE{}", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}
