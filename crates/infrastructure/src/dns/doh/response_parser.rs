//! DoH JSON Response Parser
//!
//! Minimal schema of a JSON DoH answer, see
//! <https://developers.google.com/speed/public-dns/docs/doh/json>.
//! Only `Answer[].Type` and `Answer[].Data` are read; everything else
//! (Status, TC, RD, RA, AD, CD, Question, Comment, TTL, name) is ignored.

use madoh_domain::{DomainError, RecordType};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DohResponse {
    /// `null` and a missing key both mean "no answers"
    #[serde(rename = "Answer", alias = "answer", default)]
    pub answer: Option<Vec<DohAnswer>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DohAnswer {
    /// Standard DNS RR type
    #[serde(rename = "Type", alias = "type")]
    pub record_type: u16,
    /// Record data in presentation format
    #[serde(rename = "Data", alias = "data")]
    pub data: String,
}

impl DohResponse {
    pub fn answers(&self) -> &[DohAnswer] {
        self.answer.as_deref().unwrap_or(&[])
    }

    /// Data of the answers whose type is `record_type`, in upstream order.
    ///
    /// Responses routinely carry other types next to the requested one
    /// (e.g. the CNAME chain leading to an A record).
    pub fn into_matching(self, record_type: RecordType) -> Vec<String> {
        let code = record_type.code();
        self.answer
            .unwrap_or_default()
            .into_iter()
            .filter(|a| a.record_type == code)
            .map(|a| a.data)
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse_bytes(body: &[u8]) -> Result<DohResponse, DomainError> {
        serde_json::from_slice(body).map_err(|e| DomainError::Decode {
            cause: e.to_string(),
        })
    }

    /// Strip the quote characters DoH JSON puts around TXT record data.
    ///
    /// At most one leading and one trailing `"` are removed; anything
    /// inside the value is left alone.
    pub fn unquote_txt(value: &str) -> &str {
        let value = value.strip_prefix('"').unwrap_or(value);
        value.strip_suffix('"').unwrap_or(value)
    }
}
