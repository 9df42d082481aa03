use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// DNS record type identifier, used for query filtering and translation.
///
/// The set is closed: it covers the record types the `DnsServer` module
/// wrapper knows how to build and decode. Serialized as uppercase strings
/// (`"A"`, `"CNAME"`, `"TXT"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// Canonical name (alias) record.
    Cname,
    /// Text record.
    Txt,
    /// Mail exchange record.
    Mx,
    /// Service locator record.
    Srv,
}

impl RecordType {
    /// The `-RRType` token the `DnsServer` cmdlets expect for this type.
    ///
    /// The casing is part of the external protocol and must not be altered
    /// (the generic record cmdlets spell TXT as `Txt`).
    #[must_use]
    pub fn as_token(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
            Self::Txt => "Txt",
            Self::Mx => "MX",
            Self::Srv => "SRV",
        }
    }

    /// Parse a `RecordType` field token from query output.
    ///
    /// Matching is case-insensitive. Returns `None` for tokens outside the
    /// supported set (`SOA`, `NS`, ...), which the translator skips.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "A" => Some(Self::A),
            "CNAME" => Some(Self::Cname),
            "TXT" => Some(Self::Txt),
            "MX" => Some(Self::Mx),
            "SRV" => Some(Self::Srv),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

// ============ Records ============

/// A DNS resource record as reported by the Windows DNS Server.
///
/// Pure value type; constructed by the result translator when decoding query
/// output and discarded after use. The DNS server itself is the system of
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Zone the record belongs to (e.g., `"example.com"`).
    pub zone: String,
    /// Record name within the zone (e.g., `"www"`).
    pub name: String,
    /// Record type.
    pub record_type: RecordType,
    /// Type-specific value: the IPv4 address for A, the alias target for
    /// CNAME, the descriptive text for TXT.
    pub value: String,
    /// Time to live, if the server reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,
}
