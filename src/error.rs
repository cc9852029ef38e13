//! Error types.

use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible Zone Crab error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a datagram is shorter than a DNS header, or when a label in the question
    /// section would read past the end of the datagram.
    #[error("malformed DNS message: {0}")]
    MalformedMessage(&'static str),

    /// Returned when a query carries no question, or when the question name is empty (a query
    /// for the root, or labels that hold only non-printable bytes).
    #[error("query has an empty question")]
    EmptyQuestion,

    /// Returned when a datagram is a response, or uses an opcode other than `QUERY`.
    #[error("message is not a standard query")]
    NotAQuery,

    /// Returned when the queried name has no entry in the current
    /// [`DomainTable`][`crate::zone::DomainTable`] snapshot.
    #[error("domain not found: \"{0}\"")]
    DomainNotFound(String),

    /// Returned when a resolved address is not an IPv4 dotted quad.
    #[error("invalid IPv4 address: \"{0}\"")]
    InvalidAddress(String),

    /// Returned by a [`ZoneSource`][`crate::zone::ZoneSource`] when a zone entry maps a domain
    /// to something other than an IPv4 dotted quad.
    #[error("zone entry \"{domain}\" has invalid IPv4 address \"{address}\"")]
    InvalidZoneEntry { domain: String, address: String },

    /// Returned by a [`ZoneSource`][`crate::zone::ZoneSource`] when two zone entries name the
    /// same domain once trailing dots (and, with case folding, case) are ignored.
    #[error("zone has more than one entry for \"{0}\"")]
    DuplicateZoneEntry(String),

    /// Returned when a generic IO error occurs, e.g. reading the zone file or using the UDP
    /// socket.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when the zone file on disk
    /// ([`FileZoneSource`][`crate::zone::file::FileZoneSource`]) is not valid JSON, or doesn't
    /// have the expected shape.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when a YAML zone file is not valid YAML, or doesn't have the expected shape.
    #[error("invalid YAML")]
    InvalidYAML(#[from] serde_yaml::Error),

    /// Returned when a response message can't be encoded.
    #[error("DNS error")]
    DNSError(#[from] ProtoError),
}

