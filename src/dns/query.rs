//! Decoding of incoming queries.
//!
//! Only the header and the first question are read. The question name is walked one
//! length-prefixed label at a time until the zero-length root label, with a bounds check before
//! every read, so names of any depth are accepted.

use crate::error::Error;
use trust_dns_proto::rr::{DNSClass, Name, RecordType};

/// Size of the fixed DNS message header.
pub const HEADER_LEN: usize = 12;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

const QR_MASK: u8 = 0b1000_0000;
const OPCODE_MASK: u8 = 0b0111_1000;

/// The parts of a query the responder needs to answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Transaction ID, echoed in the response.
    pub id: u16,
    /// The queried name as text: printable ASCII labels (space included) joined by `.`, without a
    /// trailing dot.
    /// This is the key looked up in the [`DomainTable`][`crate::zone::DomainTable`].
    pub name: String,
    /// The queried name exactly as it appeared on the wire, for echoing the question.
    pub qname: Name,
    pub query_type: RecordType,
    pub query_class: DNSClass,
}

/// Parse the header and first question of `packet`.
///
/// # Errors
///
/// Returns [`Error::MalformedMessage`] if `packet` is shorter than a header, a label runs past the
/// end of `packet`, a label uses a compression pointer or reserved length encoding, the name is
/// longer than 255 bytes, or the type/class fields are missing.
///
/// Returns [`Error::NotAQuery`] if the QR bit is set or the opcode isn't `QUERY`.
///
/// Returns [`Error::EmptyQuestion`] if QDCOUNT is zero, or the name has no printable content.
pub fn parse(packet: &[u8]) -> Result<ParsedQuery, Error> {
    if packet.len() < HEADER_LEN {
        return Err(Error::MalformedMessage("shorter than a DNS header"));
    }

    let id = u16::from_be_bytes([packet[0], packet[1]]);
    if packet[2] & (QR_MASK | OPCODE_MASK) != 0 {
        return Err(Error::NotAQuery);
    }
    if u16::from_be_bytes([packet[4], packet[5]]) == 0 {
        return Err(Error::EmptyQuestion);
    }

    let (labels, offset) = read_labels(packet, HEADER_LEN)?;
    if labels.is_empty() {
        return Err(Error::EmptyQuestion);
    }

    let fixed = packet
        .get(offset..offset + 4)
        .ok_or(Error::MalformedMessage("question type and class are truncated"))?;
    let query_type = RecordType::from(u16::from_be_bytes([fixed[0], fixed[1]]));
    let query_class = DNSClass::from_u16(u16::from_be_bytes([fixed[2], fixed[3]]))
        .map_err(|_| Error::MalformedMessage("unknown question class"))?;

    let name = printable_name(&labels)?;
    let qname = Name::from_labels(labels)
        .map_err(|_| Error::MalformedMessage("question name is not a valid domain name"))?;

    Ok(ParsedQuery {
        id,
        name,
        qname,
        query_type,
        query_class,
    })
}

/// Walk the labels of the name starting at `offset`, returning them (without the root label) and
/// the offset just past the root label.
fn read_labels(packet: &[u8], mut offset: usize) -> Result<(Vec<&[u8]>, usize), Error> {
    let mut labels = Vec::new();
    let mut wire_len = 1;
    loop {
        let len = usize::from(
            *packet
                .get(offset)
                .ok_or(Error::MalformedMessage("question name is truncated"))?,
        );
        offset += 1;
        if len == 0 {
            return Ok((labels, offset));
        }
        if len > MAX_LABEL_LEN {
            return Err(Error::MalformedMessage(
                "question name uses a compressed or reserved label",
            ));
        }
        wire_len += len + 1;
        if wire_len > MAX_NAME_LEN {
            return Err(Error::MalformedMessage("question name is longer than 255 bytes"));
        }
        let label = packet
            .get(offset..offset + len)
            .ok_or(Error::MalformedMessage("question label runs past end of message"))?;
        labels.push(label);
        offset += len;
    }
}

fn printable_name(labels: &[&[u8]]) -> Result<String, Error> {
    let mut name = String::new();
    for label in labels {
        if !name.is_empty() {
            name.push('.');
        }
        let start = name.len();
        name.extend(
            label
                .iter()
                .filter(|&&b| b == b' ' || b.is_ascii_graphic())
                .map(|&b| char::from(b)),
        );
        if name.len() == start {
            return Err(Error::EmptyQuestion);
        }
    }
    Ok(name)
}
