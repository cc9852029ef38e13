//! Encoding of responses.
//!
//! Responses are assembled as a [`Message`] and encoded with its binary encoder, which writes the
//! answer name as a compression pointer to the question name at offset `0x0c`.

use crate::dns::query::ParsedQuery;
use crate::error::Error;
use std::net::Ipv4Addr;
use trust_dns_proto::op::{Header, Message, MessageType, OpCode, Query, ResponseCode};
use trust_dns_proto::rr::{RData, Record};

/// Encode an authoritative answer to `query` holding a single A record for `address`.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if `address` isn't an IPv4 dotted quad.
///
/// Returns [`Error::DNSError`] if the message can't be encoded.
pub fn build_answer(query: &ParsedQuery, address: &str, ttl: u32) -> Result<Vec<u8>, Error> {
    let address: Ipv4Addr = address
        .parse()
        .map_err(|_| Error::InvalidAddress(address.to_string()))?;
    let mut message = response_to(query, ResponseCode::NoError);
    message.add_answer(Record::from_rdata(
        query.qname.clone(),
        ttl,
        RData::A(address),
    ));
    Ok(message.to_vec()?)
}

/// Encode an authoritative NXDOMAIN response to `query`, with no answer records.
///
/// # Errors
///
/// Returns [`Error::DNSError`] if the message can't be encoded.
pub fn build_nxdomain(query: &ParsedQuery) -> Result<Vec<u8>, Error> {
    Ok(response_to(query, ResponseCode::NXDomain).to_vec()?)
}

fn response_to(query: &ParsedQuery, response_code: ResponseCode) -> Message {
    let mut header = Header::new();
    header
        .set_id(query.id)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_authoritative(true)
        .set_truncated(false)
        .set_recursion_desired(false)
        .set_recursion_available(false)
        .set_response_code(response_code);

    let mut question = Query::query(query.qname.clone(), query.query_type);
    question.set_query_class(query.query_class);

    let mut message = Message::new();
    message.set_header(header).add_query(question);
    message
}
