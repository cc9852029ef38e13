//! Authoritative UDP DNS responder.
//!
//! Zone Crab answers `A` queries for every name in the current
//! [`DomainTable`][`crate::zone::DomainTable`] with a single authoritative answer record. Each
//! datagram is handled on its own task:
//!
//! 1. [`query::parse`] reads the transaction ID and the first question.
//! 2. [`resolver::resolve`] looks the question name up in a snapshot of the live table.
//! 3. [`response::build_answer`] encodes the response: header with the echoed ID and `QR`/`AA`
//!    set, the echoed question, and one `A` record carrying the configured TTL.
//! 4. The response is sent back to the datagram's source address.
//!
//! E.g. with zone file:
//! ```json
//! { "domains": { "sub.example.com": "10.0.0.5" } }
//! ```
//!
//! and a TTL of 300, a query for `sub.example.com` would return:
//!
//! ```bash
//! ❯ dig @127.0.0.1 -p 5353 sub.example.com +noall +answer
//! sub.example.com.	300	IN	A	10.0.0.5
//! ```
//!
//! Requests that fail to parse, or whose name isn't in the table, are logged and dropped without
//! a response. Dropping unknown names can be swapped for an authoritative `NXDOMAIN` response with
//! [`Config::nxdomain`][`crate::config::Config::nxdomain`].

pub mod handlers;
pub mod query;
pub mod resolver;
pub mod response;
pub mod server;

use std::fmt::Write;

pub use server::new;

/// Render `data` as rows of 16 hex bytes, each prefixed with its offset.
pub(crate) fn hexdump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3 + data.len() / 16 * 7);
    for (row, chunk) in data.chunks(16).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        // NB: writing to a String can't fail.
        let _ = write!(out, "{:04x}:", row * 16);
        for byte in chunk {
            let _ = write!(out, " {byte:02x}");
        }
    }
    out
}
