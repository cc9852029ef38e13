use crate::config::Config;
use crate::dns::{query, resolver, response};
use crate::error::Error;
use crate::zone::SharedTable;

/// The per-request pipeline: parse, resolve against the current table snapshot, encode.
#[derive(Clone)]
pub struct Handler {
    table: SharedTable,
    response_ttl: u32,
    nxdomain: bool,
}

impl Handler {
    pub(super) fn new(config: &Config, table: SharedTable) -> Self {
        Handler {
            table,
            response_ttl: config.response_ttl,
            nxdomain: config.nxdomain,
        }
    }

    /// Produce the response datagram for `packet`, or the reason it is dropped.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed datagrams, [`Error::DomainNotFound`] for unknown names
    /// (unless NXDOMAIN responses are enabled), and [`Error::InvalidAddress`] if the table maps the
    /// name to something that isn't an IPv4 address.
    pub fn handle(&self, packet: &[u8]) -> Result<Vec<u8>, Error> {
        let query = query::parse(packet)?;
        let table = self.table.snapshot();
        match resolver::resolve(&query.name, &table) {
            Ok(address) => response::build_answer(&query, address, self.response_ttl),
            Err(Error::DomainNotFound(_)) if self.nxdomain => response::build_nxdomain(&query),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::query::tests::query_bytes;
    use crate::zone::{DomainTable, LiveTable};
    use std::sync::Arc;
    use std::time::Duration;

    fn handler_with(nxdomain: bool, table: DomainTable) -> (Handler, SharedTable) {
        let mut config = Config::new(
            ([127, 0, 0, 1], 0).into(),
            Duration::from_secs(10),
            300,
            "unused.json",
        );
        config.nxdomain = nxdomain;
        let live: SharedTable = Arc::new(LiveTable::new(table));
        (Handler::new(&config, live.clone()), live)
    }

    #[test]
    fn answers_known_name() {
        let (handler, _) = handler_with(
            false,
            DomainTable::from_entries([("sub.example.com", "10.0.0.5")]),
        );
        let response = handler
            .handle(&query_bytes(0x1234, &[b"sub", b"example", b"com"], 1, 1))
            .unwrap();
        assert_eq!(response[..2], [0x12, 0x34]);
        assert_eq!(response[response.len() - 4..], [10, 0, 0, 5]);
    }

    #[test]
    fn drops_unknown_name() {
        let (handler, _) = handler_with(false, DomainTable::from_entries([("example.com", "1.2.3.4")]));
        let err = handler
            .handle(&query_bytes(1, &[b"other", b"com"], 1, 1))
            .unwrap_err();
        assert!(matches!(err, Error::DomainNotFound(ref name) if name == "other.com"));
    }

    #[test]
    fn nxdomain_for_unknown_name_when_enabled() {
        let (handler, _) = handler_with(true, DomainTable::from_entries([("example.com", "1.2.3.4")]));
        let response = handler
            .handle(&query_bytes(1, &[b"other", b"com"], 1, 1))
            .unwrap();
        assert_eq!(response[3] & 0x0f, 3);
    }

    #[test]
    fn malformed_never_reaches_the_table() {
        let (handler, _) = handler_with(true, DomainTable::default());
        let err = handler.handle(&[0x12, 0x34, 0x01]).unwrap_err();
        assert!(matches!(err, Error::MalformedMessage(_)));
    }

    #[test]
    fn invalid_table_address_is_reported() {
        let (handler, _) = handler_with(false, DomainTable::from_entries([("example.com", "1.2.3")]));
        let err = handler
            .handle(&query_bytes(1, &[b"example", b"com"], 1, 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[test]
    fn sees_replaced_table() {
        let (handler, live) = handler_with(false, DomainTable::from_entries([("example.com", "1.2.3.4")]));
        let packet = query_bytes(1, &[b"example", b"com"], 1, 1);
        assert!(handler.handle(&packet).unwrap().ends_with(&[1, 2, 3, 4]));

        live.replace(DomainTable::from_entries([("example.com", "5.6.7.8")]));

        assert!(handler.handle(&packet).unwrap().ends_with(&[5, 6, 7, 8]));
    }
}
