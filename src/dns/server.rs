use crate::config::SharedConfig;
use crate::dns::handlers::Handler;
use crate::dns::hexdump;
use crate::error::Error;
use crate::zone::SharedTable;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, trace, warn};

/// Largest datagram read from the socket. Anything past this is truncated by the read.
pub const MAX_DATAGRAM_LEN: usize = 512;

/// Owns the UDP socket and runs one task per received datagram.
pub struct Server {
    socket: Arc<UdpSocket>,
    handler: Handler,
}

/// Bind the configured UDP address and prepare a [`Server`] answering from `table`.
///
/// # Errors
///
/// Returns [`Error::IO`] if the socket can't be bound.
pub async fn new(config: SharedConfig, table: SharedTable) -> Result<Server, Error> {
    let socket = UdpSocket::bind(config.dns_udp_bind_addr).await?;
    Ok(Server {
        socket: Arc::new(socket),
        handler: Handler::new(&config, table),
    })
}

impl Server {
    /// The address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the socket address can't be read.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive datagrams forever. Receive errors are logged and the loop carries on. Each datagram
    /// is handled on its own task, so a slow or failing request never holds up the next one.
    /// In-flight tasks are not bounded.
    pub async fn block_until_done(self) {
        loop {
            let mut buf = [0u8; MAX_DATAGRAM_LEN];
            let (len, src) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(err) => {
                    warn!("error receiving DNS request: {err}");
                    continue;
                }
            };
            let packet = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let handler = self.handler.clone();
            tokio::spawn(async move { respond(&handler, &socket, &packet, src).await });
        }
    }
}

async fn respond(handler: &Handler, socket: &UdpSocket, packet: &[u8], src: SocketAddr) {
    let response = match handler.handle(packet) {
        Ok(response) => response,
        Err(err) => {
            warn!("dropped request from {src}: {err}");
            return;
        }
    };
    trace!("response to {src}:\n{}", hexdump(&response));
    match socket.send_to(&response, src).await {
        Ok(_) => debug!("answered {src} ({} bytes)", response.len()),
        Err(err) => warn!("error sending DNS response to {src}: {err}"),
    }
}
