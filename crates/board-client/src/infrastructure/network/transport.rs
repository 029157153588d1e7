//! Datagram transport abstraction.
//!
//! [`UdpTransport`] is a thin wrapper around `tokio::net::UdpSocket` that
//! sends raw datagrams to one server address and waits a bounded time for
//! the next datagram.  All protocol logic lives in the channel; this module
//! owns only byte I/O.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time;
use tracing::{debug, trace};

use crate::application::board_service::RequestError;

/// Largest datagram the transport will receive.
const MAX_DATAGRAM: usize = 65_535;

/// Sends datagrams to a fixed peer and receives with a deadline.
#[async_trait]
pub trait DatagramTransport: Send + Sync {
    /// Sends one datagram to the server.
    async fn send(&self, datagram: &[u8]) -> io::Result<()>;

    /// Waits up to `wait` for the next datagram.
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    async fn recv_timeout(&self, wait: Duration) -> io::Result<Option<Vec<u8>>>;
}

/// A UDP socket bound to an ephemeral local port, talking to one server.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    server: SocketAddr,
}

impl UdpTransport {
    /// Resolves `host:port` and binds a socket of the matching address family.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Configuration`] if the host cannot be resolved
    /// or the socket cannot be opened.
    pub async fn bind(host: &str, port: u16) -> Result<Self, RequestError> {
        let server = lookup_host((host, port))
            .await
            .map_err(|source| RequestError::Configuration {
                detail: format!("could not resolve server address {host}:{port}"),
                source: Some(source),
            })?
            .next()
            .ok_or_else(|| {
                RequestError::configuration(format!("no address found for {host}:{port}"))
            })?;

        let local: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| RequestError::Configuration {
                detail: "could not open datagram socket".to_string(),
                source: Some(source),
            })?;

        debug!(
            local = ?socket.local_addr().ok(),
            %server,
            "datagram socket ready"
        );
        Ok(Self { socket, server })
    }

    /// The resolved server address.
    pub fn server_addr(&self) -> SocketAddr {
        self.server
    }

    /// The ephemeral local address the OS assigned.
    ///
    /// # Errors
    ///
    /// Propagates the OS error if the address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

#[async_trait]
impl DatagramTransport for UdpTransport {
    async fn send(&self, datagram: &[u8]) -> io::Result<()> {
        self.socket.send_to(datagram, self.server).await?;
        Ok(())
    }

    async fn recv_timeout(&self, wait: Duration) -> io::Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        match time::timeout(wait, self.socket.recv_from(&mut buf)).await {
            Err(_elapsed) => Ok(None),
            Ok(Ok((n, from))) => {
                trace!(%from, len = n, "datagram received");
                buf.truncate(n);
                Ok(Some(buf))
            }
            Ok(Err(e)) => Err(e),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
