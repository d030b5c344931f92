//! Dispatcher
//!
//! Sends a compiled binary program to the device as a single unacknowledged
//! UDP datagram. No retry, no fragmentation handling, no delivery
//! confirmation: the command channel is fire-and-forget by design of the
//! device protocol.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::UdpSocket;
use tracing::debug;

use crate::error::PipelineError;

/// Fire-and-forget sender for compiled program payloads.
#[derive(Debug)]
pub struct Dispatcher {
    socket: UdpSocket,
    target: SocketAddr,
}

impl Dispatcher {
    /// Bind an ephemeral local socket aimed at the device's command port.
    pub async fn bind(target: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        Ok(Self { socket, target })
    }

    /// The device address datagrams are sent to.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Transmit one payload. Returns the number of bytes sent.
    pub async fn send(&self, payload: &[u8]) -> Result<usize, PipelineError> {
        let sent = self
            .socket
            .send_to(payload, self.target)
            .await
            .map_err(PipelineError::Network)?;
        debug!(bytes = sent, target = %self.target, "dispatched program");
        Ok(sent)
    }
}
