//! Telemetry Receiver
//!
//! A concurrent loop that receives the device's performance datagrams and
//! forwards the decoded frame rate to the surface through the engine's
//! message channel. It never touches surface-owned state directly.
//!
//! Each datagram is ASCII decimal text of one floating-point value. After
//! forwarding a reading the loop pauses one second; this throttles display
//! updates only — datagrams arriving during the pause sit in the OS socket
//! buffer and are read afterwards, not dropped at this layer.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::messages::EngineMessage;

/// Pause between forwarded readings.
pub const DISPLAY_THROTTLE: Duration = Duration::from_secs(1);

/// Receive loop for device frame-rate datagrams.
#[derive(Debug)]
pub struct TelemetryReceiver {
    socket: UdpSocket,
    tx: mpsc::Sender<EngineMessage>,
}

impl TelemetryReceiver {
    /// Bind the wildcard address on the telemetry port.
    pub async fn bind(port: u16, tx: mpsc::Sender<EngineMessage>) -> io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        Ok(Self { socket, tx })
    }

    /// The bound local address (the port is ephemeral in tests).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Run until the message channel closes. Malformed datagrams are logged
    /// and skipped without the throttle pause.
    pub async fn run(self) {
        let mut buf = [0u8; 1024];
        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(err) => {
                    warn!(error = %err, "telemetry receive failed");
                    continue;
                }
            };

            let Some(fps) = decode_fps(&buf[..len]) else {
                warn!(%peer, len, "discarding malformed telemetry datagram");
                continue;
            };

            debug!(fps, "device frame rate");
            if self.tx.send(EngineMessage::Telemetry { fps }).await.is_err() {
                // Surface gone; nothing left to report to.
                return;
            }
            tokio::time::sleep(DISPLAY_THROTTLE).await;
        }
    }
}

/// Decode one telemetry payload as a floating-point reading.
fn decode_fps(payload: &[u8]) -> Option<f64> {
    std::str::from_utf8(payload).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii_float() {
        assert_eq!(decode_fps(b"59.7"), Some(59.7));
        assert_eq!(decode_fps(b" 60 \n"), Some(60.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(decode_fps(b"fps=60"), None);
        assert_eq!(decode_fps(&[0xff, 0xfe]), None);
        assert_eq!(decode_fps(b""), None);
    }

    #[tokio::test]
    async fn forwards_reading_over_channel() {
        let (tx, mut rx) = mpsc::channel(8);
        let receiver = TelemetryReceiver::bind(0, tx).await.expect("bind");
        let addr = receiver.local_addr().expect("local addr");
        tokio::spawn(receiver.run());

        let sender = UdpSocket::bind("127.0.0.1:0").await.expect("bind sender");
        sender
            .send_to(b"42.5", ("127.0.0.1", addr.port()))
            .await
            .expect("send");

        let msg = rx.recv().await.expect("telemetry message");
        match msg {
            EngineMessage::Telemetry { fps } => assert_eq!(fps, 42.5),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_datagram_is_skipped() {
        let (tx, mut rx) = mpsc::channel(8);
        let receiver = TelemetryReceiver::bind(0, tx).await.expect("bind");
        let addr = receiver.local_addr().expect("local addr");
        tokio::spawn(receiver.run());

        let sender = UdpSocket::bind("127.0.0.1:0").await.expect("bind sender");
        sender
            .send_to(b"not-a-number", ("127.0.0.1", addr.port()))
            .await
            .expect("send garbage");
        sender
            .send_to(b"30", ("127.0.0.1", addr.port()))
            .await
            .expect("send reading");

        let msg = rx.recv().await.expect("telemetry message");
        assert!(matches!(msg, EngineMessage::Telemetry { fps } if fps == 30.0));
    }
}
