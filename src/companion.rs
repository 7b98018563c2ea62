//! Companion Receiver
//!
//! Passive sink for transferred logs: accepts device connections, reads
//! newline-framed text messages, counts and logs them. It never writes
//! back; acknowledgement and retry are out of scope for the protocol.
//!
//! ## Architecture
//! - Single acceptor loop
//! - One handler thread per device connection

use std::io::{BufRead, BufReader};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use crate::error::Result;

/// Line-oriented TCP receiver for the companion side
pub struct CompanionServer {
    listener: TcpListener,
}

impl CompanionServer {
    /// Bind the listening socket
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        tracing::info!("Companion listening on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    /// Actual bound address (useful when binding port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever
    ///
    /// Each device connection gets its own handler thread; an accept
    /// failure is logged and the loop keeps serving.
    pub fn run(&self) -> Result<()> {
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = thread::Builder::new()
                        .name("companion-conn".to_string())
                        .spawn(move || handle_connection(stream))
                    {
                        tracing::warn!("Failed to spawn connection handler: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }
        Ok(())
    }
}

/// Read messages from one device until it disconnects
fn handle_connection(stream: TcpStream) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    tracing::info!("Device connected from {}", peer);

    let reader = BufReader::new(stream);
    let mut rows_received: u64 = 0;

    for line in reader.lines() {
        match line {
            Ok(message) => {
                rows_received += 1;
                tracing::info!("Rcv {}: {}", rows_received, message);
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                tracing::debug!("Connection reset by device {}", peer);
                break;
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::ConnectionAborted => {
                tracing::debug!("Connection aborted by device {}", peer);
                break;
            }
            Err(e) => {
                tracing::warn!("Error reading from {}: {}", peer, e);
                break;
            }
        }
    }

    tracing::info!("Device {} disconnected after {} messages", peer, rows_received);
}
