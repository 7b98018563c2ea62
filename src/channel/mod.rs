//! Channel Module
//!
//! Flow-controlled message channel to the companion receiver.
//!
//! ## Architecture
//! - Session thread queues text messages into an outbox
//! - A writer thread drains the outbox onto the socket
//! - Every drained message raises a [`ChannelEvent::Drained`] so the
//!   sender can top the outbox back up
//!
//! The buffered-byte count is the flow-control signal: the transfer
//! engine keeps queueing rows only while the count stays under its
//! watermark, then waits for drain events.

mod tcp;

pub use tcp::TcpChannel;

use crate::error::Result;

/// Lifecycle notifications raised by a channel
///
/// Delivered asynchronously to the session event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Connection established
    Opened,

    /// Buffered amount decreased (one queued message reached the socket)
    Drained,

    /// Socket-level failure; the channel stops sending
    Error(String),

    /// Connection closed
    Closed,
}

/// A point-to-point text message channel
///
/// Messages are queued, not sent inline; [`buffered_amount`] reports the
/// bytes queued but not yet handed to the peer.
///
/// [`buffered_amount`]: MessageChannel::buffered_amount
pub trait MessageChannel: Send {
    /// Queue one message for delivery
    fn send(&mut self, message: &str) -> Result<()>;

    /// Bytes currently queued and unsent
    fn buffered_amount(&self) -> usize;
}
