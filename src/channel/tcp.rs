//! TCP channel
//!
//! [`MessageChannel`] over a TCP socket, newline-framed: each queued
//! message goes on the wire as one `\n`-terminated line. A dedicated
//! writer thread owns the socket so queueing never blocks the session
//! loop; drain notifications flow back through a crossbeam channel.

use std::collections::VecDeque;
use std::io::Write;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Sender;
use parking_lot::{Condvar, Mutex};

use crate::error::{Result, WearlogError};
use super::{ChannelEvent, MessageChannel};

/// Outbox state shared between the session thread and the writer thread
struct Outbox {
    /// Messages queued for the socket, oldest first
    queue: Mutex<VecDeque<String>>,

    /// Signalled when the queue gains a message or shutdown is requested
    ready: Condvar,

    /// Bytes queued but not yet written (framed length, newline included)
    buffered: AtomicUsize,

    /// Set on teardown or after a socket error
    shutdown: AtomicBool,
}

/// Message channel over one TCP connection
pub struct TcpChannel {
    outbox: Arc<Outbox>,
    writer: Option<JoinHandle<()>>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpChannel {
    /// Connect to the companion receiver
    ///
    /// Raises [`ChannelEvent::Opened`] on the event channel once the
    /// socket is up, then spawns the writer thread.
    pub fn connect(addr: &str, events: Sender<ChannelEvent>) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| WearlogError::Channel(format!("connect to {}: {}", addr, e)))?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.to_string());

        // Disable Nagle's algorithm so small row messages leave promptly
        stream.set_nodelay(true)?;

        tracing::info!("Channel connected to {}", peer_addr);
        let _ = events.send(ChannelEvent::Opened);

        let outbox = Arc::new(Outbox {
            queue: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
            buffered: AtomicUsize::new(0),
            shutdown: AtomicBool::new(false),
        });

        let writer = {
            let outbox = Arc::clone(&outbox);
            let peer = peer_addr.clone();
            thread::Builder::new()
                .name("channel-writer".to_string())
                .spawn(move || writer_loop(stream, outbox, events, peer))?
        };

        Ok(Self {
            outbox,
            writer: Some(writer),
            peer_addr,
        })
    }
}

impl MessageChannel for TcpChannel {
    fn send(&mut self, message: &str) -> Result<()> {
        if self.outbox.shutdown.load(Ordering::Acquire) {
            return Err(WearlogError::Channel(format!(
                "channel to {} is closed",
                self.peer_addr
            )));
        }

        let mut queue = self.outbox.queue.lock();
        // +1 accounts for the newline frame added on the wire
        self.outbox
            .buffered
            .fetch_add(message.len() + 1, Ordering::AcqRel);
        queue.push_back(message.to_string());
        self.outbox.ready.notify_one();

        Ok(())
    }

    fn buffered_amount(&self) -> usize {
        self.outbox.buffered.load(Ordering::Acquire)
    }
}

impl Drop for TcpChannel {
    fn drop(&mut self) {
        {
            // The writer checks shutdown and parks while holding this
            // lock; storing and notifying under it keeps the wakeup from
            // landing between its check and its wait
            let _queue = self.outbox.queue.lock();
            self.outbox.shutdown.store(true, Ordering::Release);
            self.outbox.ready.notify_one();
        }
        if let Some(writer) = self.writer.take() {
            let _ = writer.join();
        }
    }
}

/// Writer thread body: pop, frame, write, notify
///
/// Exits when shutdown is requested and the queue is drained, or
/// immediately after a socket error.
fn writer_loop(
    mut stream: TcpStream,
    outbox: Arc<Outbox>,
    events: Sender<ChannelEvent>,
    peer: String,
) {
    loop {
        let message = {
            let mut queue = outbox.queue.lock();
            loop {
                if let Some(message) = queue.pop_front() {
                    break message;
                }
                if outbox.shutdown.load(Ordering::Acquire) {
                    drop(queue);
                    tracing::debug!("Channel writer to {} exiting", peer);
                    let _ = events.send(ChannelEvent::Closed);
                    return;
                }
                outbox.ready.wait(&mut queue);
            }
        };

        let mut line = message;
        line.push('\n');

        if let Err(e) = stream.write_all(line.as_bytes()) {
            tracing::warn!("Channel write to {} failed: {}", peer, e);
            outbox.shutdown.store(true, Ordering::Release);
            outbox.buffered.store(0, Ordering::Release);
            let _ = events.send(ChannelEvent::Error(e.to_string()));
            let _ = events.send(ChannelEvent::Closed);
            return;
        }

        outbox.buffered.fetch_sub(line.len(), Ordering::AcqRel);
        let _ = events.send(ChannelEvent::Drained);
    }
}
