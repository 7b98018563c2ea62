//! Tests for the TCP channel
//!
//! These tests verify:
//! - Newline framing and delivery order on a real socket
//! - Channel lifecycle events: opened, drained, closed
//! - Teardown joins the writer thread from any state
//! - Connection failures surface as channel errors

use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::thread;

use crossbeam::channel::unbounded;

use wearlog::channel::{ChannelEvent, MessageChannel, TcpChannel};
use wearlog::WearlogError;

// =============================================================================
// Framing and Delivery
// =============================================================================

#[test]
fn test_messages_arrive_newline_framed_in_order() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (events_tx, events_rx) = unbounded();

    let mut channel = TcpChannel::connect(&addr, events_tx).unwrap();
    channel.send("123456,1,58").unwrap();
    channel.send("1001,61,1,2,3,-1,-2,-3").unwrap();
    drop(channel); // flushes the outbox, then closes the socket

    let (stream, _) = listener.accept().unwrap();
    let lines: Vec<String> = BufReader::new(stream)
        .lines()
        .map(|line| line.unwrap())
        .collect();
    assert_eq!(lines, vec!["123456,1,58", "1001,61,1,2,3,-1,-2,-3"]);

    let events: Vec<ChannelEvent> = events_rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            ChannelEvent::Opened,
            ChannelEvent::Drained,
            ChannelEvent::Drained,
            ChannelEvent::Closed,
        ]
    );
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn test_teardown_wakes_an_idle_writer() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (events_tx, events_rx) = unbounded();

    let mut channel = TcpChannel::connect(&addr, events_tx).unwrap();
    channel.send("123456,1,58").unwrap();

    // Let the writer flush the outbox and go back to waiting for work
    while channel.buffered_amount() > 0 {
        thread::yield_now();
    }
    drop(channel); // must wake the waiting writer and join it

    let (stream, _) = listener.accept().unwrap();
    let mut lines = BufReader::new(stream).lines();
    assert_eq!(lines.next().unwrap().unwrap(), "123456,1,58");
    assert!(lines.next().is_none()); // socket closed by the teardown

    let events: Vec<ChannelEvent> = events_rx.try_iter().collect();
    assert_eq!(events.first(), Some(&ChannelEvent::Opened));
    assert_eq!(events.last(), Some(&ChannelEvent::Closed));
}

#[test]
fn test_teardown_without_traffic_completes() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    // The writer may be anywhere between startup and its first wait when
    // the channel goes away; teardown must reach the join either way
    for _ in 0..32 {
        let (events_tx, events_rx) = unbounded();
        let channel = TcpChannel::connect(&addr, events_tx).unwrap();
        drop(channel);
        assert_eq!(events_rx.try_iter().last(), Some(ChannelEvent::Closed));
    }
}

// =============================================================================
// Connect Failures
// =============================================================================

#[test]
fn test_connect_failure_is_a_channel_error() {
    // Bind to learn a free port, then close it again
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let (events_tx, events_rx) = unbounded();
    let result = TcpChannel::connect(&addr, events_tx);
    assert!(matches!(result, Err(WearlogError::Channel(_))));
    assert!(events_rx.try_iter().next().is_none());
}
