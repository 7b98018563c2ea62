//! # Wearlog
//!
//! An on-device activity data logger with:
//! - Fixed-width binary row format (17 bytes per row)
//! - Append-only log files named per recording date
//! - Flow-controlled transfer to a companion receiver over TCP
//! - Single event-loop concurrency model with watchdog safety net
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Session Controller                         │
//! │            (idle → recording → ready → sending)              │
//! └─────────┬───────────────────┬───────────────────┬───────────┘
//!           │                   │                   │
//!           ▼                   ▼                   ▼
//!    ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//!    │  Recorder   │     │  Transfer   │     │  Schedule   │
//!    │ (sensors →  │     │ (log rows → │     │ (tick +     │
//!    │  log rows)  │     │  messages)  │     │  watchdog)  │
//!    └──────┬──────┘     └──────┬──────┘     └─────────────┘
//!           │                   │
//!           ▼                   ▼
//!    ┌─────────────┐     ┌─────────────┐
//!    │  Log Store  │     │   Channel   │
//!    │  (append /  │     │ (buffered   │
//!    │   random)   │     │  TCP send)  │
//!    └─────────────┘     └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod profile;
pub mod row;
pub mod store;
pub mod sensors;
pub mod channel;
pub mod schedule;
pub mod recorder;
pub mod transfer;
pub mod session;
pub mod companion;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WearlogError};
pub use config::Config;
pub use session::SessionController;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Wearlog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
