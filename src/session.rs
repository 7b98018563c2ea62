//! Session Controller
//!
//! The state machine driving the device: maps control actions and
//! timer/channel events onto the recorder and the transfer engine.
//!
//! ## Phases
//! ```text
//!           primary             primary               primary
//!   idle ───────────► recording ───────► readyToSend ───────► sending
//!    ▲                                                           │
//!    └───────────────────────────────────────────────────────────┘
//!                     transfer complete (or abort)
//! ```
//!
//! ## Responsibilities
//! - Enforce the phase invariant: recorder and transfer engine are never
//!   active at the same time
//! - Own the periodic tasks (sample tick, watchdog flush)
//! - Apply the error policy: a failure ends the in-progress operation,
//!   never the session loop
//!
//! ## Concurrency Model: One Mailbox, One Consumer
//!
//! Ticker threads, the control surface, and the channel writer all post
//! [`Event`]s into a single mailbox; the session thread is the only one
//! that touches the recorder, the transfer engine, or the phase. No
//! locks around session state.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use crossbeam::channel::{Receiver, Sender};

use crate::channel::{ChannelEvent, MessageChannel};
use crate::config::Config;
use crate::error::Result;
use crate::profile::UserProfile;
use crate::recorder::Recorder;
use crate::row;
use crate::schedule::PeriodicTask;
use crate::sensors::{HeartRateMonitor, MotionSensor};
use crate::store::{self, LogReader};
use crate::transfer::{DrainStatus, TransferEngine};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing active; primary action starts a recording
    Idle,

    /// Recorder ticking; primary action stops and prepares to send
    Recording,

    /// Log complete and closed; primary action begins the transfer
    ReadyToSend,

    /// Transfer engine draining; completion returns to idle
    Sending,
}

/// Everything that can land in the session mailbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Primary control action, cycling record / stop / send
    ControlPrimary,

    /// Secondary control action: inspect the current log (idle only)
    ControlSecondary,

    /// Sample timer fired
    Tick,

    /// Watchdog timer fired
    Watchdog,

    /// Channel lifecycle notification
    Channel(ChannelEvent),

    /// Exit the session loop
    Shutdown,
}

/// Button-to-components state machine for one device session
pub struct SessionController {
    config: Config,
    profile: UserProfile,
    phase: Phase,

    /// Current dated log file; refreshed at every recording start
    log_path: PathBuf,

    recorder: Recorder,
    transfer: TransferEngine,
    channel: Box<dyn MessageChannel>,

    /// Mailbox sender handed to periodic tasks
    events_tx: Sender<Event>,

    /// Sample ticker, alive only while recording
    tick_task: Option<PeriodicTask>,

    /// Watchdog flusher, alive from session start until the recording
    /// phase ends, re-armed on every new recording
    watchdog_task: Option<PeriodicTask>,
}

impl SessionController {
    /// Create a session in the idle phase
    ///
    /// Ensures the data directory exists, points at today's log file so
    /// inspection works before the first recording, and arms the watchdog
    /// safety net.
    pub fn new(
        config: Config,
        profile: UserProfile,
        accel: Box<dyn MotionSensor>,
        gyro: Box<dyn MotionSensor>,
        heart: Box<dyn HeartRateMonitor>,
        channel: Box<dyn MessageChannel>,
        events_tx: Sender<Event>,
    ) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let log_path = store::log_file_path(&config.data_dir, Local::now().date_naive());
        let recorder = Recorder::new(accel, gyro, heart);
        let transfer = TransferEngine::new(config.send_watermark);

        let mut controller = Self {
            config,
            profile,
            phase: Phase::Idle,
            log_path,
            recorder,
            transfer,
            channel,
            events_tx,
            tick_task: None,
            watchdog_task: None,
        };
        controller.arm_watchdog()?;

        tracing::info!("Session created, log file {}", controller.log_path.display());
        Ok(controller)
    }

    /// Pump the mailbox until shutdown
    ///
    /// Returns after [`Event::Shutdown`], tearing the session down first.
    pub fn run(&mut self, events: &Receiver<Event>) {
        tracing::info!("Session loop running");
        for event in events.iter() {
            if matches!(event, Event::Shutdown) {
                break;
            }
            self.handle_event(event);
        }
        self.teardown();
        tracing::info!("Session loop stopped");
    }

    /// Apply one event to the state machine
    ///
    /// Failures are absorbed here per the error policy; the caller never
    /// needs to recover.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ControlPrimary => self.on_primary(),
            Event::ControlSecondary => self.on_secondary(),
            Event::Tick => self.on_tick(),
            Event::Watchdog => self.on_watchdog(),
            Event::Channel(ev) => self.on_channel_event(ev),
            Event::Shutdown => {} // consumed by run()
        }
    }

    // =========================================================================
    // Control Actions
    // =========================================================================

    fn on_primary(&mut self) {
        match self.phase {
            Phase::Idle => self.start_recording(),
            Phase::Recording => self.stop_recording(),
            Phase::ReadyToSend => self.begin_sending(),
            Phase::Sending => tracing::debug!("Control ignored, transfer in progress"),
        }
    }

    fn on_secondary(&mut self) {
        if self.phase != Phase::Idle {
            tracing::debug!("Log inspection is idle-only, ignored");
            return;
        }
        match self.inspect_log() {
            Ok(rows) => tracing::info!("Inspection done, {} rows", rows),
            Err(e) if e.is_not_found() => tracing::info!("No log file recorded yet"),
            Err(e) => tracing::error!("Cannot inspect log: {}", e),
        }
    }

    // =========================================================================
    // Phase Transitions
    // =========================================================================

    /// idle -> recording
    fn start_recording(&mut self) {
        if let Err(e) = self.try_start_recording() {
            tracing::error!("Failed to start recording: {}", e);
            self.cancel_tick();
            if let Err(stop_err) = self.recorder.stop() {
                tracing::warn!("Cleanup after failed start: {}", stop_err);
            }
            self.phase = Phase::Idle;
        }
    }

    fn try_start_recording(&mut self) -> Result<()> {
        // Step 1: Refresh the dated path, reset the file, write the header
        self.log_path = store::log_file_path(&self.config.data_dir, Local::now().date_naive());
        self.recorder.start(&self.log_path, &self.profile)?;

        // Step 2: Schedule the sample tick
        self.tick_task = Some(PeriodicTask::spawn(
            "sample",
            Duration::from_millis(self.config.sample_interval_ms),
            self.events_tx.clone(),
            Event::Tick,
        )?);

        // Step 3: Make sure the watchdog is running for this recording
        self.arm_watchdog()?;

        self.phase = Phase::Recording;
        tracing::info!("Phase: idle -> recording");
        Ok(())
    }

    /// recording -> readyToSend
    fn stop_recording(&mut self) {
        // Cancel timers first so no tick lands mid-close
        self.cancel_tick();
        self.cancel_watchdog();

        if let Err(e) = self.recorder.stop() {
            tracing::error!("Error closing recording: {}", e);
        }

        self.phase = Phase::ReadyToSend;
        tracing::info!(
            "Phase: recording -> readyToSend ({} samples)",
            self.recorder.samples_written()
        );
    }

    /// readyToSend -> sending
    fn begin_sending(&mut self) {
        self.phase = Phase::Sending;
        tracing::info!("Phase: readyToSend -> sending");

        match self.transfer.begin(&self.log_path, self.channel.as_mut()) {
            Ok(DrainStatus::Complete) => self.finish_sending(),
            Ok(DrainStatus::Sending) => {}
            Err(e) if e.is_not_found() || e.is_empty_log() => {
                // A missing or empty file offers nothing to retry
                tracing::error!("Nothing to send: {}", e);
                self.phase = Phase::Idle;
            }
            Err(e) => {
                // Retryable: the next primary action tries again
                tracing::error!("Failed to begin transfer: {}", e);
                self.transfer.abort();
                self.phase = Phase::ReadyToSend;
            }
        }
    }

    /// sending -> idle, the transfer engine's own completion path
    fn finish_sending(&mut self) {
        let (sent, total) = self.transfer.progress();
        self.phase = Phase::Idle;
        tracing::info!("Phase: sending -> idle ({}/{} rows)", sent, total);
    }

    // =========================================================================
    // Timer Events
    // =========================================================================

    fn on_tick(&mut self) {
        if self.phase != Phase::Recording {
            // A tick already queued when the ticker was cancelled
            tracing::trace!("Stale sample tick ignored");
            return;
        }
        if let Err(e) = self.recorder.tick() {
            tracing::error!("Sample append failed: {}", e);
        }
    }

    fn on_watchdog(&mut self) {
        // Harmless whatever the phase: closing an unopened handle is a no-op
        if let Err(e) = self.recorder.flush_and_close() {
            tracing::warn!("Watchdog flush failed: {}", e);
        }
    }

    // =========================================================================
    // Channel Events
    // =========================================================================

    fn on_channel_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Opened => tracing::info!("Channel open"),
            ChannelEvent::Drained => self.on_drained(),
            ChannelEvent::Error(message) => {
                // Transfer stalls in place; recovery is manual
                tracing::warn!("Channel error: {}", message);
            }
            ChannelEvent::Closed => {
                if self.phase == Phase::Sending {
                    tracing::error!("Channel closed mid-transfer, aborting");
                    self.transfer.abort();
                    self.phase = Phase::Idle;
                } else {
                    tracing::debug!("Channel closed");
                }
            }
        }
    }

    fn on_drained(&mut self) {
        if self.phase != Phase::Sending {
            return;
        }
        match self.transfer.continue_sending(self.channel.as_mut()) {
            Ok(DrainStatus::Complete) => self.finish_sending(),
            Ok(DrainStatus::Sending) => {}
            Err(e) => {
                tracing::error!("Transfer failed: {}", e);
                self.transfer.abort();
                self.phase = Phase::Idle;
            }
        }
    }

    // =========================================================================
    // Log Inspection
    // =========================================================================

    /// Walk the current log file and dump its rows to the log output
    ///
    /// Local debugging aid; nothing goes over the channel. Returns the
    /// number of rows seen.
    pub fn inspect_log(&self) -> Result<u64> {
        let size = store::stat(&self.log_path)?;
        let mut reader = LogReader::open(&self.log_path)?;
        let rows = reader.row_count();
        tracing::info!(
            "Log {}: {} bytes, {} rows",
            self.log_path.display(),
            size,
            rows
        );

        if rows > 0 {
            let header = row::decode_header(&reader.read_row_at(0)?)?;
            tracing::info!(
                "Row 0: gender flag {}, resting HR {}, time {}",
                header.gender.flag(),
                header.resting_heart_rate,
                header.timestamp
            );
        }

        for index in 1..rows {
            let sample = row::decode_sample(&reader.read_row_at(index)?)?;
            tracing::debug!(
                "Row {}: time {}, HR {}, accel {},{},{}, gyro {},{},{}",
                index,
                sample.timestamp,
                sample.heart_rate,
                sample.accel_x,
                sample.accel_y,
                sample.accel_z,
                sample.gyro_x,
                sample.gyro_y,
                sample.gyro_z
            );
        }

        Ok(rows)
    }

    // =========================================================================
    // Task Management
    // =========================================================================

    fn arm_watchdog(&mut self) -> Result<()> {
        if self.watchdog_task.is_none() {
            self.watchdog_task = Some(PeriodicTask::spawn(
                "watchdog",
                Duration::from_millis(self.config.watchdog_interval_ms),
                self.events_tx.clone(),
                Event::Watchdog,
            )?);
        }
        Ok(())
    }

    fn cancel_tick(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.cancel();
        }
    }

    fn cancel_watchdog(&mut self) {
        if let Some(task) = self.watchdog_task.take() {
            task.cancel();
        }
    }

    /// Cancel timers, abort any transfer, close the recording if active
    fn teardown(&mut self) {
        self.cancel_tick();
        self.cancel_watchdog();
        self.transfer.abort();

        if self.phase == Phase::Recording {
            if let Err(e) = self.recorder.stop() {
                tracing::warn!("Error closing recording at teardown: {}", e);
            }
        }
        self.phase = Phase::Idle;
        tracing::info!("Session torn down");
    }

    // =========================================================================
    // Accessors (for display and testing)
    // =========================================================================

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Path of this session's log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Transfer progress as (rows sent, rows total)
    pub fn progress(&self) -> (u64, u64) {
        self.transfer.progress()
    }

    /// Sample rows appended in the current or last recording
    pub fn samples_written(&self) -> u64 {
        self.recorder.samples_written()
    }
}
