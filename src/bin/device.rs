//! Wearlog Device Binary
//!
//! Runs one device session against a companion receiver. Stdin stands in
//! for the device buttons: an empty line (or `b`) is the primary 3-cycle
//! action, `read` inspects the log, `quit` exits.

use std::io::BufRead;
use std::path::Path;
use std::thread;

use clap::Parser;
use crossbeam::channel::{unbounded, Sender};
use tracing_subscriber::{fmt, EnvFilter};

use wearlog::channel::TcpChannel;
use wearlog::profile::{Gender, UserProfile};
use wearlog::sensors::{SimHeartRate, SimMotion};
use wearlog::session::Event;
use wearlog::{Config, SessionController};

/// Wearlog Device
#[derive(Parser, Debug)]
#[command(name = "wearlog-device")]
#[command(about = "Wearable activity data logger")]
#[command(version)]
struct Args {
    /// Data directory for daily log files
    #[arg(short, long, default_value = "./wearlog_data")]
    data_dir: String,

    /// Companion receiver address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:9760")]
    companion: String,

    /// User profile TOML file (gender, resting heart rate)
    #[arg(short, long)]
    profile: Option<String>,

    /// Sample interval in milliseconds
    #[arg(long, default_value = "5000")]
    sample_interval_ms: u64,

    /// Watchdog flush interval in milliseconds
    #[arg(long, default_value = "25000")]
    watchdog_interval_ms: u64,

    /// Send watermark in bytes (the drain pauses at this buffered amount)
    #[arg(long, default_value = "128")]
    send_watermark: usize,

    /// Override the profile gender
    #[arg(long, value_parser = ["male", "other"])]
    gender: Option<String>,

    /// Override the profile resting heart rate (bpm)
    #[arg(long)]
    resting_heart_rate: Option<u8>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wearlog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Wearlog Device v{}", wearlog::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Companion address: {}", args.companion);

    // Load the user profile, or fall back to defaults
    let mut profile = match &args.profile {
        Some(path) => match UserProfile::load(Path::new(path)) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to load profile: {}", e);
                std::process::exit(1);
            }
        },
        None => UserProfile::default(),
    };

    // Flags override the profile file
    if let Some(gender) = &args.gender {
        profile.gender = if gender == "male" {
            Gender::Male
        } else {
            Gender::Other
        };
    }
    if let Some(bpm) = args.resting_heart_rate {
        profile.resting_heart_rate = Some(bpm);
    }

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .companion_addr(args.companion.as_str())
        .sample_interval_ms(args.sample_interval_ms)
        .watchdog_interval_ms(args.watchdog_interval_ms)
        .send_watermark(args.send_watermark)
        .build();

    // Session mailbox plus a side channel for socket notifications
    let (events_tx, events_rx) = unbounded::<Event>();
    let (channel_tx, channel_rx) = unbounded();

    // Connect to the companion
    let channel = match TcpChannel::connect(&config.companion_addr, channel_tx) {
        Ok(channel) => channel,
        Err(e) => {
            tracing::error!("Cannot reach companion: {}", e);
            std::process::exit(1);
        }
    };

    // Bridge socket notifications into the session mailbox
    {
        let events_tx = events_tx.clone();
        thread::spawn(move || {
            for ev in channel_rx {
                if events_tx.send(Event::Channel(ev)).is_err() {
                    break;
                }
            }
        });
    }

    // Stdin plays the device buttons
    spawn_control_reader(events_tx.clone());

    let mut session = match SessionController::new(
        config,
        profile,
        Box::new(SimMotion::accelerometer()),
        Box::new(SimMotion::gyroscope()),
        Box::new(SimHeartRate::default()),
        Box::new(channel),
        events_tx,
    ) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Controls: Enter/b = record/stop/send cycle, 'read' = inspect log, 'quit' = exit");

    session.run(&events_rx);
    tracing::info!("Device stopped");
}

/// Read control lines from stdin and post them as session events
///
/// Exits on `quit` or stdin EOF, posting a shutdown either way.
fn spawn_control_reader(events: Sender<Event>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };

            let event = match line.trim() {
                "" | "b" => Event::ControlPrimary,
                "read" => Event::ControlSecondary,
                "quit" | "q" => {
                    let _ = events.send(Event::Shutdown);
                    return;
                }
                other => {
                    tracing::warn!("Unknown control '{}' (Enter, read, quit)", other);
                    continue;
                }
            };

            if events.send(event).is_err() {
                return;
            }
        }
        let _ = events.send(Event::Shutdown);
    });
}
