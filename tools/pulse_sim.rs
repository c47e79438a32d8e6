//! Host simulation of the press-to-pulse controller
//!
//! Every line read from stdin counts as one button press. The LED is drawn as
//! a brightness bar whenever its level changes by a tenth. On end of input the
//! simulation waits for a running pulse to finish, then exits.
//!
//! Usage:
//!   cd tools
//!   cargo run --bin pulse-sim -- [--duration-ms <n>] [--exit-on-debug]

use std::io::BufRead;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use palette::Srgb;
use toggle_pulse::{
    DEFAULT_PULSE_DURATION_MS, Edge, PulseConfig, PulseController, PulsingLed, RgbLed,
    RisingEdgeDetector, ServiceTiming, SoftTimer, StdInstant, StdTimeSource, TimeSource,
};

const FRAME_RATE_MS: u64 = 16;

// ============================================================================
// Console logger
// ============================================================================

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the stdout logger. Fails if another logger is already set.
fn install_logger() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

// ============================================================================
// Console LED
// ============================================================================

/// Prints the LED level as a bar, one line per tenth of brightness change
struct ConsoleLed {
    last_decile: Option<u8>,
}

impl ConsoleLed {
    fn new() -> Self {
        Self { last_decile: None }
    }
}

impl RgbLed for ConsoleLed {
    fn set_color(&mut self, color: Srgb) {
        let level = color.red.max(color.green).max(color.blue).clamp(0.0, 1.0);
        let decile = (level * 10.0).round() as u8;
        if self.last_decile == Some(decile) {
            return;
        }
        self.last_decile = Some(decile);

        let bar: String = (0..10)
            .map(|i| if i < decile { '#' } else { '.' })
            .collect();
        println!(
            "LED [{bar}] r={:.2} g={:.2} b={:.2}",
            color.red, color.green, color.blue
        );
    }
}

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "pulse-sim")]
#[command(about = "Host simulation of the press-to-pulse controller", long_about = None)]
struct Args {
    /// Exit immediately without reading input
    #[arg(long)]
    exit_on_debug: bool,

    /// Length of one pulse window in milliseconds
    #[arg(long, default_value_t = DEFAULT_PULSE_DURATION_MS)]
    duration_ms: u64,
}

// ============================================================================
// Main
// ============================================================================

enum Input {
    Press,
    Closed,
}

fn spawn_stdin_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() || tx.send(Input::Press).is_err() {
                break;
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.exit_on_debug {
        return ExitCode::SUCCESS;
    }

    if let Err(e) = install_logger() {
        eprintln!("pulse-sim: logging disabled: {e}");
    }

    let config = match PulseConfig::with_duration_millis(args.duration_ms) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pulse-sim: {e}");
            return ExitCode::FAILURE;
        }
    };

    let time_source = StdTimeSource::new();
    let mut controller = PulseController::new(
        PulsingLed::new(ConsoleLed::new(), &time_source),
        SoftTimer::new(&time_source),
        config,
    );
    let mut detector = RisingEdgeDetector::<StdInstant>::new();
    let inputs = spawn_stdin_reader();
    let mut input_open = true;

    info!("Press Enter to pulse, Ctrl-D to quit");

    loop {
        match inputs.recv_timeout(Duration::from_millis(FRAME_RATE_MS)) {
            Ok(Input::Press) => {
                if let Some(press) = detector.on_edge(Edge::Rising, time_source.now()) {
                    controller.on_press(press);
                }
                // Each line is a full press; release so the next line is a new edge
                detector.on_edge(Edge::Falling, time_source.now());
            }
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => input_open = false,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let timing = controller.service();
        if !input_open && timing == ServiceTiming::Idle {
            break;
        }
        if !input_open {
            thread::sleep(Duration::from_millis(FRAME_RATE_MS));
        }
    }

    info!("Input closed, exiting");
    ExitCode::SUCCESS
}
