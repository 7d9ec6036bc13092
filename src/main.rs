// PidLog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Timestamp derivation overrides
// 4. Headless report or eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::ui::...` etc.
pub use pidlog::app;
pub use pidlog::core;
pub use pidlog::platform;
pub use pidlog::ui;
pub use pidlog::util;

use crate::core::timebase::{ConversionZone, TimeBase};
use clap::Parser;
use std::path::PathBuf;

/// PidLog - time-window viewer for PID temperature-controller logs.
///
/// Opens a tab-separated controller log and shows the records inside a
/// selectable time window as a readout, a dual-axis chart and a table.
#[derive(Parser, Debug)]
#[command(name = "PidLog", version, about)]
struct Cli {
    /// Log file to open (use File > Open if omitted).
    path: Option<PathBuf>,

    /// Year assumed for the yearless wall-clock timestamps.
    #[arg(short = 'y', long = "year", value_parser = clap::value_parser!(i32).range(1970..=2200))]
    year: Option<i32>,

    /// Hours subtracted from the converted wall-clock time.
    #[arg(long = "offset-hours", allow_hyphen_values = true,
          value_parser = clap::value_parser!(i64).range(-14..=14))]
    offset_hours: Option<i64>,

    /// Zone the wall-clock timestamps are read in: local, utc or +HH:MM.
    #[arg(short = 'z', long = "zone", allow_hyphen_values = true)]
    zone: Option<ConversionZone>,

    /// Print the selected view as JSON instead of opening a window.
    #[arg(long = "headless", requires = "path")]
    headless: bool,

    /// Selection start as epoch seconds (headless only; defaults to the first record).
    #[arg(long = "start", requires = "headless", allow_hyphen_values = true)]
    start: Option<i64>,

    /// Selection end as epoch seconds (headless only; defaults to the last record).
    #[arg(long = "end", requires = "headless", allow_hyphen_values = true)]
    end: Option<i64>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    /// Config values overridden by whichever flags were given.
    fn time_base(&self, config: &platform::config::AppConfig) -> TimeBase {
        TimeBase::new(
            self.year.unwrap_or(config.year),
            self.zone.unwrap_or(config.zone),
            self.offset_hours.unwrap_or(config.source_offset_hours),
        )
    }
}

fn main() {
    let cli = Cli::parse();

    // Config is read first so its [logging] level can seed the filter.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_file());

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        headless = cli.headless,
        "PidLog starting"
    );
    for warn in &config_warnings {
        tracing::warn!(warning = %warn, "Config warning");
    }

    let time_base = cli.time_base(&config);
    tracing::debug!(
        year = time_base.year,
        zone = %time_base.zone,
        offset_secs = time_base.source_offset_secs,
        "Timestamp derivation"
    );

    if cli.headless {
        let Some(ref path) = cli.path else {
            eprintln!("Error: --headless requires a log file path");
            std::process::exit(2);
        };
        let stdout = std::io::stdout();
        if let Err(e) = app::headless::run(path, time_base, cli.start, cli.end, stdout.lock()) {
            tracing::error!(error = %e, "Headless run failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let mut state = app::state::AppState::new(time_base, cli.debug);
    state.dark_mode = config.dark_mode;
    state.ui_font_size = config.font_size;
    state.reload_poll_ms = config.reload_poll_ms;
    for warn in config_warnings {
        state.push_warning(warn);
    }
    // Opened on the first frame so load errors land in the UI.
    state.pending_open = cli.path;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_app_id(util::constants::APP_ID)
            .with_inner_size([1100.0, 860.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::PidLogApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch PidLog GUI: {e}");
        std::process::exit(1);
    }
}
