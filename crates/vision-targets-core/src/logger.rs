//! Stderr logger for the per-frame pipeline.
//!
//! Lines look like `[  1.234s DEBUG vision_targets_solver] message`, where the
//! prefix is the time since installation. Install once at startup with
//! [`init_with_level`]; with the `tracing` feature, [`init_tracing`] installs
//! a `tracing-subscriber` formatter instead.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct FrameLogger {
    level: LevelFilter,
    started: Instant,
}

impl FrameLogger {
    fn format_line(&self, elapsed: f64, record: &Record) -> String {
        let target = record.target();
        let crate_name = target.split("::").next().unwrap_or(target);
        format!(
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            crate_name,
            record.args()
        )
    }
}

impl Log for FrameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_line(self.started.elapsed().as_secs_f64(), record);
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<FrameLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization; the first level wins.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| FrameLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise events up to `default_level` are
/// kept. A subscriber that is already installed is left in place.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(default_level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}

#[cfg(feature = "tracing")]
fn level_directive(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_uses_crate_name_of_target() {
        let logger = FrameLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
        };
        let line = logger.format_line(
            1.5,
            &Record::builder()
                .args(format_args!("edge not found"))
                .level(log::Level::Debug)
                .target("vision_targets_solver::rect")
                .build(),
        );
        assert_eq!(
            line,
            "[  1.500s DEBUG vision_targets_solver] edge not found"
        );
    }

    #[test]
    fn repeated_init_is_a_noop() {
        assert!(init_with_level(LevelFilter::Warn).is_ok());
        assert!(init_with_level(LevelFilter::Trace).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn level_filter_maps_to_env_filter_directive() {
        assert_eq!(level_directive(LevelFilter::Debug), "debug");
        assert_eq!(level_directive(LevelFilter::Off), "off");
        assert!(EnvFilter::try_new(level_directive(LevelFilter::Trace)).is_ok());
    }
}
