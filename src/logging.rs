//! Logger setup for the command-line front end.

use std::io::Write;

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// `LEVEL message`
    #[default]
    Compact,
    /// `LEVEL [target] message`
    Pretty,
}

/// Installs a stderr logger. `RUST_LOG`, when set, overrides `level`.
pub fn init_logger(level: LevelFilter, format: LogFormat) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_env("RUST_LOG")
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| match format {
            LogFormat::Compact => writeln!(buf, "{} {}", level_tag(record.level()), record.args()),
            LogFormat::Pretty => writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            ),
        });

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
