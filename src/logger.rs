use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, debug};

use crate::error::{AppError, AppResult};

/// Routes `log` records to stdout as `[<time> - <level>] <message>`.
pub fn initialize(level: LevelFilter, colored: bool) -> AppResult<()> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .level(level)
        // Keep dependency chatter out unless tracing everything.
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .format(move |out, message, record| {
            let date = humantime::format_rfc3339_seconds(SystemTime::now());
            if colored {
                out.finish(format_args!(
                    "[{date} - {level}] {message}",
                    level = colors.color(record.level()),
                ))
            } else {
                out.finish(format_args!(
                    "[{date} - {level}] {message}",
                    level = record.level(),
                ))
            }
        })
        .chain(std::io::stdout())
        .apply()
        .map_err(|err| AppError::Configuration(format!("failed to initialize logger: {err}")))?;

    debug!("Logger initialized: level={level}");
    Ok(())
}
