//! Logging setup and structured debug metrics.
//!
//! The library logs through the `log` facade only. Applications and tests that
//! want output call [`init_logging`] once; later calls are no-ops.
//!
//! `log_metric!` emits one structured key/value line at debug level. The
//! `#[cfg(debug_assertions)]` gate compiles it out of release builds.

use crate::error::TensorFrameError;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Once;

/// Logs a structured key-value metric line at debug level, only in debug builds.
///
/// # Example
/// ```ignore
/// log_metric!("event" = "copy_into_typed", "elements" = written);
/// ```
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            log::debug!("TENSORFRAME_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` logger at `level`, printing `[LEVEL] message`.
/// With `log_file`, output is appended to that file instead of stderr.
///
/// Only the first call has any effect. If another logger is already installed
/// the call is silently ignored.
pub fn init_logging(level: LevelFilter, log_file: Option<&str>) -> Result<(), TensorFrameError> {
    let target = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
