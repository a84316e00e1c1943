use std::{env, io::Write, path::PathBuf};

use chrono::Utc;
use env_logger::Builder;
use log::LevelFilter;

use crate::HOME;

/// Logs to stderr. `RUST_LOG` wins over `debug`; without it only this crate
/// and the `swiss` binary log below the warning level.
pub fn init_logger(debug: bool, systemd: bool) {
    let mut builder = Builder::new();

    if systemd {
        builder.format(|formatter, record| {
            writeln!(formatter, "[{}]: {}", record.level(), record.args())
        });
    } else {
        builder.format(|formatter, record| {
            writeln!(
                formatter,
                "{} {:5} {}: {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.module_path().unwrap_or_else(|| record.target()),
                record.args()
            )
        });
    }

    if let Ok(var) = env::var("RUST_LOG") {
        builder.parse_filters(&var);
    } else {
        let level = if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        builder
            .filter(None, LevelFilter::Warn)
            .filter_module("swiss_tournament", level)
            .filter_module("swiss", level);
    }

    builder.init();
}

/// The per-user data folder, or the working directory if there is none.
#[must_use]
pub fn data_folder() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join(HOME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_folder_ends_in_home() {
        let folder = data_folder();
        assert!(folder.ends_with(HOME) || folder == PathBuf::from("."));
    }
}
