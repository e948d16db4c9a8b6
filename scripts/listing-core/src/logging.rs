//! Logger setup shared by the scripts.
//!
//! Default: `env_logger` on stderr, filter `info` unless `RUST_LOG` says
//! otherwise. With `--debug` or an explicit `--log-file`, detailed logs go to
//! a file instead (RFC 3339 timestamps, debug level).

use std::fs;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Initializes the global logger once. Returns the log file path when file
/// logging is active.
pub fn init(debug: bool, log_file: Option<&Path>, default_file: &Path) -> Option<PathBuf> {
    if !debug && log_file.is_none() {
        init_env_logger();
        return None;
    }
    let log_path = log_file.unwrap_or(default_file).to_path_buf();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match fs::File::create(&log_path) {
        Ok(file) => {
            let cfg = ConfigBuilder::new()
                .set_time_format_rfc3339()
                .set_target_level(LevelFilter::Off)
                .build();
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, cfg, file) {
                eprintln!("[warn] file logger init failed: {e}");
                return None;
            }
            println!("[debug] logs → {:?}", log_path);
            Some(log_path)
        }
        Err(e) => {
            eprintln!("[warn] cannot create log file {:?}: {e}", log_path);
            init_env_logger();
            None
        }
    }
}

fn init_env_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
