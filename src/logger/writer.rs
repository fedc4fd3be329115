//! Log file sink

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Open the configured log file, creating parent directories as needed.
///
/// `Mutex<File>` is a `MakeWriter`, so the result plugs straight into a
/// `fmt` layer.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<Mutex<File>, LoggerError> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| LoggerError::io(parent, e))?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    let file = options
        .open(&config.path)
        .map_err(|e| LoggerError::io(&config.path, e))?;
    Ok(Mutex::new(file))
}
