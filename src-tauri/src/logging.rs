use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use chrono::{DateTime, Local, SecondsFormat};

use crate::{LOG_PATH_ENV, SHELL_HOME_DIR, SHELL_LOG_FILE};

static SHELL_LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn resolve_shell_log_path(
    path_override: Option<String>,
    home_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = path_override
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return PathBuf::from(path);
    }

    match home_dir {
        Some(home) => home.join(SHELL_HOME_DIR).join("logs").join(SHELL_LOG_FILE),
        None => env::temp_dir().join(SHELL_HOME_DIR).join(SHELL_LOG_FILE),
    }
}

pub(crate) fn shell_log_path() -> &'static Path {
    SHELL_LOG_PATH.get_or_init(|| {
        resolve_shell_log_path(env::var(LOG_PATH_ENV).ok(), home::home_dir())
    })
}

fn format_log_line(timestamp: DateTime<Local>, message: &str) -> String {
    format!(
        "[{}] [shell] {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
        message
    )
}

pub(crate) fn append_log_line(path: &Path, line: &str) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

pub(crate) fn append_shell_log(message: &str) {
    let line = format_log_line(Local::now(), message);
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }
    if let Err(error) = append_log_line(shell_log_path(), &line) {
        eprintln!("{error}");
    }
}
