pub const MAIN_WINDOW_LABEL: &str = "main";
pub const MAIN_WINDOW_WIDTH: f64 = 800.0;
pub const MAIN_WINDOW_HEIGHT: f64 = 600.0;
pub const MAIN_WINDOW_INITIAL_TITLE: &str = "Atom Shell";
pub const WINDOW_TITLE_PREFIX: &str = "Atom Shell - ";

pub const INDEX_FILE: &str = "index.html";
pub const BUNDLED_APP_DIR: &str = "default_app";

pub const SHELL_SCHEME: &str = "shell";

pub const APP_DIR_ENV: &str = "ATOM_SHELL_APP_DIR";
pub const LOG_PATH_ENV: &str = "ATOM_SHELL_LOG_PATH";
pub const SHELL_LOG_FILE: &str = "shell.log";
pub const SHELL_HOME_DIR: &str = ".atom-shell";
