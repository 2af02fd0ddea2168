#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_paths;
mod app_runtime;
mod app_types;
mod logging;
mod main_window;
mod message_relay;
mod page_title;
mod protocol_registry;
mod shell_protocol;

pub(crate) use app_constants::*;
pub(crate) use app_types::MainWindowState;
pub(crate) use logging::append_shell_log;
pub(crate) use protocol_registry::ProtocolRegistry;

fn main() {
    app_runtime::run();
}
