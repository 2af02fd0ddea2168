use std::sync::Arc;

use tauri::{webview::PageLoadEvent, Manager, RunEvent};

use crate::{
    app_paths, append_shell_log, logging, main_window, shell_protocol, MainWindowState,
    ProtocolRegistry, SHELL_SCHEME,
};

pub(crate) fn run() {
    append_shell_log("shell process starting");
    append_shell_log(&format!(
        "shell log path: {}",
        logging::shell_log_path().display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, argv, _cwd| {
            append_shell_log(&format!(
                "second instance launch forwarded to running shell: {argv:?}"
            ));
            main_window::focus_main_window(app_handle, append_shell_log);
        }))
        .manage(MainWindowState::default())
        .manage(ProtocolRegistry::default())
        .register_uri_scheme_protocol(SHELL_SCHEME, |ctx, request| {
            shell_protocol::dispatch_shell_request(ctx.app_handle(), &request)
        })
        .invoke_handler(tauri::generate_handler![
            crate::message_relay::process_message
        ])
        .on_page_load(|_webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                append_shell_log(&format!("page-load started: {}", payload.url()));
            }
            PageLoadEvent::Finished => {
                append_shell_log(&format!("page-load finished: {}", payload.url()));
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            let app_dir = app_paths::resolve_app_dir_for(&app_handle)?;
            append_shell_log(&format!("application directory: {}", app_dir.display()));

            let registry = app_handle.state::<ProtocolRegistry>();
            let file_protocol = Arc::new(shell_protocol::ShellFileProtocol::new(app_dir.clone()));
            if !registry.set_protocol_handler(SHELL_SCHEME, Some(file_protocol)) {
                append_shell_log(&format!(
                    "failed to register {SHELL_SCHEME}:// handler; requests will return 404"
                ));
            }

            let document_url = app_paths::build_index_url(&app_dir)?;
            if let Err(error) = main_window::create_main_window(&app_handle, document_url) {
                append_shell_log(&error);
                return Err(error.into());
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app_handle, event| {
            if let RunEvent::Exit = event {
                append_shell_log("shell process exiting");
            }
        });
}
