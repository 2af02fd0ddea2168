use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

use crate::{
    append_shell_log, page_title, MainWindowState, ProtocolRegistry, MAIN_WINDOW_HEIGHT,
    MAIN_WINDOW_INITIAL_TITLE, MAIN_WINDOW_LABEL, MAIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MainWindowOptions {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

pub(crate) fn main_window_options() -> MainWindowOptions {
    MainWindowOptions {
        width: MAIN_WINDOW_WIDTH,
        height: MAIN_WINDOW_HEIGHT,
    }
}

/// Lets the webview follow `url` only when its scheme is handled.
///
/// Before the registry is managed nothing is blocked.
pub(crate) fn navigation_allowed<F>(registry: Option<&ProtocolRegistry>, url: &Url, log: F) -> bool
where
    F: Fn(&str),
{
    let Some(registry) = registry else {
        return true;
    };

    let allowed = registry.is_safe_redirect_target(url.as_str());
    if !allowed {
        log(&format!("blocked navigation to unhandled scheme: {url}"));
    }
    allowed
}

/// Creates the process's single window and points it at `document_url`.
pub(crate) fn create_main_window(
    app_handle: &AppHandle,
    document_url: Url,
) -> Result<WebviewWindow, String> {
    let state = app_handle.state::<MainWindowState>();
    state.try_claim()?;

    let options = main_window_options();
    let navigation_handle = app_handle.clone();
    let built = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(document_url.clone()),
    )
    .title(MAIN_WINDOW_INITIAL_TITLE)
    .inner_size(options.width, options.height)
    .on_navigation(move |url| {
        let registry = navigation_handle.try_state::<ProtocolRegistry>();
        navigation_allowed(registry.as_deref(), url, append_shell_log)
    })
    .on_document_title_changed(|window, title| {
        page_title::dispatch_page_title_updated(&window, title, append_shell_log);
    })
    .build();

    match built {
        Ok(window) => {
            append_shell_log(&format!(
                "main window created: {}x{} url={}",
                options.width, options.height, document_url
            ));
            Ok(window)
        }
        Err(error) => {
            state.release();
            Err(format!("Failed to create main window: {error}"))
        }
    }
}

pub(crate) fn focus_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("focus_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}
