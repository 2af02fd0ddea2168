use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use percent_encoding::percent_decode_str;
use tauri::{
    http::{header::CONTENT_TYPE, HeaderValue, Request, Response, StatusCode},
    AppHandle, Manager,
};

use crate::{append_shell_log, protocol_registry::ProtocolHandler, ProtocolRegistry, SHELL_SCHEME};

/// Serves files below the application directory over `shell://`.
pub(crate) struct ShellFileProtocol {
    root: PathBuf,
}

impl ShellFileProtocol {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Maps a request path onto the application directory.
    ///
    /// Segments are percent-decoded before they are checked, so encoded
    /// separators or parent references cannot leave the root.
    fn resolve(&self, request_path: &str) -> Result<PathBuf, StatusCode> {
        let mut resolved = self.root.clone();
        for raw_segment in request_path.split('/') {
            let segment = percent_decode_str(raw_segment)
                .decode_utf8()
                .map_err(|_| StatusCode::BAD_REQUEST)?;
            if segment.contains(['/', '\\']) {
                return Err(StatusCode::FORBIDDEN);
            }

            let mut components = Path::new(&*segment).components();
            match (components.next(), components.next()) {
                (None, _) | (Some(Component::CurDir), None) => {}
                (Some(Component::Normal(part)), None) => resolved.push(part),
                _ => return Err(StatusCode::FORBIDDEN),
            }
        }
        Ok(resolved)
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html",
        Some("js" | "mjs") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

fn respond(status: StatusCode, mime_type: &'static str, body: Vec<u8>) -> Response<Vec<u8>> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(mime_type));
    response
}

impl ProtocolHandler for ShellFileProtocol {
    fn handle(&self, request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let path = match self.resolve(request.uri().path()) {
            Ok(path) => path,
            Err(status) => return respond(status, "text/plain", Vec::new()),
        };

        let path = if path.is_dir() {
            path.join(crate::INDEX_FILE)
        } else {
            path
        };

        match fs::read(&path) {
            Ok(bytes) => respond(StatusCode::OK, mime_type_for(&path), bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                respond(StatusCode::NOT_FOUND, "text/plain", Vec::new())
            }
            Err(error) => {
                append_shell_log(&format!(
                    "failed to read {} for {SHELL_SCHEME}:// request: {error}",
                    path.display()
                ));
                respond(StatusCode::INTERNAL_SERVER_ERROR, "text/plain", Vec::new())
            }
        }
    }
}

fn route_shell_request(
    registry: Option<&ProtocolRegistry>,
    request: &Request<Vec<u8>>,
) -> Response<Vec<u8>> {
    let handler = registry.and_then(|registry| registry.get_protocol_handler(SHELL_SCHEME));

    match handler {
        Some(handler) => handler.handle(request),
        None => {
            append_shell_log(&format!(
                "{SHELL_SCHEME}:// request before handler registration: {}",
                request.uri()
            ));
            respond(StatusCode::NOT_FOUND, "text/plain", Vec::new())
        }
    }
}

/// Bridges webview `shell://` requests to whatever handler is registered.
pub(crate) fn dispatch_shell_request(
    app_handle: &AppHandle,
    request: &Request<Vec<u8>>,
) -> Response<Vec<u8>> {
    let registry = app_handle.try_state::<ProtocolRegistry>();
    route_shell_request(registry.as_deref(), request)
}
