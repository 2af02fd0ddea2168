use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tauri::http::{Request, Response};
use url::Url;

/// Schemes the webview resolves on its own.
const BUILTIN_SCHEMES: &[&str] = &[
    "file", "http", "https", "data", "about", "blob", "ws", "wss", "tauri", "ipc", "asset",
];

pub(crate) trait ProtocolHandler: Send + Sync {
    fn handle(&self, request: &Request<Vec<u8>>) -> Response<Vec<u8>>;
}

/// Scheme to handler map shared by the URI scheme bridge and navigation checks.
#[derive(Default)]
pub(crate) struct ProtocolRegistry {
    handlers: Mutex<HashMap<String, Arc<dyn ProtocolHandler>>>,
}

impl ProtocolRegistry {
    /// Registers `handler` for `scheme`, or removes the scheme when `None`.
    ///
    /// Registering an already registered scheme and removing an unknown one
    /// both return `false` and leave the map untouched.
    pub(crate) fn set_protocol_handler(
        &self,
        scheme: &str,
        handler: Option<Arc<dyn ProtocolHandler>>,
    ) -> bool {
        let Ok(mut handlers) = self.handlers.lock() else {
            return false;
        };

        match handler {
            None => handlers.remove(scheme).is_some(),
            Some(_) if handlers.contains_key(scheme) => false,
            Some(handler) => {
                handlers.insert(scheme.to_string(), handler);
                true
            }
        }
    }

    /// Swaps the handler of a registered scheme and hands back the old one.
    pub(crate) fn replace_protocol(
        &self,
        scheme: &str,
        handler: Arc<dyn ProtocolHandler>,
    ) -> Option<Arc<dyn ProtocolHandler>> {
        let mut handlers = self.handlers.lock().ok()?;
        let slot = handlers.get_mut(scheme)?;
        Some(std::mem::replace(slot, handler))
    }

    pub(crate) fn get_protocol_handler(&self, scheme: &str) -> Option<Arc<dyn ProtocolHandler>> {
        self.handlers.lock().ok()?.get(scheme).cloned()
    }

    pub(crate) fn has_protocol_handler(&self, scheme: &str) -> bool {
        self.handlers
            .lock()
            .map(|handlers| handlers.contains_key(scheme))
            .unwrap_or(false)
    }

    pub(crate) fn is_handled_protocol(&self, scheme: &str) -> bool {
        self.has_protocol_handler(scheme) || BUILTIN_SCHEMES.contains(&scheme)
    }

    pub(crate) fn is_handled_url(&self, raw_url: &str) -> bool {
        match Url::parse(raw_url) {
            Ok(url) => self.is_handled_protocol(url.scheme()),
            // the webview reports invalid URLs itself
            Err(_) => true,
        }
    }

    pub(crate) fn is_safe_redirect_target(&self, raw_url: &str) -> bool {
        self.is_handled_url(raw_url)
    }
}
