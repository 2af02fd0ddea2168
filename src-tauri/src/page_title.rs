use tauri::{Runtime, WebviewWindow};

use crate::WINDOW_TITLE_PREFIX;

/// Anything whose title the shell can rewrite.
pub(crate) trait TitleTarget {
    fn set_title(&self, title: &str) -> Result<(), String>;
}

impl<R: Runtime> TitleTarget for WebviewWindow<R> {
    fn set_title(&self, title: &str) -> Result<(), String> {
        WebviewWindow::set_title(self, title).map_err(|error| error.to_string())
    }
}

/// A document title change, delivered once per notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageTitleUpdated {
    title: String,
    default_prevented: bool,
}

impl PageTitleUpdated {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            default_prevented: false,
        }
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    /// Stops the host from applying the document title as-is.
    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub(crate) fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub(crate) fn prefixed_title(document_title: &str) -> String {
    format!("{WINDOW_TITLE_PREFIX}{document_title}")
}

fn apply_title<T, F>(target: &T, title: &str, log: F)
where
    T: TitleTarget + ?Sized,
    F: Fn(&str),
{
    if let Err(error) = target.set_title(title) {
        log(&format!("failed to set window title: {error}"));
    }
}

pub(crate) fn override_page_title<T, F>(event: &mut PageTitleUpdated, target: &T, log: F)
where
    T: TitleTarget + ?Sized,
    F: Fn(&str),
{
    event.prevent_default();
    apply_title(target, &prefixed_title(event.title()), log);
}

/// Runs the shell listener, then the host default unless it was prevented.
pub(crate) fn dispatch_page_title_updated<T, F>(target: &T, document_title: String, log: F)
where
    T: TitleTarget + ?Sized,
    F: Fn(&str),
{
    let mut event = PageTitleUpdated::new(document_title);
    override_page_title(&mut event, target, &log);

    if !event.is_default_prevented() {
        apply_title(target, event.title(), &log);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingTarget {
        titles: RefCell<Vec<String>>,
        fail: bool,
    }

    impl TitleTarget for RecordingTarget {
        fn set_title(&self, title: &str) -> Result<(), String> {
            if self.fail {
                return Err("window closed".to_string());
            }
            self.titles.borrow_mut().push(title.to_string());
            Ok(())
        }
    }

    #[test]
    fn dispatch_page_title_updated_prefixes_title() {
        let target = RecordingTarget::default();
        dispatch_page_title_updated(&target, "Hello".to_string(), |_| {});
        assert_eq!(*target.titles.borrow(), vec!["Atom Shell - Hello".to_string()]);
    }

    #[test]
    fn dispatch_page_title_updated_never_applies_raw_title() {
        let target = RecordingTarget::default();
        for title in ["", "Hello", "Atom Shell - nested", "  spaced  ", "日本語"] {
            dispatch_page_title_updated(&target, title.to_string(), |_| {});
        }

        let titles = target.titles.borrow();
        assert_eq!(titles.len(), 5);
        assert_eq!(titles[0], "Atom Shell - ");
        assert_eq!(titles[2], "Atom Shell - Atom Shell - nested");
        assert_eq!(titles[3], "Atom Shell -   spaced  ");
        assert_eq!(titles[4], "Atom Shell - 日本語");
    }

    #[test]
    fn override_page_title_prevents_default() {
        let target = RecordingTarget::default();
        let mut event = PageTitleUpdated::new("Docs");
        assert!(!event.is_default_prevented());

        override_page_title(&mut event, &target, |_| {});
        assert!(event.is_default_prevented());
        assert_eq!(event.title(), "Docs");
    }

    #[test]
    fn dispatch_page_title_updated_logs_set_title_failure() {
        let target = RecordingTarget {
            fail: true,
            ..RecordingTarget::default()
        };
        let logged = RefCell::new(Vec::new());

        dispatch_page_title_updated(&target, "Hello".to_string(), |line| {
            logged.borrow_mut().push(line.to_string())
        });

        assert_eq!(
            *logged.borrow(),
            vec!["failed to set window title: window closed".to_string()]
        );
    }
}
