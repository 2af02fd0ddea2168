use std::{
    env,
    path::{Path, PathBuf},
};

use tauri::{AppHandle, Manager};
use url::Url;

use crate::{append_shell_log, APP_DIR_ENV, BUNDLED_APP_DIR, INDEX_FILE};

pub(crate) fn executable_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn contains_index(dir: &Path) -> bool {
    dir.join(INDEX_FILE).is_file()
}

/// Picks the directory `index.html` is loaded from.
///
/// An explicit override always wins. Otherwise the executable's directory is
/// used when it holds an `index.html`, then the bundled `default_app`
/// resource, and finally the executable's directory regardless.
pub(crate) fn resolve_app_dir(
    dir_override: Option<String>,
    exe_dir: Option<PathBuf>,
    resource_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(dir) = dir_override
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return Some(PathBuf::from(dir));
    }

    if let Some(dir) = exe_dir.as_deref().filter(|dir| contains_index(dir)) {
        return Some(dir.to_path_buf());
    }

    if let Some(bundled) = resource_dir
        .map(|dir| dir.join(BUNDLED_APP_DIR))
        .filter(|dir| contains_index(dir))
    {
        return Some(bundled);
    }

    exe_dir
}

pub(crate) fn resolve_app_dir_for(app_handle: &AppHandle) -> Result<PathBuf, String> {
    let resource_dir = match app_handle.path().resource_dir() {
        Ok(dir) => Some(dir),
        Err(error) => {
            append_shell_log(&format!("resource dir unavailable: {error}"));
            None
        }
    };

    resolve_app_dir(env::var(APP_DIR_ENV).ok(), executable_dir(), resource_dir)
        .ok_or_else(|| "Failed to resolve application directory.".to_string())
}

fn absolutize(dir: &Path) -> Result<PathBuf, String> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }

    env::current_dir()
        .map(|cwd| cwd.join(dir))
        .map_err(|error| format!("Failed to read current directory: {error}"))
}

/// Builds `file://<dir>/index.html`.
pub(crate) fn build_index_url(app_dir: &Path) -> Result<Url, String> {
    let index_path = absolutize(app_dir)?.join(INDEX_FILE);
    Url::from_file_path(&index_path)
        .map_err(|_| format!("Invalid document path: {}", index_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dir_with_index() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join(INDEX_FILE), "<title>t</title>").expect("write index");
        dir
    }

    #[test]
    fn resolve_app_dir_prefers_override() {
        let exe = dir_with_index();
        let resolved = resolve_app_dir(
            Some(" /opt/app ".to_string()),
            Some(exe.path().to_path_buf()),
            None,
        );
        assert_eq!(resolved, Some(PathBuf::from("/opt/app")));
    }

    #[test]
    fn resolve_app_dir_uses_exe_dir_with_index() {
        let exe = dir_with_index();
        let resources = tempfile::tempdir().expect("create temp dir");
        let resolved = resolve_app_dir(
            None,
            Some(exe.path().to_path_buf()),
            Some(resources.path().to_path_buf()),
        );
        assert_eq!(resolved, Some(exe.path().to_path_buf()));
    }

    #[test]
    fn resolve_app_dir_falls_back_to_bundled_resources() {
        let exe = tempfile::tempdir().expect("create temp dir");
        let resources = tempfile::tempdir().expect("create temp dir");
        let bundled = resources.path().join(BUNDLED_APP_DIR);
        fs::create_dir_all(&bundled).expect("create bundled dir");
        fs::write(bundled.join(INDEX_FILE), "").expect("write bundled index");

        let resolved = resolve_app_dir(
            None,
            Some(exe.path().to_path_buf()),
            Some(resources.path().to_path_buf()),
        );
        assert_eq!(resolved, Some(bundled));
    }

    #[test]
    fn resolve_app_dir_keeps_exe_dir_when_nothing_has_index() {
        let exe = tempfile::tempdir().expect("create temp dir");
        let resolved = resolve_app_dir(None, Some(exe.path().to_path_buf()), None);
        assert_eq!(resolved, Some(exe.path().to_path_buf()));
        assert_eq!(resolve_app_dir(None, None, None), None);
    }

    #[cfg(unix)]
    #[test]
    fn build_index_url_concatenates_scheme_dir_and_index() {
        let url = build_index_url(Path::new("/opt/atom shell/app")).expect("build url");
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.as_str(), "file:///opt/atom%20shell/app/index.html");
        assert_eq!(
            url.to_file_path().expect("file path"),
            PathBuf::from("/opt/atom shell/app/index.html")
        );
    }

    #[test]
    fn build_index_url_absolutizes_relative_dirs() {
        let url = build_index_url(Path::new("relative-app")).expect("build url");
        let expected = env::current_dir()
            .expect("cwd")
            .join("relative-app")
            .join(INDEX_FILE);
        assert_eq!(url.to_file_path().expect("file path"), expected);
        assert!(url.path().ends_with("/relative-app/index.html"));
    }
}
