use std::{
    path::Path,
    process::{Command, Stdio},
};

/// Opens `path` in the platform's image viewer without waiting for it.
///
/// Best effort: a missing display or a viewer that fails to start is logged
/// and reported as `false`, never as an error.
pub fn show(path: &Path) -> bool {
    if !display_available() {
        log::info!("no display available, not opening {}", path.display());
        return false;
    }

    match viewer_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        // not waited on; the viewer outlives this process
        Ok(_child) => true,
        Err(err) => {
            log::warn!("could not open {}: {}", path.display(), err);
            false
        }
    }
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
pub fn display_available() -> bool {
    true
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).map_or(false, |v| !v.is_empty()))
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

#[cfg(all(test, not(any(target_os = "macos", target_os = "windows"))))]
mod tests {
    use super::*;

    #[test]
    fn headless_session_skips_viewer() {
        let saved: Vec<_> = ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .map(|var| (*var, std::env::var_os(var)))
            .collect();
        for (var, _) in &saved {
            std::env::remove_var(var);
        }

        assert!(!display_available());
        assert!(!show(Path::new("sort_comparison_plot.png")));

        std::env::set_var("DISPLAY", "");
        assert!(!display_available());
        std::env::set_var("DISPLAY", ":99");
        assert!(display_available());

        for (var, value) in saved {
            match value {
                Some(value) => std::env::set_var(var, value),
                None => std::env::remove_var(var),
            }
        }
    }
}
