use crate::error::{CodestashError, Result};
use arboard::Clipboard;

fn clipboard_error(err: arboard::Error) -> CodestashError {
    match err {
        arboard::Error::ClipboardNotSupported => CodestashError::PlatformUnsupported(format!(
            "clipboard access is not available on {}",
            std::env::consts::OS
        )),
        other => CodestashError::Clipboard(other.to_string()),
    }
}

/// Helpers that fork and keep serving the selection after we exit.
/// Wayland's `wl-copy` is only considered inside a Wayland session.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
const SELECTION_HELPERS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn selection_helper(
    wayland: bool,
    on_path: impl Fn(&str) -> bool,
) -> Option<(&'static str, &'static [&'static str])> {
    SELECTION_HELPERS
        .iter()
        .copied()
        .filter(|(program, _)| wayland || *program != "wl-copy")
        .find(|(program, _)| on_path(program))
}

#[cfg(target_os = "linux")]
fn pipe_to_helper(program: &str, args: &[&str], text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| CodestashError::Clipboard(format!("failed to launch {}: {}", program, e)))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(CodestashError::Clipboard(format!(
            "{} exited with {}",
            program, status
        )))
    }
}

/// Set the clipboard content as text
///
/// On Linux the selection is owned by a process, so a helper that outlives
/// this one is preferred when installed.
pub fn set_clipboard_text(text: &str) -> Result<()> {
    #[cfg(target_os = "linux")]
    {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        if let Some((program, args)) =
            selection_helper(wayland, |program| which::which(program).is_ok())
        {
            log::debug!("copying through {}", program);
            return pipe_to_helper(program, args, text);
        }
        log::debug!("no selection helper on PATH, falling back to arboard");
    }

    let mut clipboard = Clipboard::new().map_err(clipboard_error)?;
    clipboard.set_text(text).map_err(clipboard_error)
}
