use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard available: {0}")]
    Unavailable(String),

    #[error("`{program}` exited with {status}")]
    CommandFailed { program: String, status: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something text can be copied into.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Result of a copy attempt that went through every available technique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing worked; show this to the user so they can copy by hand.
    Manual(String),
}

pub fn manual_copy_message(value: &str) -> String {
    format!("Gagal menyalin. Silakan copy manual: {value}")
}

/// Copy `value` with `primary`, falling back to `fallback` when that fails.
pub fn copy_text(
    primary: &mut dyn ClipboardSink,
    fallback: &mut dyn ClipboardSink,
    value: &str,
) -> CopyOutcome {
    let primary_err = match primary.write_text(value) {
        Ok(()) => return CopyOutcome::Copied,
        Err(err) => err,
    };
    log::debug!("Primary clipboard failed ({primary_err}); trying fallback");

    match fallback.write_text(value) {
        Ok(()) => CopyOutcome::Copied,
        Err(err) => {
            log::warn!("Clipboard fallback failed: {err}");
            CopyOutcome::Manual(manual_copy_message(value))
        }
    }
}

/// The desktop clipboard through the platform's copy utility.
#[derive(Debug, Default)]
pub struct SystemClipboard;

type CopyCommand = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[CopyCommand] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const COPY_COMMANDS: &[CopyCommand] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COPY_COMMANDS: &[CopyCommand] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl SystemClipboard {
    fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // stdin is dropped before waiting so the utility sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // always reap the child, even when the write failed
        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed {
                program: program.to_string(),
                status: status.to_string(),
            })
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = None;
        for (program, args) in COPY_COMMANDS {
            match Self::pipe_into(program, args, text) {
                Ok(()) => {
                    log::debug!("Copied {} bytes with {program}", text.len());
                    return Ok(());
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| ClipboardError::Unavailable("no copy utility".into())))
    }
}

/// Terminal clipboard via the OSC 52 escape sequence. Only works when stdout
/// is a terminal that honours it.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

impl ClipboardSink for Osc52Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError::Unavailable("stdout is not a terminal".into()));
        }
        stdout.write_all(Self::sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
