//! Line-oriented terminal front end.
//!
//! `parse_command` turns one input line into an action. `TerminalRenderer`
//! is a session observer: it diffs successive views and prints only what
//! changed (new transcript entries and indicator transitions).

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::state::log::{MessageId, Sender};
use crate::view::ViewModel;

pub const HELP: &str = "\
Commands:
  /upload <path>   index a PDF (starts a new conversation)
  /status          show the current session phase
  /help            show this help
  /quit            leave
Anything else is sent as a question.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    Status,
    Help,
    Quit,
    Query(String),
    Empty,
    Unknown(String),
}

#[must_use]
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Query(trimmed.to_owned());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "upload" | "u" if !arg.is_empty() => Command::Upload(PathBuf::from(arg)),
        "status" => Command::Status,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_owned()),
    }
}

/// Decode one raw input line. Invalid UTF-8 becomes U+FFFD and the line
/// terminator is dropped.
#[must_use]
pub fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Prints view changes as plain text lines.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    last_printed: Option<MessageId>,
    was_indexing: bool,
    indexed: Option<String>,
    was_answering: bool,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write whatever changed since the previous view.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if writing fails.
    pub fn render(&mut self, view: &ViewModel, out: &mut impl Write) -> io::Result<()> {
        if view.indexing_indicator && !self.was_indexing {
            writeln!(out, "[indexing document... new conversation]")?;
        }
        self.was_indexing = view.indexing_indicator;

        for entry in &view.entries {
            if self.last_printed.is_some_and(|last| entry.id <= last) {
                continue;
            }
            let prefix = match entry.sender {
                Sender::User => "you",
                Sender::Assistant => "assistant",
            };
            writeln!(out, "{prefix}> {}", entry.text)?;
            self.last_printed = Some(entry.id);
        }

        if view.indexed_indicator != self.indexed {
            if let Some(name) = &view.indexed_indicator {
                writeln!(out, "[indexed: {name}]")?;
            }
            self.indexed.clone_from(&view.indexed_indicator);
        }

        if view.answering_indicator && !self.was_answering {
            writeln!(out, "[answering...]")?;
        }
        self.was_answering = view.answering_indicator;

        out.flush()
    }
}
