//! Drivers behind the `ragchat` binary: the interactive chat loop and the
//! one-shot `ask` run.
//!
//! Both take their input and output as parameters so the binary can wire
//! them to stdin/stdout while tests feed byte slices and collect a buffer.
//! The transcript itself is printed by a session observer, not here; these
//! functions only write command feedback (status lines, refusals).

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

use std::io::{self, Write};
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::ConfigError;
use crate::document::{Document, is_pdf_path};
use crate::net::RagError;
use crate::session::{Completions, Session};
use crate::terminal::{Command, HELP, decode_line, parse_command};

pub const UPLOAD_BUSY_NOTICE: &str = "[a document is still being indexed; wait for it to finish]";
pub const QUERY_BUSY_NOTICE: &str = "[still answering the previous question]";
pub const BLANK_QUESTION_NOTICE: &str = "[skipped a blank question]";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] RagError),
    #[error("{path}: {message}")]
    Pick { path: String, message: String },
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("indexing failed: {0}")]
    Indexing(String),
}

/// Value parser for `ask` questions: blank text is rejected up front.
///
/// # Errors
///
/// Returns a message for clap when `raw` is empty after trimming.
pub fn parse_question(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("questions must not be blank".to_owned());
    }
    Ok(raw.to_owned())
}

/// Interactive loop: read lines from `input` while applying completions as
/// they arrive. Ends on `/quit` or end of input.
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes become part of the
/// line instead of ending the session.
///
/// # Errors
///
/// Returns [`CliError::Io`] if reading `input` or writing `out` fails.
pub async fn run_chat<R>(
    session: &mut Session,
    completions: &mut Completions,
    mut input: R,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
{
    // Partial reads stay in `buf` when a completion wins the select.
    let mut buf = Vec::new();
    loop {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf) => {
                if read? == 0 && buf.is_empty() {
                    break;
                }
                let line = decode_line(&buf);
                buf.clear();
                if !handle_input(session, &line, out).await? {
                    break;
                }
            }
            Some(completion) = completions.recv() => {
                session.apply(completion);
            }
        }
    }
    Ok(())
}

/// Act on one input line. Returns `false` when the user asked to leave.
///
/// # Errors
///
/// Returns the I/O error if writing feedback to `out` fails.
pub async fn handle_input(session: &mut Session, line: &str, out: &mut impl Write) -> io::Result<bool> {
    match parse_command(line) {
        Command::Quit => return Ok(false),
        Command::Empty => {}
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Status => {
            let view = session.view();
            let file = view.indexed_indicator.as_deref().unwrap_or("none");
            writeln!(out, "[phase: {}, document: {file}]", view.phase.label())?;
        }
        Command::Unknown(raw) => writeln!(out, "unknown command: {raw} (try /help)")?,
        Command::Upload(path) => {
            if !session.view().file_select_enabled {
                writeln!(out, "{UPLOAD_BUSY_NOTICE}")?;
                return Ok(true);
            }
            match pick_document(&path).await {
                Ok(document) => {
                    session.select_file(document);
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        Command::Query(text) => {
            session.set_draft(text);
            if session.submit_draft().is_none() {
                writeln!(out, "{QUERY_BUSY_NOTICE}")?;
            }
        }
    }
    Ok(true)
}

/// Index `file`, then ask each question in order, waiting for every answer.
///
/// # Errors
///
/// Returns [`CliError::Pick`] if the file is not a readable PDF and
/// [`CliError::Indexing`] if the service rejected it.
pub async fn run_ask(
    session: &mut Session,
    completions: &mut Completions,
    file: &Path,
    questions: &[String],
    out: &mut impl Write,
) -> Result<(), CliError> {
    let document = pick_document(file).await?;
    session.select_file(document);
    session.run_until_idle(completions).await;

    if !session.state().is_indexed() {
        let reason = session.state().last_error().unwrap_or("unknown error").to_owned();
        return Err(CliError::Indexing(reason));
    }

    for question in questions {
        if session.submit_query(question).is_none() {
            writeln!(out, "{BLANK_QUESTION_NOTICE}")?;
            continue;
        }
        session.run_until_idle(completions).await;
    }
    Ok(())
}

/// The file picker: only PDFs are offered to the upload controller.
async fn pick_document(path: &Path) -> Result<Document, CliError> {
    let display = path.display().to_string();
    if !is_pdf_path(path) {
        return Err(CliError::Pick { path: display, message: "only PDF files can be uploaded".to_owned() });
    }
    Document::load(path)
        .await
        .map_err(|e| CliError::Pick { path: display, message: e.to_string() })
}
