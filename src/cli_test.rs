use super::*;
use std::sync::Arc;

use crate::net::types::{QueryReply, RagService, UploadReply};
use crate::state::log::Sender;

// =============================================================
// ScriptedRag
// =============================================================

/// Mock service with fixed outcomes. Held calls never resolve, which keeps
/// the matching indicator on for the rest of the test.
#[derive(Default)]
struct ScriptedRag {
    upload_rejection: Option<&'static str>,
    hold_uploads: bool,
    hold_queries: bool,
}

#[async_trait::async_trait]
impl RagService for ScriptedRag {
    async fn upload_document(&self, document: &Document) -> Result<UploadReply, RagError> {
        if self.hold_uploads {
            std::future::pending::<()>().await;
        }
        match self.upload_rejection {
            Some(message) => Err(RagError::Status { status: 400, message: Some(message.to_owned()) }),
            None => Ok(UploadReply { source_file: Some(document.file_name().to_owned()) }),
        }
    }

    async fn query(&self, query: &str) -> Result<QueryReply, RagError> {
        if self.hold_queries {
            std::future::pending::<()>().await;
        }
        Ok(QueryReply { answer: format!("echo: {query}") })
    }
}

fn session_with(rag: ScriptedRag) -> (Session, Completions) {
    let service: Arc<dyn RagService> = Arc::new(rag);
    Session::new(service)
}

fn temp_pdf(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("ragchat-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.4 cli").unwrap();
    path
}

fn text(out: &[u8]) -> String {
    String::from_utf8(out.to_vec()).unwrap()
}

// =============================================================
// parse_question
// =============================================================

#[test]
fn parse_question_rejects_blank() {
    assert!(parse_question("").is_err());
    assert!(parse_question("   ").is_err());
    assert_eq!(parse_question(" total? ").unwrap(), " total? ");
}

// =============================================================
// run_chat
// =============================================================

#[tokio::test]
async fn chat_keeps_going_after_invalid_utf8_line() {
    let (mut session, mut completions) = session_with(ScriptedRag::default());
    let input: &[u8] = b"caf\xe9?\n/status\n/quit\n";
    let mut out = Vec::new();

    run_chat(&mut session, &mut completions, input, &mut out).await.unwrap();

    assert!(text(&out).contains("[phase: "));
    let first = &session.state().messages().all()[0];
    assert_eq!((first.sender(), first.text()), (Sender::User, "caf\u{FFFD}?"));
}

#[tokio::test]
async fn chat_ends_at_end_of_input() {
    let (mut session, mut completions) = session_with(ScriptedRag::default());
    let input: &[u8] = b"/status";
    let mut out = Vec::new();

    run_chat(&mut session, &mut completions, input, &mut out).await.unwrap();

    assert_eq!(text(&out), "[phase: idle, document: none]\n");
}

#[tokio::test]
async fn quit_leaves_remaining_lines_unread() {
    let (mut session, mut completions) = session_with(ScriptedRag::default());
    let input: &[u8] = b"/quit\nshould not be asked\n";
    let mut out = Vec::new();

    run_chat(&mut session, &mut completions, input, &mut out).await.unwrap();

    assert!(session.state().messages().is_empty());
}

// =============================================================
// handle_input
// =============================================================

#[tokio::test]
async fn upload_refused_while_indexing() {
    let (mut session, _completions) = session_with(ScriptedRag { hold_uploads: true, ..ScriptedRag::default() });
    let first = session.select_file(Document::new("a.pdf", b"%PDF".to_vec()));
    let mut out = Vec::new();

    assert!(handle_input(&mut session, "/upload b.pdf", &mut out).await.unwrap());

    assert_eq!(text(&out), format!("{UPLOAD_BUSY_NOTICE}\n"));
    assert!(session.state().is_indexing());
    assert_eq!(session.state().epoch(), first.seq());
}

#[tokio::test]
async fn query_while_answering_prints_notice() {
    let (mut session, _completions) = session_with(ScriptedRag { hold_queries: true, ..ScriptedRag::default() });
    session.submit_query("first").unwrap();
    let mut out = Vec::new();

    assert!(handle_input(&mut session, "second", &mut out).await.unwrap());

    assert_eq!(text(&out), format!("{QUERY_BUSY_NOTICE}\n"));
    assert_eq!(session.state().messages().len(), 1);
    assert_eq!(session.state().draft_input(), "second");
}

#[tokio::test]
async fn upload_of_non_pdf_is_rejected_before_indexing() {
    let (mut session, _completions) = session_with(ScriptedRag::default());
    let mut out = Vec::new();

    handle_input(&mut session, "/upload notes.txt", &mut out).await.unwrap();

    assert!(text(&out).contains("only PDF files can be uploaded"));
    assert!(!session.state().is_indexing());
}

#[tokio::test]
async fn quit_returns_false() {
    let (mut session, _completions) = session_with(ScriptedRag::default());
    let mut out = Vec::new();
    assert!(!handle_input(&mut session, "/quit", &mut out).await.unwrap());
}

// =============================================================
// run_ask
// =============================================================

#[tokio::test]
async fn ask_fails_when_indexing_fails() {
    let rag = ScriptedRag { upload_rejection: Some("PDF contains no extractable text"), ..ScriptedRag::default() };
    let (mut session, mut completions) = session_with(rag);
    let path = temp_pdf("scan.pdf");
    let questions = vec!["What is the total?".to_owned()];
    let mut out = Vec::new();

    let err = run_ask(&mut session, &mut completions, &path, &questions, &mut out).await.unwrap_err();

    assert!(matches!(&err, CliError::Indexing(reason) if reason == "PDF contains no extractable text"));
    assert!(!session.state().messages().all().iter().any(|m| m.sender() == Sender::User));
}

#[tokio::test]
async fn ask_answers_questions_in_order() {
    let (mut session, mut completions) = session_with(ScriptedRag::default());
    let path = temp_pdf("report.pdf");
    let questions = vec!["one".to_owned(), "two".to_owned()];
    let mut out = Vec::new();

    run_ask(&mut session, &mut completions, &path, &questions, &mut out).await.unwrap();

    let texts: Vec<&str> = session.state().messages().all().iter().map(|m| m.text()).collect();
    assert_eq!(texts, ["one", "echo: one", "two", "echo: two"]);
}

#[tokio::test]
async fn ask_reports_blank_questions() {
    let (mut session, mut completions) = session_with(ScriptedRag::default());
    let path = temp_pdf("blank.pdf");
    let questions = vec!["  ".to_owned(), "real".to_owned()];
    let mut out = Vec::new();

    run_ask(&mut session, &mut completions, &path, &questions, &mut out).await.unwrap();

    assert_eq!(text(&out), format!("{BLANK_QUESTION_NOTICE}\n"));
    assert_eq!(session.state().messages().len(), 2);
}

#[tokio::test]
async fn ask_rejects_non_pdf_path() {
    let (mut session, mut completions) = session_with(ScriptedRag::default());
    let mut out = Vec::new();

    let err = run_ask(&mut session, &mut completions, Path::new("notes.txt"), &[], &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Pick { .. }));
    assert!(!session.state().is_indexing());
}
