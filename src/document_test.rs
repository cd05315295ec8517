use super::*;

#[test]
fn is_pdf_path_accepts_any_case() {
    assert!(is_pdf_path(Path::new("report.pdf")));
    assert!(is_pdf_path(Path::new("/tmp/REPORT.PDF")));
}

#[test]
fn is_pdf_path_rejects_other_extensions() {
    assert!(!is_pdf_path(Path::new("notes.txt")));
    assert!(!is_pdf_path(Path::new("pdf")));
    assert!(!is_pdf_path(Path::new("archive.pdf.zip")));
}

#[test]
fn new_document_exposes_name_and_bytes() {
    let doc = Document::new("a.pdf", vec![1, 2, 3]);
    assert_eq!(doc.file_name(), "a.pdf");
    assert_eq!(doc.bytes(), &[1, 2, 3]);
    assert_eq!(doc.len(), 3);
    assert!(!doc.is_empty());
}

#[tokio::test]
async fn load_reads_file_and_name() {
    let dir = std::env::temp_dir().join(format!("ragchat-doc-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let path = dir.join("sample.pdf");
    tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

    let doc = Document::load(&path).await.unwrap();
    assert_eq!(doc.file_name(), "sample.pdf");
    assert_eq!(doc.bytes(), b"%PDF-1.4");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn load_missing_file_errors() {
    let err = Document::load(Path::new("/definitely/not/here.pdf")).await.unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
