// Tests for dataset loading

use std::io::Write;
use tempfile::NamedTempFile;
use wikigraph_dataset::{Dataset, LoadError, OutgoingLinks};

fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

// ============================================================================
// Format Tests
// ============================================================================

#[test]
fn test_load_json_array() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_dataset(
        r#"[
            {"document_id": "Yoda", "title": "Yoda", "outgoing_links": ["Dagobah"], "source": "wiki"},
            {"document_id": "Dagobah", "title": "Dagobah", "outgoing_links": [], "source": "wiki"}
        ]"#,
    );

    let dataset = Dataset::load(file.path())?;

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].document_id.as_str(), "Yoda");
    assert_eq!(dataset.origin, file.path());
    Ok(())
}

#[test]
fn test_load_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_dataset(
        "{\"document_id\": \"Yoda\", \"outgoing_links\": \"Dagobah\"}\n\
         \n\
         {\"document_id\": \"Dagobah\", \"outgoing_links\": [[\"Yoda\"]]}\n",
    );

    let dataset = Dataset::load(file.path())?;

    assert_eq!(dataset.len(), 2);
    assert_eq!(
        dataset.records[0].outgoing_links,
        OutgoingLinks::Single("Dagobah".to_string())
    );
    assert_eq!(dataset.records[1].outgoing_links.flatten(), vec!["Yoda"]);
    Ok(())
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_load_missing_file() {
    let result = Dataset::load(std::path::Path::new("/definitely/not/here.json"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn test_load_empty_array() {
    let file = write_dataset("[]");
    let result = Dataset::load(file.path());
    assert!(matches!(result, Err(LoadError::Empty(_))));
}

#[test]
fn test_load_blank_file() {
    let file = write_dataset("\n\n   \n");
    let result = Dataset::load(file.path());
    assert!(matches!(result, Err(LoadError::Empty(_))));
}

#[test]
fn test_load_malformed_array() {
    let file = write_dataset(r#"[{"document_id": "A"}, {"title": "no id"}]"#);
    let result = Dataset::load(file.path());
    assert!(matches!(result, Err(LoadError::Json { line: 0, .. })));
}

#[test]
fn test_error_message_names_the_path() {
    let err = Dataset::load(std::path::Path::new("/missing/dataset.json")).unwrap_err();
    assert!(err.to_string().contains("/missing/dataset.json"));
}

// ============================================================================
// Fingerprint Tests
// ============================================================================

#[test]
fn test_same_content_same_fingerprint() {
    let contents = r#"[{"document_id": "A", "outgoing_links": ["B"]}]"#;
    let a = Dataset::load(write_dataset(contents).path()).unwrap();
    let b = Dataset::load(write_dataset(contents).path()).unwrap();
    assert_eq!(a.fingerprint, b.fingerprint);
}

#[test]
fn test_different_content_different_fingerprint() {
    let a = Dataset::parse(br#"[{"document_id": "A"}]"#, "a.json").unwrap();
    let b = Dataset::parse(br#"[{"document_id": "B"}]"#, "b.json").unwrap();
    assert_ne!(a.fingerprint, b.fingerprint);
}
