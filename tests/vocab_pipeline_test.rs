//! End-to-end tests for the vocabulary pipeline against a mock HTTP service

use chrono::NaiveDate;
use kura::adapters::jlpt::JlptVocabClient;
use kura::config::{FailurePolicy, KuraConfig, VocabConfig};
use kura::core::export::{ExportErrorType, MultiSinkWriter, VocabExporter};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

fn words(level: u8) -> serde_json::Value {
    json!([
        {"word": format!("語{level}a"), "meaning": "first", "furigana": "ご", "romaji": "go", "level": level},
        {"word": format!("語{level}b"), "meaning": "second, \"quoted\"", "furigana": "ご", "romaji": "go", "level": level}
    ])
}

/// N3 answers with a bare list, every other level with the wrapped shape
async fn mock_level(server: &mut ServerGuard, level: u8) -> Mock {
    let body = if level == 3 {
        words(level)
    } else {
        json!({"total": 2, "offset": 0, "limit": 2, "words": words(level)})
    };

    server
        .mock("GET", "/api/words/all")
        .match_query(Matcher::UrlEncoded("level".into(), level.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

fn config_for(dir: &TempDir, server: &ServerGuard, policy: FailurePolicy) -> KuraConfig {
    let mut config = KuraConfig::default();
    config.output.base_dir = dir.path().to_string_lossy().to_string();
    config.vocab = VocabConfig {
        base_url: server.url(),
        ..Default::default()
    };
    config.export.failure_policy = policy;
    config
}

fn writer_for(config: &KuraConfig) -> MultiSinkWriter {
    MultiSinkWriter::new(
        config.output.base_path(),
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        false,
    )
}

fn levels_in_db(dir: &TempDir) -> Vec<String> {
    let conn = rusqlite::Connection::open(dir.path().join("jlpt_vocab.db")).unwrap();
    let mut stmt = conn
        .prepare("SELECT level FROM jlpt_vocab ORDER BY rowid")
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[tokio::test]
async fn test_vocab_export_concatenates_levels_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    for level in 1..=5 {
        mocks.push(mock_level(&mut server, level).await);
    }

    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &server, FailurePolicy::Abort);
    let client = JlptVocabClient::new(config.vocab.clone()).unwrap();

    let summary = VocabExporter::new(&client, &config, writer_for(&config))
        .run()
        .await
        .unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(summary.requests, 5);
    assert!(summary.is_successful());
    assert_eq!(summary.table("jlpt_vocab").unwrap().rows, 10);

    assert_eq!(
        levels_in_db(&dir),
        vec!["N1", "N1", "N2", "N2", "N3", "N3", "N4", "N4", "N5", "N5"]
    );

    let csv_path = dir.path().join("jlpt_vocab_2024-05-01.csv");
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let csv = csv.strip_prefix('\u{feff}').unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("word,meaning,furigana,romaji,level"));
    assert_eq!(lines.next(), Some("語1a,first,ご,go,N1"));
    assert_eq!(lines.next(), Some("語1b,\"second, \"\"quoted\"\"\",ご,go,N1"));
    assert_eq!(lines.count(), 8);
}

#[tokio::test]
async fn test_continue_policy_skips_failed_level() {
    let mut server = mockito::Server::new_async().await;
    for level in [1, 2, 4, 5] {
        mock_level(&mut server, level).await;
    }
    server
        .mock("GET", "/api/words/all")
        .match_query(Matcher::UrlEncoded("level".into(), "3".into()))
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &server, FailurePolicy::Continue);
    let client = JlptVocabClient::new(config.vocab.clone()).unwrap();

    let summary = VocabExporter::new(&client, &config, writer_for(&config))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.requests, 5);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].error_type, ExportErrorType::Service);
    assert_eq!(summary.errors[0].context.as_deref(), Some("level=N3"));
    assert_eq!(
        levels_in_db(&dir),
        vec!["N1", "N1", "N2", "N2", "N4", "N4", "N5", "N5"]
    );
}

#[tokio::test]
async fn test_abort_policy_stops_on_failed_level() {
    let mut server = mockito::Server::new_async().await;
    mock_level(&mut server, 1).await;
    server
        .mock("GET", "/api/words/all")
        .match_query(Matcher::UrlEncoded("level".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"message": "rate limited"}"#)
        .create_async()
        .await;
    let never_called = server
        .mock("GET", "/api/words/all")
        .match_query(Matcher::UrlEncoded("level".into(), "3".into()))
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &server, FailurePolicy::Abort);
    let client = JlptVocabClient::new(config.vocab.clone()).unwrap();

    let result = VocabExporter::new(&client, &config, writer_for(&config))
        .run()
        .await;

    assert!(result.is_err());
    never_called.assert_async().await;
    assert!(!dir.path().join("jlpt_vocab.db").exists());
}
