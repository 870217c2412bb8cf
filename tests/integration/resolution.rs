//! Resolution through config, file and inline namespaces.

use crate::common::QxsFixture;
use qxs_cli::config::{ConfigEnvironment, QxsConfig};
use qxs_cli::core::{ErrorKind, QxsError};
use qxs_cli::database::ObjectShortcutDatabase;
use qxs_cli::models::NamespaceSource;
use qxs_cli::namespaces::{
    FileNamespaceSourceHandler, InPlaceNamespaceSourceHandler, NamespaceDispatcher,
};
use qxs_cli::query::{QueryOutcome, QueryProcessor};
use qxs_cli::test_utils::{StaticNamespaceSourceHandler, init_test_logging};
use std::sync::Arc;

async fn processor(fixture: &QxsFixture) -> QueryProcessor {
    init_test_logging(None);
    let config = QxsConfig::load_from(&fixture.config_path()).await.unwrap();
    let dispatcher = NamespaceDispatcher::new(vec![
        Box::new(StaticNamespaceSourceHandler::new()),
        Box::new(InPlaceNamespaceSourceHandler::new()),
        Box::new(FileNamespaceSourceHandler::new()),
    ]);

    QueryProcessor::new(
        Arc::new(ConfigEnvironment::new(config)),
        Arc::new(ObjectShortcutDatabase::new(Arc::new(dispatcher))),
    )
}

fn success_url(outcome: QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Success { url, .. } => url,
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolves_shortcut_from_file_namespace() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let url = success_url(processor.process("bvg Alexanderplatz, Hermannplatz").await.unwrap());

    assert_eq!(
        url,
        "https://www.bvg.de/de/verbindungen/verbindungssuche?S=Alexanderplatz&Z=Hermannplatz&start=1"
    );
}

#[tokio::test]
async fn test_inline_namespace_overrides_file_namespace() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let url = success_url(processor.process("g rust async").await.unwrap());

    assert_eq!(url, "https://mine.example/?q=rust%20async&lang=de");
}

#[tokio::test]
async fn test_excess_arguments_are_folded_and_encoded() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let url = success_url(processor.process("legacy a, b, c").await.unwrap());

    assert_eq!(url, "https://legacy.example/?q=a%2Cb%2Cc");
}

#[tokio::test]
async fn test_include_keeps_own_title() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let QueryOutcome::Success { url, shortcut } = processor.process("wiki Berlin").await.unwrap() else {
        panic!("expected success");
    };

    assert_eq!(url, "https://mine.example/?q=Berlin&lang=de");
    assert_eq!(shortcut.title.as_deref(), Some("Wiki search"));
}

#[tokio::test]
async fn test_deprecated_shortcut_suggests_alternative() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let outcome = processor.process("behvaugeh Alexanderplatz, Hermannplatz").await.unwrap();

    assert_eq!(
        outcome,
        QueryOutcome::Deprecated {
            created: Some("2024-03-31".to_string()),
            alternative_query: Some("bvg Alexanderplatz, Hermannplatz".to_string()),
        }
    );
}

#[tokio::test]
async fn test_default_keyword_receives_whole_query() {
    let fixture = QxsFixture::new("default_keyword = \"g\"");
    let processor = processor(&fixture).await;

    let url = success_url(processor.process("unknown thing, other").await.unwrap());

    assert_eq!(url, "https://mine.example/?q=unknown%20thing%2C%20other&lang=de");
}

#[tokio::test]
async fn test_unknown_keyword_is_not_found() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    assert_eq!(processor.process("nothing here").await.unwrap(), QueryOutcome::NotFound);
}

#[tokio::test]
async fn test_shortcut_without_url_is_data_error() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let error = processor.process("broken x").await.unwrap_err();

    assert!(matches!(error, QxsError::MissingUrl { .. }));
    assert_eq!(error.kind(), ErrorKind::DataDefinition);
}

#[tokio::test]
async fn test_query_prefix_without_data_is_tolerated() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    // `en` is served by the static handler, which has no data for it
    let url = success_url(processor.process("en.g rust").await.unwrap());

    assert_eq!(url, "https://mine.example/?q=rust&lang=en");
}

#[tokio::test]
async fn test_search_spans_namespaces() {
    let fixture = QxsFixture::new("");
    let processor = processor(&fixture).await;

    let results = processor.search("SEARCH").await.unwrap();

    assert_eq!(results.keys().collect::<Vec<_>>(), vec!["g 1", "wiki 1"]);
}

#[tokio::test]
async fn test_missing_namespace_file_is_usage_error() {
    let fixture = QxsFixture::new("");
    std::fs::remove_file(fixture.temp.path().join("base.yml")).unwrap();
    let processor = processor(&fixture).await;

    let error = processor.process("bvg a, b").await.unwrap_err();

    assert!(matches!(error, QxsError::NamespaceUnavailable { .. }));
    assert_eq!(error.kind(), ErrorKind::Usage);
}

#[tokio::test]
async fn test_official_namespace_without_handler_is_implementation_error() {
    let dispatcher = NamespaceDispatcher::new(vec![Box::new(FileNamespaceSourceHandler::new())]);

    let error = dispatcher.get(&NamespaceSource::official("o")).await.unwrap_err();

    assert!(matches!(error, QxsError::UnsupportedNamespaceSource { .. }));
    assert_eq!(error.kind(), ErrorKind::Implementation);
}
