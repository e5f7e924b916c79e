//! End-to-end runs of [`PipelineController`] with the real HTTP clients
//! pointed at a mockito server. Retry delays are zeroed.

mod common;

use arxiv_digest::{
    Config, DocumentFetcher, HuggingFaceClient, PaperIndexClient, PipelineController, RunState,
    StorageEncoding, Summarizer,
};
use common::{FeedEntry, atom_feed, build_pdf};
use mockito::{Matcher, Server, ServerGuard};
use std::fs;
use tempfile::TempDir;

fn config_for(server: &ServerGuard, output: &TempDir) -> Config {
    let mut config = Config::default_config();
    config.index.base_url = format!("{}/api/query", server.url());
    config.index.max_attempts = 3;
    config.index.retry_delay_secs = 0;
    config.index.network_retry_delay_secs = 0;
    config.summarizer.endpoint = format!("{}/summarize", server.url());
    config.summarizer.api_token = None;
    config.summarizer.retry_delay_secs = 0;
    config.output.directory = output.path().to_path_buf();
    config
}

async fn run(config: &Config) -> arxiv_digest::RunReport {
    let index = PaperIndexClient::new(&config.index, &config.fetcher).unwrap();
    let documents = DocumentFetcher::new(&config.fetcher).unwrap();
    let inference = HuggingFaceClient::new(&config.summarizer, &config.fetcher).unwrap();
    let summarizer = Summarizer::new(inference, &config.summarizer);

    PipelineController::new(config, index, documents, summarizer)
        .unwrap()
        .with_progress(false)
        .run()
        .await
        .unwrap()
}

fn read_json(path: std::path::PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn full_run_writes_texts_and_summaries() {
    let output = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let feed = atom_feed(
        1,
        &[FeedEntry {
            title: "Greetings considered harmful",
            summary: "We study greetings.",
            pdf_url: Some(&format!("{}/pdf/1", server.url())),
        }],
    );

    // Mocks with unmet expectations are served first, in creation order.
    let busy_mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("busy")
        .expect(1)
        .create_async()
        .await;
    let feed_mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::UrlEncoded(
            "search_query".to_string(),
            "cat:cs.AI".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body(feed)
        .expect(1)
        .create_async()
        .await;
    let pdf_mock = server
        .mock("GET", "/pdf/1")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(build_pdf(&["Hello- world"]))
        .expect(1)
        .create_async()
        .await;
    let summarize_mock = server
        .mock("POST", "/summarize")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"summary_text":"A greeting."}]"#)
        .expect(1)
        .create_async()
        .await;

    let report = run(&config_for(&server, &output)).await;

    busy_mock.assert_async().await;
    feed_mock.assert_async().await;
    pdf_mock.assert_async().await;
    summarize_mock.assert_async().await;
    assert_eq!(report.state, RunState::Succeeded);
    assert_eq!(report.stats.index_attempts, 2);

    let full = read_json(output.path().join("full_papers_data.json"));
    assert_eq!(full[0]["title"], "Greetings considered harmful");
    let text = full[0]["text"].as_str().unwrap();
    assert!(text.contains("Helloworld"), "got {:?}", text);
    assert!(!text.contains('\n'));

    let summaries = read_json(output.path().join("summaries_data.json"));
    assert_eq!(
        summaries,
        serde_json::json!([{"title": "Greetings considered harmful", "summary": "A greeting."}])
    );
}

#[tokio::test]
async fn unavailable_index_exhausts_and_still_writes_files() {
    let output = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let query_mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("down for maintenance")
        .expect(3)
        .create_async()
        .await;

    let report = run(&config_for(&server, &output)).await;

    query_mock.assert_async().await;
    assert_eq!(report.state, RunState::Exhausted);
    assert_eq!(
        fs::read_to_string(output.path().join("full_papers_data.json")).unwrap(),
        "[]"
    );
    assert_eq!(
        fs::read_to_string(output.path().join("summaries_data.json")).unwrap(),
        "[]"
    );
}

#[tokio::test]
async fn unparseable_index_response_stops_after_one_request() {
    let output = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let query_mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body("this is not xml <<<")
        .expect(1)
        .create_async()
        .await;

    let report = run(&config_for(&server, &output)).await;

    query_mock.assert_async().await;
    assert_eq!(report.state, RunState::FatalParseFailure);
    assert!(output.path().join("summaries_data.json").exists());
}

#[tokio::test]
async fn failed_summaries_keep_full_texts() {
    let output = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let feed = atom_feed(
        1,
        &[FeedEntry {
            title: "Loading forever",
            summary: "An abstract.",
            pdf_url: Some(&format!("{}/pdf/1", server.url())),
        }],
    );
    server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body(feed)
        .create_async()
        .await;
    server
        .mock("GET", "/pdf/1")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(build_pdf(&["Some body text"]))
        .create_async()
        .await;
    let summarize_mock = server
        .mock("POST", "/summarize")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Model is loading"}"#)
        .expect(3)
        .create_async()
        .await;

    let mut config = config_for(&server, &output);
    config.output.storage_encoding = StorageEncoding::Ascii;

    let report = run(&config).await;

    summarize_mock.assert_async().await;
    assert_eq!(report.state, RunState::Succeeded);
    assert_eq!(report.output.full_papers().len(), 1);
    assert!(report.output.summaries().is_empty());
    assert_eq!(
        read_json(output.path().join("summaries_data.json")),
        serde_json::json!([])
    );
}
