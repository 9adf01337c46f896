//! Integration tests for PubMed Papers
//!
//! These tests run the PubMed source and the full pipeline against a local
//! mockito server standing in for NCBI E-utilities.

use mockito::{Matcher, Server, ServerGuard};
use pubmed_papers::config::{Config, EutilsConfig};
use pubmed_papers::models::{AuthorEntry, RecordId, SearchQuery};
use pubmed_papers::output::{read_csv_file, write_csv_file, CSV_HEADERS};
use pubmed_papers::pipeline;
use pubmed_papers::sources::{LiteratureSource, PubMedSource, SourceError};
use std::collections::HashSet;

const SEARCH_BODY: &str = r#"{
    "header": {"type": "esearch", "version": "0.3"},
    "esearchresult": {
        "count": "2",
        "retmax": "2",
        "retstart": "0",
        "idlist": ["111", "222"]
    }
}"#;

const SUMMARY_BODY: &str = r#"{
    "header": {"type": "esummary", "version": "0.3"},
    "result": {
        "uids": ["222"],
        "222": {
            "uid": "222",
            "pubdate": "2024 Feb 2",
            "title": "Biomarkers of response to checkpoint blockade",
            "authors": [
                {"name": "Doe A", "affiliation": "Acme Pharma Inc."},
                {"name": "Roe B", "affiliation": "Dept. of Biology, University of X"},
                {"name": "Poe C"},
                {"affiliation": "Acme Pharma Inc."},
                {"name": "Moe D", "affiliation": "Genentech"}
            ]
        }
    }
}"#;

async fn start_server() -> (ServerGuard, PubMedSource) {
    let server = Server::new_async().await;
    let config = Config {
        eutils: EutilsConfig::with_base_url(&server.url()),
        ..Config::default()
    };
    let source = PubMedSource::from_config(&config).unwrap();
    (server, source)
}

fn search_matcher(term: &str, retmax: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("db".into(), "pubmed".into()),
        Matcher::UrlEncoded("term".into(), term.into()),
        Matcher::UrlEncoded("retmax".into(), retmax.into()),
        Matcher::UrlEncoded("retmode".into(), "json".into()),
    ])
}

fn summary_matcher(ids: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("db".into(), "pubmed".into()),
        Matcher::UrlEncoded("id".into(), ids.into()),
        Matcher::UrlEncoded("retmode".into(), "json".into()),
    ])
}

#[tokio::test]
async fn test_search_ids_sends_expected_parameters() {
    let (mut server, source) = start_server().await;
    let mock = server
        .mock("GET", "/esearch.fcgi")
        .match_query(search_matcher("cancer immunotherapy", "50"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SEARCH_BODY)
        .create_async()
        .await;

    let ids = source
        .search_ids(&SearchQuery::new("cancer immunotherapy"))
        .await
        .unwrap();

    assert_eq!(ids, vec![RecordId::from("111"), RecordId::from("222")]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_ids_missing_idlist_is_empty() {
    let (mut server, source) = start_server().await;
    let _mock = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult": {"count": "0"}}"#)
        .create_async()
        .await;

    let ids = source.search_ids(&SearchQuery::new("zzzz")).await.unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_search_ids_http_error_is_transport_error() {
    let (mut server, source) = start_server().await;
    let _mock = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = source
        .search_ids(&SearchQuery::new("cancer"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, SourceError::Api(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_fetch_details_follows_input_order_with_missing_ids() {
    let (mut server, source) = start_server().await;
    let mock = server
        .mock("GET", "/esummary.fcgi")
        .match_query(summary_matcher("111,222"))
        .with_status(200)
        .with_body(SUMMARY_BODY)
        .expect(1)
        .create_async()
        .await;

    let records = source
        .fetch_details(&[RecordId::from("111"), RecordId::from("222")])
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "111");
    assert_eq!(records[0].title, "N/A");
    assert_eq!(records[0].publication_date, "N/A");
    assert!(records[0].authors.is_empty());

    assert_eq!(records[1].id.as_str(), "222");
    assert_eq!(records[1].publication_date, "2024 Feb 2");
    assert_eq!(records[1].authors.len(), 5);
    assert_eq!(
        records[1].authors[0],
        AuthorEntry::new("Doe A", "Acme Pharma Inc.")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_details_http_error_has_no_partial_result() {
    let (mut server, source) = start_server().await;
    let _mock = server
        .mock("GET", "/esummary.fcgi")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let result = source.fetch_details(&[RecordId::from("1")]).await;
    assert!(matches!(result, Err(ref e) if e.is_transport()));
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let (mut server, source) = start_server().await;
    let search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(search_matcher("checkpoint", "50"))
        .with_status(200)
        .with_body(SEARCH_BODY)
        .create_async()
        .await;
    let summary = server
        .mock("GET", "/esummary.fcgi")
        .match_query(summary_matcher("111,222"))
        .with_status(200)
        .with_body(SUMMARY_BODY)
        .create_async()
        .await;

    let results = pipeline::run(&source, &SearchQuery::new("checkpoint"))
        .await
        .unwrap();

    search.assert_async().await;
    summary.assert_async().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].non_academic_authors, "");
    assert_eq!(results[0].company_affiliations, "");

    assert_eq!(results[1].non_academic_authors, "Doe A, Unknown, Moe D");
    let companies: HashSet<&str> = results[1].company_affiliations.split(", ").collect();
    assert_eq!(companies, HashSet::from(["Acme Pharma Inc.", "Genentech"]));
}

#[tokio::test]
async fn test_pipeline_no_ids_skips_summary_call() {
    let (mut server, source) = start_server().await;
    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult": {"idlist": []}}"#)
        .create_async()
        .await;
    let summary = server
        .mock("GET", "/esummary.fcgi")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let results = pipeline::run(&source, &SearchQuery::new("nothing"))
        .await
        .unwrap();

    assert!(results.is_empty());
    summary.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_respects_max_results() {
    let (mut server, source) = start_server().await;
    let search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(search_matcher("crispr", "5"))
        .with_status(200)
        .with_body(r#"{"esearchresult": {"idlist": []}}"#)
        .create_async()
        .await;

    pipeline::run(&source, &SearchQuery::new("crispr").max_results(5))
        .await
        .unwrap();

    search.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_results_round_trip_through_csv() {
    let (mut server, source) = start_server().await;
    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SEARCH_BODY)
        .create_async()
        .await;
    let _summary = server
        .mock("GET", "/esummary.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SUMMARY_BODY)
        .create_async()
        .await;

    let results = pipeline::run(&source, &SearchQuery::new("checkpoint"))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papers.csv");
    write_csv_file(&path, &results).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().next().unwrap(), CSV_HEADERS.join(","));

    let parsed = read_csv_file(&path).unwrap();
    assert_eq!(parsed, results);
}
