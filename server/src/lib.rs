//! HTTP serving layer: loads nothing itself, just exposes `GET /search` over
//! an already-loaded read-only index.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use engine::{EngineError, Index, Ranker, RankerType, ScoredDocument};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

/// Raw query-string parameters, validated per request by [`SearchRequest::validate`].
#[derive(Debug, Deserialize)]
pub struct RawSearchParams {
    query: Option<String>,
    ranker: Option<String>,
    format: Option<String>,
    #[serde(rename = "numResults")]
    num_results: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Text,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, ()> {
        match name {
            "html" => Ok(OutputFormat::Html),
            "text" => Ok(OutputFormat::Text),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
struct SearchRequest {
    query: String,
    ranker: RankerType,
    format: OutputFormat,
    num_results: usize,
}

impl SearchRequest {
    /// All four parameters are required. A failure here is reported back to
    /// the offending request only; it never affects process state.
    fn validate(params: RawSearchParams) -> Result<Self, EngineError> {
        let query = params
            .query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| invalid("query", "missing or empty search query"))?;
        let ranker_name = params
            .ranker
            .ok_or_else(|| invalid("ranker", "missing ranker name"))?;
        let ranker = ranker_name
            .parse::<RankerType>()
            .map_err(|_| invalid("ranker", format!("no such ranker '{ranker_name}'")))?;
        let format_name = params
            .format
            .ok_or_else(|| invalid("format", "missing results format"))?;
        let format = format_name
            .parse::<OutputFormat>()
            .map_err(|_| invalid("format", format!("no such format '{format_name}'")))?;
        let num_results_raw = params
            .num_results
            .ok_or_else(|| invalid("numResults", "missing number of results"))?;
        let num_results = num_results_raw
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                invalid(
                    "numResults",
                    format!("expected a positive integer, got '{num_results_raw}'"),
                )
            })?;
        Ok(Self {
            query,
            ranker,
            format,
            num_results,
        })
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidQueryParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

pub fn build_app(index: Index) -> Router {
    let state = AppState {
        index: Arc::new(index),
    };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<RawSearchParams>,
) -> Response {
    let request = match SearchRequest::validate(params) {
        Ok(request) => request,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };
    tracing::info!(
        query = %request.query,
        ranker = %request.ranker,
        num_results = request.num_results,
        "handling search request"
    );

    let ranker = Ranker::new(request.ranker, &state.index, &request.query);
    let results = ranker.run(&state.index, request.num_results);

    match request.format {
        OutputFormat::Text => render_text(&state.index, &results).into_response(),
        OutputFormat::Html => Html(render_html(&state.index, &request.query, &results)).into_response(),
    }
}

/// One line per result: document id, title and score, tab-separated.
fn render_text(index: &Index, results: &[ScoredDocument]) -> String {
    let mut out = String::new();
    for scored in results {
        if let Some(doc) = index.document(scored.doc_id) {
            out.push_str(&format!("{}\t{}\t{}\n", doc.doc_id, doc.title, scored.score));
        }
    }
    out
}

fn render_html(index: &Index, query: &str, results: &[ScoredDocument]) -> String {
    let mut rows = String::new();
    for scored in results {
        if let Some(doc) = index.document(scored.doc_id) {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                doc.doc_id,
                escape_html(&doc.title),
                scored.score
            ));
        }
    }
    format!(
        "<!DOCTYPE html><html><head><title>Search Result</title></head><body>\
         <h3>Results for: {}</h3>\
         <table border='1' cellpadding='6' cellspacing='1'>\
         <tr><th>Document Id</th><th>Title</th><th>Score</th></tr>{rows}</table>\
         </body></html>",
        escape_html(query)
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        query: Option<&str>,
        ranker: Option<&str>,
        format: Option<&str>,
        num_results: Option<&str>,
    ) -> RawSearchParams {
        RawSearchParams {
            query: query.map(String::from),
            ranker: ranker.map(String::from),
            format: format.map(String::from),
            num_results: num_results.map(String::from),
        }
    }

    #[test]
    fn accepts_a_fully_specified_request() {
        let request =
            SearchRequest::validate(params(Some("rust"), Some("cosine"), Some("text"), Some("5")))
                .unwrap();
        assert_eq!(request.query, "rust");
        assert_eq!(request.ranker, RankerType::Cosine);
        assert_eq!(request.format, OutputFormat::Text);
        assert_eq!(request.num_results, 5);
    }

    #[test]
    fn rejects_missing_or_empty_query() {
        for query in [None, Some(""), Some("   ")] {
            let err =
                SearchRequest::validate(params(query, Some("cosine"), Some("text"), Some("5")))
                    .unwrap_err();
            assert!(err.to_string().contains("query"));
        }
    }

    #[test]
    fn rejects_unknown_ranker_and_format() {
        let err =
            SearchRequest::validate(params(Some("q"), Some("pagerank"), Some("text"), Some("5")))
                .unwrap_err();
        assert!(err.to_string().contains("ranker"));

        let err =
            SearchRequest::validate(params(Some("q"), Some("cosine"), Some("xml"), Some("5")))
                .unwrap_err();
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn rejects_non_positive_num_results() {
        for bad in ["0", "-3", "ten"] {
            let err =
                SearchRequest::validate(params(Some("q"), Some("cosine"), Some("text"), Some(bad)))
                    .unwrap_err();
            assert!(err.to_string().contains("numResults"));
        }
    }

    #[test]
    fn escapes_html_in_titles() {
        assert_eq!(escape_html("<b>&title</b>"), "&lt;b&gt;&amp;title&lt;/b&gt;");
    }
}
