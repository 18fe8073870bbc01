use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub mod error;
pub mod handlers;
pub mod pages;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let audio = ServeDir::new(&state.audio_dir);

    Router::new()
        .route("/", get(handlers::form).post(handlers::submit))
        .route("/analyze", get(handlers::analyze))
        .nest_service("/audio", audio)
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use nv_core::{AnalysisResult, Error, Result};
    pub use crate::{create_app, AppState};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use nv_core::{RawArticle, SearchBackend};
    use nv_inference::embeddings::HashingEmbedder;
    use nv_inference::models::LexiconSentiment;
    use nv_inference::{KeyBertModel, SentimentClassifier, TopicExtractor};
    use nv_narration::{AudioOutput, Narrator, PassthroughTranslator, SilentSynthesizer};
    use nv_pipeline::Pipeline;
    use nv_sources::search::FixtureSearch;
    use nv_sources::ArticleSource;

    #[derive(Debug)]
    struct UnreachableSearch;

    #[async_trait]
    impl SearchBackend for UnreachableSearch {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn search(&self, _query: &str) -> nv_core::Result<Vec<RawArticle>> {
            Err(nv_core::Error::External(anyhow::anyhow!("connection refused")))
        }
    }

    fn state(search: Arc<dyn SearchBackend>, audio_dir: &std::path::Path) -> AppState {
        let pipeline = Pipeline::new(
            ArticleSource::new(search),
            TopicExtractor::new(Arc::new(KeyBertModel::new(Arc::new(HashingEmbedder::default())))),
            SentimentClassifier::new(Arc::new(LexiconSentiment::new())),
            Narrator::new(
                Arc::new(PassthroughTranslator),
                Arc::new(SilentSynthesizer),
                AudioOutput::Directory(audio_dir.to_path_buf()),
            ),
        );
        AppState::new(Arc::new(pipeline), audio_dir)
    }

    fn acme_search() -> Arc<dyn SearchBackend> {
        Arc::new(FixtureSearch::new(vec![
            RawArticle {
                title: Some("Acme profits soar".to_string()),
                description: Some("Record quarter".to_string()),
                content: Some("Acme profits soar to a record as sales surge".to_string()),
            },
            RawArticle {
                title: Some("Acme statement".to_string()),
                description: None,
                content: None,
            },
        ]))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_returns_report() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_app(state(acme_search(), dir.path())).await;

        let response = app
            .oneshot(Request::get("/analyze?company_name=Acme").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["Company"], "Acme");
        assert_eq!(value["Articles"].as_array().unwrap().len(), 2);
        assert_eq!(value["Comparative Sentiment Score"]["Sentiment Distribution"]["Positive"], 1);
        assert_eq!(value["Comparative Sentiment Score"]["Sentiment Distribution"]["Neutral"], 1);
        assert_eq!(
            value["Final Sentiment Summary"],
            "Overall sentiment is positive, indicating positive market perception."
        );
        assert!(value["Audio File"].as_str().unwrap().ends_with(".mp3"));
    }

    #[tokio::test]
    async fn test_analyze_upstream_failure_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_app(state(Arc::new(UnreachableSearch), dir.path())).await;

        let response = app
            .oneshot(Request::get("/analyze?company_name=Acme").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let value = body_json(response).await;
        assert!(value["error"].as_str().unwrap().contains("Source unavailable"));
    }

    #[tokio::test]
    async fn test_analyze_requires_company_name() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_app(state(acme_search(), dir.path())).await;

        let response = app
            .oneshot(Request::get("/analyze").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_form_submission_links_audio() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_app(state(acme_search(), dir.path())).await;

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("company_name=Acme"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("&quot;Company&quot;: &quot;Acme&quot;"));

        let start = page.find("src=\"/audio/").unwrap() + "src=\"".len();
        let end = start + page[start..].find('"').unwrap();
        let audio_url = page[start..end].to_string();

        let response = app
            .oneshot(Request::get(audio_url.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let audio = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!audio.is_empty());
    }
}
