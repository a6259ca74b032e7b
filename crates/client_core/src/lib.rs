use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::AnalysisResult,
    error::AnalysisError,
    protocol::{AnalyzeQuery, AnalyzeResponse, ErrorResponse, ANALYZE_STOCKS_PATH},
};
use tracing::{error, info, warn};
use url::Url;

mod session;
pub use session::{AnalysisSession, RequestState, SubmitStart};

/// Remote stock-analysis service, one request per call.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, query: &AnalyzeQuery) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: Client,
    endpoint: Url,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let endpoint = analyze_endpoint(base_url)?;
        let http = Client::builder()
            .build()
            .context("failed to build analysis HTTP client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Appends the fixed endpoint path to `base_url`, keeping any path prefix the base carries.
pub fn analyze_endpoint(base_url: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(anyhow!("analysis service base url is empty"));
    }
    let endpoint = Url::parse(&format!("{base}{ANALYZE_STOCKS_PATH}"))
        .with_context(|| format!("invalid analysis service base url '{base_url}'"))?;
    match endpoint.scheme() {
        "http" | "https" => Ok(endpoint),
        other => Err(anyhow!(
            "unsupported scheme '{other}' in analysis service base url '{base_url}'"
        )),
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, query: &AnalyzeQuery) -> Result<AnalysisResult, AnalysisError> {
        info!(
            previous_date = %query.previous_date,
            current_date = %query.current_date,
            "requesting stock analysis"
        );
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(query)
            .send()
            .await
            .map_err(|err| {
                error!("analysis request failed before a response: {err}");
                AnalysisError::transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: an unreadable error body just means no structured message.
            let body = response.json::<ErrorResponse>().await.ok();
            let err = AnalysisError::remote(
                status.as_u16(),
                body.as_ref().and_then(ErrorResponse::message),
            );
            error!(status = status.as_u16(), "analysis service returned error: {err}");
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|err| {
            error!("failed to read analysis response body: {err}");
            AnalysisError::transport(err.to_string())
        })?;
        let result = decode_analysis_body(&bytes)?;
        info!(
            status = status.as_u16(),
            rows = result.filtered_stocks.len(),
            processed = result.processed_count,
            warnings = result.warnings.len(),
            "stock analysis received"
        );
        Ok(result)
    }
}

/// Decodes a success body. Missing or null fields default; anything else that does not
/// match the expected shape is a malformed response.
pub fn decode_analysis_body(bytes: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|err| {
        error!("analysis response is not valid JSON: {err}");
        AnalysisError::MalformedResponse(err.to_string())
    })?;
    if !value.is_object() {
        error!("analysis response is not a JSON object");
        return Err(AnalysisError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let body: AnalyzeResponse = serde_json::from_value(value).map_err(|err| {
        error!("analysis response has unexpected shape: {err}");
        AnalysisError::MalformedResponse(err.to_string())
    })?;
    if let Some(service_error) = &body.error {
        warn!(%service_error, "success response carried an error field; ignoring it");
    }
    Ok(body.into())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
