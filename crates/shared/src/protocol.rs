use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisResult, StockChange, TradingDate};

pub const ANALYZE_STOCKS_PATH: &str = "/api/analyze_stocks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeQuery {
    pub previous_date: TradingDate,
    pub current_date: TradingDate,
}

/// Success body of `GET /api/analyze_stocks`. Every field may be missing or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_stocks: Option<Vec<StockChange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_stocks_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(value: AnalyzeResponse) -> Self {
        Self {
            filtered_stocks: value.filtered_stocks.unwrap_or_default(),
            processed_count: value.processed_stocks_count.unwrap_or_default(),
            warnings: value.errors_list.unwrap_or_default(),
        }
    }
}

/// Failure body; the service is not required to send one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_fields_default_to_empty() {
        let body: AnalyzeResponse =
            serde_json::from_str(r#"{"filtered_stocks": null}"#).expect("decode");
        let result = AnalysisResult::from(body);
        assert!(result.filtered_stocks.is_empty());
        assert_eq!(result.processed_count, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn wrongly_typed_list_is_rejected() {
        let decoded = serde_json::from_str::<AnalyzeResponse>(r#"{"errors_list": "oops"}"#);
        assert!(decoded.is_err());
    }

    #[test]
    fn query_serializes_dates_as_iso_strings() {
        let query = AnalyzeQuery {
            previous_date: TradingDate::parse("2025-05-16").expect("date"),
            current_date: TradingDate::parse("2025-05-17").expect("date"),
        };
        let value = serde_json::to_value(query).expect("encode");
        assert_eq!(value["previous_date"], "2025-05-16");
        assert_eq!(value["current_date"], "2025-05-17");
    }

    #[test]
    fn empty_error_field_is_not_a_message() {
        let body = ErrorResponse {
            error: Some(String::new()),
        };
        assert_eq!(body.message(), None);
    }
}
