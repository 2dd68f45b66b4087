use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("food name is empty after normalization")]
    EmptyQuery,
    #[error("nutrition request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("nutrition API returned a body that is not JSON: {source}")]
    InvalidBody {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

/// Result of a lookup that reached the nutrition API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NutritionOutcome {
    /// HTTP 200; the parsed body exactly as the API returned it.
    Found { data: Value },
    /// Any other status, with the raw response text.
    Failed { code: u16, body: String },
}

/// Lowercases and trims a label so it can be used as a lookup key.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct NutritionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl NutritionClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, api_key)
    }

    pub fn with_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub async fn lookup(&self, label: &str) -> Result<NutritionOutcome, NutritionError> {
        let query = normalize_label(label);
        if query.is_empty() {
            return Err(NutritionError::EmptyQuery);
        }

        info!(%query, "querying nutrition API");

        let mut request = self.http.get(&self.endpoint).query(&[("query", query.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let preview: String = body.chars().take(500).collect();
        debug!(%status, body = %preview, "nutrition API response");

        if status != StatusCode::OK {
            warn!(code = status.as_u16(), "nutrition lookup failed");
            return Ok(NutritionOutcome::Failed {
                code: status.as_u16(),
                body,
            });
        }

        let data = serde_json::from_str(&body)
            .map_err(|source| NutritionError::InvalidBody { source, body })?;
        Ok(NutritionOutcome::Found { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lowercases_and_trims() {
        assert_eq!(normalize_label("  Granny Smith \n"), "granny smith");
        assert_eq!(normalize_label("hot dog, hotdog, red hot"), "hot dog, hotdog, red hot");
        assert_eq!(normalize_label("   "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for label in ["Banana", "  Pizza, pizza pie ", "ice cream, icecream", "ÉCLAIR", ""] {
            let once = normalize_label(label);
            assert_eq!(normalize_label(&once), once);
        }
    }

    #[tokio::test]
    async fn blank_labels_never_reach_the_network() {
        // Nothing listens on port 9; a request attempt would surface as Transport.
        let client = NutritionClient::new("http://127.0.0.1:9/v1/nutrition", None);
        let err = client.lookup(" \t ").await.unwrap_err();
        assert!(matches!(err, NutritionError::EmptyQuery));
    }

    #[test]
    fn outcomes_serialize_with_a_status_tag() {
        let found = NutritionOutcome::Found {
            data: serde_json::json!([]),
        };
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            serde_json::json!({ "status": "found", "data": [] })
        );

        let failed = NutritionOutcome::Failed {
            code: 404,
            body: "nope".into(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({ "status": "failed", "code": 404, "body": "nope" })
        );
    }
}
