use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::record::SeriesKind;
use crate::utils::errors::ChartError;

/// Alpha Vantage API client for fetching stock time series.
///
/// The API key is injected at construction; it is never read from a global.
pub struct AlphaVantageClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    const DEFAULT_BASE_URL: &'static str = "https://www.alphavantage.co/query";

    /// Bar width used for every intraday request.
    const INTRADAY_INTERVAL: &'static str = "15min";

    /// One external call per chart request, so a generous single timeout.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new Alpha Vantage client.
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url,
        }
    }

    /// GET the raw keyed time series for `(symbol, kind)`.
    ///
    /// Returns the full JSON payload untouched; finding the nested time
    /// series inside it is the normalizer's job. One attempt, no retries;
    /// transport failures and non-2xx statuses become `ChartError::Fetch`.
    pub async fn fetch_series(
        &self,
        symbol: &str,
        kind: SeriesKind,
    ) -> Result<Value, ChartError> {
        let mut url = format!(
            "{}?function={}&symbol={}",
            self.base_url,
            kind.query_function(),
            symbol
        );
        if kind == SeriesKind::Intraday {
            url.push_str(&format!("&interval={}", Self::INTRADAY_INTERVAL));
        }
        debug!("Requesting {} for {}", kind.query_function(), symbol);

        let response = self
            .http_client
            .get(format!("{}&apikey={}", url, self.api_key))
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ChartError::Fetch(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!("Alpha Vantage returned HTTP {}: {}", status, body_text);
            return Err(ChartError::Fetch(format!("HTTP {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ChartError::Fetch(format!("Failed to parse response: {}", e)))
    }
}
