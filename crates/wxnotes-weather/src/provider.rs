use crate::types::{
    ProviderResponse, WeatherError, WeatherReport, WeatherSnapshot, FALLBACK_MESSAGE,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

const OPENWEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Client for the current-weather endpoint.
///
/// Uses the HTTP client's default timeout; there is no retry and no caching,
/// so every call hits the provider.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions for `city`.
    ///
    /// A non-200 answer is not an error: it yields `WeatherReport::Rejected`
    /// with the provider's message.
    ///
    /// # Errors
    /// `WeatherError::Network` on transport failure, `WeatherError::Parse`
    /// when the body is not JSON or a 200 body lacks the expected keys.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))?;
        tracing::debug!(%status, %body, "Weather provider response");

        if status == StatusCode::OK {
            let parsed: ProviderResponse =
                serde_json::from_value(body).map_err(|e| WeatherError::Parse(e.to_string()))?;
            Ok(WeatherReport::Current(WeatherSnapshot::try_from(parsed)?))
        } else {
            let message = match body.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => FALLBACK_MESSAGE.to_string(),
                Some(other) => other.to_string(),
            };
            tracing::info!(%status, "Weather provider rejected request: {}", message);
            Ok(WeatherReport::Rejected(message))
        }
    }
}
