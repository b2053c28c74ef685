use serde::Deserialize;

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Shown when the provider rejects a request without a `message`.
pub const FALLBACK_MESSAGE: &str = "Error fetching weather data";

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// The parts of a 200 body that are read. Anything else in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse {
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    /// Kelvin
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionBlock {
    pub description: String,
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    pub description: String,
}

impl std::fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Temperature: {:.2}°C\nWeather: {}",
            self.temperature_celsius, self.description
        )
    }
}

impl TryFrom<ProviderResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(body: ProviderResponse) -> Result<Self, Self::Error> {
        let main = body
            .main
            .ok_or_else(|| WeatherError::Parse("missing key 'main'".to_string()))?;
        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("empty 'weather' list".to_string()))?;

        Ok(Self {
            temperature_celsius: kelvin_to_celsius(main.temp),
            description: condition.description,
        })
    }
}

/// Outcome of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    /// Status 200 with a usable body
    Current(WeatherSnapshot),
    /// Any other status; carries the provider's message or the fallback
    Rejected(String),
}

impl WeatherReport {
    pub fn display_text(&self) -> String {
        match self {
            WeatherReport::Current(snapshot) => snapshot.to_string(),
            WeatherReport::Rejected(message) => message.clone(),
        }
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
