//! Current weather from OpenWeatherMap
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity: i64,
}

impl WeatherReport {
    pub fn describe(&self) -> String {
        format!(
            "The weather in {} is {}, temperature {}°C, humidity {}%.",
            self.city, self.description, self.temperature_c, self.humidity
        )
    }
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    /// `Ok(None)` when the service answered but refused the request
    async fn lookup(&self, city: &str) -> Result<Option<WeatherReport>>;
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(OpenWeatherClient {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    async fn lookup(&self, city: &str) -> Result<Option<WeatherReport>> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/data/2.5/weather", self.base_url),
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
        )?;

        debug!("Fetching weather for {city}");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("Weather request timed out after {REQUEST_TIMEOUT:?}")
            } else {
                anyhow!("Weather request failed: {e}")
            }
        })?;

        // Error bodies carry "cod" too, so parse regardless of status
        let body: Value = response.json().await?;
        let report = report_from_json(city, &body);
        if report.is_none() {
            warn!("Weather service refused request: {body}");
        }
        Ok(report)
    }
}

/// `cod` is a number on success and sometimes a string on errors
fn response_code(body: &Value) -> Option<i64> {
    match body.get("cod")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn report_from_json(city: &str, body: &Value) -> Option<WeatherReport> {
    if response_code(body) != Some(200) {
        return None;
    }

    let description = body
        .get("weather")?
        .get(0)?
        .get("description")?
        .as_str()?
        .to_string();
    let main = body.get("main")?;

    Some(WeatherReport {
        city: city.to_string(),
        description,
        temperature_c: main.get("temp")?.as_f64()?,
        humidity: main.get("humidity")?.as_i64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_from_success_body() {
        let body = json!({
            "cod": 200,
            "weather": [{"description": "clear sky"}],
            "main": {"temp": 31.5, "humidity": 40}
        });
        let report = report_from_json("Islamabad", &body).unwrap();
        assert_eq!(
            report.describe(),
            "The weather in Islamabad is clear sky, temperature 31.5°C, humidity 40%."
        );
    }

    #[test]
    fn test_refused_request() {
        let body = json!({"cod": "404", "message": "city not found"});
        assert_eq!(report_from_json("Atlantis", &body), None);

        let unauthorized = json!({"cod": 401, "message": "Invalid API key"});
        assert_eq!(report_from_json("Islamabad", &unauthorized), None);
    }

    #[test]
    fn test_missing_fields_are_refused() {
        let body = json!({"cod": 200, "weather": []});
        assert_eq!(report_from_json("Islamabad", &body), None);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_error() {
        let client = OpenWeatherClient::with_base_url("key", "http://127.0.0.1:9").unwrap();
        assert!(client.lookup("Islamabad").await.is_err());
    }
}
