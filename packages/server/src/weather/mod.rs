use chrono::{DateTime, NaiveDate, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::WeatherConfig;

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("forecast request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed forecast response")]
    Malformed,
}

/// Snow report for one coordinate pair. `weather_code` is the provider's raw
/// WMO code, passed through unmapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnowReport {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub snowfall_cm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow_depth_cm: Option<f64>,
    pub weather_code: i32,
    pub daily: Vec<DailySnowfall>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySnowfall {
    pub date: NaiveDate,
    pub snowfall_sum_cm: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    snowfall: f64,
    snow_depth: Option<f64>, // meters
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    snowfall_sum: Vec<Option<f64>>,
}

/// Open-Meteo forecast client with a per-coordinate TTL cache, so a house
/// full of dashboard tabs does not hammer the upstream API.
pub struct WeatherService {
    client: Arc<reqwest::Client>,
    cache: Cache<String, SnowReport>,
    forecast_url: String,
}

impl WeatherService {
    pub fn new(client: Arc<reqwest::Client>, config: &WeatherConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();
        Self {
            client,
            cache,
            forecast_url: config.forecast_url.clone(),
        }
    }

    pub async fn snow_report(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<SnowReport, WeatherError> {
        let key = format!("{latitude:.3},{longitude:.3}");
        if let Some(hit) = self.cache.get(&key).await {
            debug!("snow report cache hit for {key}");
            return Ok(hit);
        }

        let response: ForecastResponse = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,snowfall,snow_depth,weather_code".to_string(),
                ),
                ("daily", "snowfall_sum".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.daily.time.len() != response.daily.snowfall_sum.len() {
            return Err(WeatherError::Malformed);
        }

        let daily = response
            .daily
            .time
            .into_iter()
            .zip(response.daily.snowfall_sum)
            .map(|(date, snowfall_sum)| DailySnowfall {
                date,
                snowfall_sum_cm: snowfall_sum.unwrap_or(0.0),
            })
            .collect();

        let report = SnowReport {
            latitude,
            longitude,
            temperature_c: response.current.temperature_2m,
            snowfall_cm: response.current.snowfall,
            snow_depth_cm: response.current.snow_depth.map(|meters| meters * 100.0),
            weather_code: response.current.weather_code,
            daily,
            fetched_at: Utc::now(),
        };
        self.cache.insert(key, report.clone()).await;
        Ok(report)
    }
}
