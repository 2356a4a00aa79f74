//! Data contract for the external weather provider. Nothing in the core
//! fetches weather; adapters fill this in and hand it to a display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: String,
    pub temperature: f64,
    pub condition: String,
    /// Percent.
    pub humidity: u8,
    pub wind_speed: f64,
    pub forecast: [DailyForecast; FORECAST_DAYS],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_payload() {
        let day = |d: u32| {
            format!(r#"{{"date":"2024-07-0{d}","high":24.0,"low":15.5,"condition":"Sunny"}}"#)
        };
        let json = format!(
            r#"{{"location":"Lisbon","temperature":22.5,"condition":"Clear","humidity":40,
                "windSpeed":11.0,"forecast":[{},{},{},{},{}]}}"#,
            day(1),
            day(2),
            day(3),
            day(4),
            day(5)
        );
        let report: WeatherReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.location, "Lisbon");
        assert_eq!(report.wind_speed, 11.0);
        assert_eq!(report.forecast[4].date, NaiveDate::from_ymd_opt(2024, 7, 5).unwrap());
    }

    #[test]
    fn rejects_short_forecast() {
        let json = r#"{"location":"X","temperature":1.0,"condition":"Rain","humidity":90,
            "windSpeed":3.0,"forecast":[]}"#;
        assert!(serde_json::from_str::<WeatherReport>(json).is_err());
    }
}
