//! Open-Meteo current conditions: request URL, code tables and the summary
//! strings the weather card shows. Fetching is left to the shell.

use serde::Deserialize;
use url::Url;

pub const FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,wind_speed_10m,weather_code,is_day";
pub const UNAVAILABLE_TEXT: &str = "Weather unavailable";
pub const UNCONFIGURED_TEXT: &str = "Configure in settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_imperial(imperial: bool) -> Self {
        if imperial {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }

    fn query_value(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindUnit {
    Kmh,
    Mph,
}

impl WindUnit {
    pub fn from_imperial(imperial: bool) -> Self {
        if imperial {
            Self::Mph
        } else {
            Self::Kmh
        }
    }

    fn query_value(self) -> &'static str {
        match self {
            Self::Kmh => "kmh",
            Self::Mph => "mph",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kmh => "km/h",
            Self::Mph => "mph",
        }
    }
}

pub fn forecast_url(
    lat: f64,
    lon: f64,
    temperature: TemperatureUnit,
    wind: WindUnit,
) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        FORECAST_ENDPOINT,
        &[
            ("latitude", lat.to_string().as_str()),
            ("longitude", lon.to_string().as_str()),
            ("current", CURRENT_FIELDS),
            ("temperature_unit", temperature.query_value()),
            ("windspeed_unit", wind.query_value()),
        ],
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    pub weather_code: u16,
    pub is_day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSummary {
    pub temperature: String,
    pub feels_like: String,
    pub wind: String,
    pub description: &'static str,
    pub icon: &'static str,
}

pub fn summarize(
    current: &CurrentConditions,
    temperature: TemperatureUnit,
    wind: WindUnit,
) -> WeatherSummary {
    let is_night = current.is_day == 0;
    WeatherSummary {
        temperature: format!(
            "{}°{}",
            round_half_up(current.temperature),
            temperature.symbol()
        ),
        feels_like: format!("Feels {}°", round_half_up(current.apparent_temperature)),
        wind: format!("{} {}", round_half_up(current.wind_speed), wind.label()),
        description: describe(current.weather_code),
        icon: icon_name(current.weather_code, is_night),
    }
}

// halves round towards positive infinity, so -2.5 shows as -2
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn describe(code: u16) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Rain showers",
        81 => "Heavy rain showers",
        82 => "Violent rain showers",
        85 => "Snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with hail",
        99 => "Thunderstorm with heavy hail",
        _ => "",
    }
}

pub fn icon_name(code: u16, is_night: bool) -> &'static str {
    match code {
        0 if is_night => "moon",
        1 if is_night => "moon-star",
        0 | 1 => "sun",
        2 => "cloud-sun",
        3 => "cloud",
        45 | 48 => "fog",
        51..=57 | 61..=67 | 80..=82 => "cloud-rain",
        71..=77 | 85 | 86 => "cloud-snow",
        95..=u16::MAX => "cloud-lightning",
        _ => "cloud",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_forecast_url_with_units() {
        let url = forecast_url(52.52, 13.41, TemperatureUnit::Fahrenheit, WindUnit::Mph)
            .expect("url");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("api.open-meteo.com"));
        assert!(pairs.contains(&("latitude".into(), "52.52".into())));
        assert!(pairs.contains(&("current".into(), CURRENT_FIELDS.into())));
        assert!(pairs.contains(&("temperature_unit".into(), "fahrenheit".into())));
        assert!(pairs.contains(&("windspeed_unit".into(), "mph".into())));
    }

    #[test]
    fn icon_depends_on_code_and_daylight() {
        assert_eq!(icon_name(0, false), "sun");
        assert_eq!(icon_name(0, true), "moon");
        assert_eq!(icon_name(1, true), "moon-star");
        assert_eq!(icon_name(63, false), "cloud-rain");
        assert_eq!(icon_name(86, true), "cloud-snow");
        assert_eq!(icon_name(99, false), "cloud-lightning");
        assert_eq!(icon_name(60, false), "cloud");
    }

    #[test]
    fn unknown_codes_have_no_description() {
        assert_eq!(describe(45), "Fog");
        assert_eq!(describe(4), "");
    }

    #[test]
    fn summary_rounds_like_the_card() {
        let current: CurrentConditions = serde_json::from_str(
            r#"{"temperature_2m":-2.5,"apparent_temperature":-6.6,"wind_speed_10m":11.5,"weather_code":73,"is_day":0}"#,
        )
        .expect("json");

        let summary = summarize(&current, TemperatureUnit::Celsius, WindUnit::Kmh);
        assert_eq!(summary.temperature, "-2°C");
        assert_eq!(summary.feels_like, "Feels -7°");
        assert_eq!(summary.wind, "12 km/h");
        assert_eq!(summary.description, "Moderate snow");
        assert_eq!(summary.icon, "cloud-snow");
    }
}
