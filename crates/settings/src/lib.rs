use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared::domain::{
    category_ids, flatten_categories, BookmarkEntry, Category, CategoryId, Link,
};
use tracing::{debug, info};

mod defaults;

pub use defaults::default_categories;

pub const DEFAULT_SETTINGS_PATH: &str = "startpage.toml";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoistSettings {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub visible_count: usize,
    pub wheel_debounce_ms: u64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            visible_count: 4,
            wheel_debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub clock_12h: bool,
    pub temp_imperial: bool,
    pub wind_imperial: bool,
    pub single_prefix_match_navigates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todoist: Option<TodoistSettings>,
    pub carousel: CarouselSettings,
    pub categories: Vec<Category>,
}

impl Settings {
    /// Seeded with the default categories, as a fresh install shows them.
    pub fn seeded() -> Self {
        Self {
            categories: default_categories(),
            ..Self::default()
        }
    }

    pub fn weather_location(&self) -> Option<WeatherLocation> {
        self.weather
            .filter(|loc| loc.lat.is_finite() && loc.lon.is_finite())
    }

    pub fn todoist_token(&self) -> Option<&str> {
        self.todoist
            .as_ref()
            .map(|todoist| todoist.token.trim())
            .filter(|token| !token.is_empty())
    }

    pub fn bookmark_entries(&self) -> Vec<BookmarkEntry> {
        flatten_categories(&self.categories)
    }

    pub fn category_ids(&self) -> Vec<CategoryId> {
        category_ids(&self.categories)
    }
}

pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

    let mut settings = match read_settings_file(&path)? {
        Some(settings) => settings,
        None => {
            debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings.categories = sanitize_categories(settings.categories);
    if settings.categories.is_empty() {
        info!("no categories configured, seeding defaults");
        settings.categories = default_categories();
    }

    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    ensure_parent_dir_exists(path)?;
    let raw = toml::to_string_pretty(settings).context("failed to encode settings")?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write settings to '{}'", path.display()))?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let settings = toml::from_str(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    Ok(Some(settings))
}

/// Unparseable values are ignored and the file/default value stays.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__CLOCK_12H").as_deref().and_then(parse_flag) {
        settings.clock_12h = v;
    }
    if let Some(v) = lookup("APP__TEMP_IMPERIAL").as_deref().and_then(parse_flag) {
        settings.temp_imperial = v;
    }
    if let Some(v) = lookup("APP__WIND_IMPERIAL").as_deref().and_then(parse_flag) {
        settings.wind_imperial = v;
    }
    if let Some(v) = lookup("APP__SINGLE_PREFIX_MATCH_NAVIGATES")
        .as_deref()
        .and_then(parse_flag)
    {
        settings.single_prefix_match_navigates = v;
    }

    let lat = lookup("APP__WEATHER_LAT").and_then(|v| v.trim().parse::<f64>().ok());
    let lon = lookup("APP__WEATHER_LON").and_then(|v| v.trim().parse::<f64>().ok());
    if let (Some(lat), Some(lon)) = (lat, lon) {
        settings.weather = Some(WeatherLocation { lat, lon });
    }

    if let Some(token) = lookup("APP__TODOIST_TOKEN") {
        settings.todoist = Some(TodoistSettings { token });
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Trims every field, drops links with neither title nor URL and categories
/// with neither title nor links.
pub fn sanitize_categories(categories: Vec<Category>) -> Vec<Category> {
    categories
        .into_iter()
        .filter_map(|category| {
            let links: Vec<_> = category
                .links
                .into_iter()
                .map(|link| Link {
                    title: link.title.trim().to_string(),
                    url: link.url.trim().to_string(),
                    icon: link.icon.trim().to_string(),
                })
                .filter(|link| !link.title.is_empty() || !link.url.is_empty())
                .collect();
            let title = category.title.trim().to_string();
            if title.is_empty() && links.is_empty() {
                return None;
            }
            Some(Category {
                title,
                icon: category.icon.trim().to_string(),
                links,
            })
        })
        .collect()
}

fn ensure_parent_dir_exists(path: &Path) -> anyhow::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for settings file '{}'",
            parent.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
