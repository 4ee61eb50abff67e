use super::*;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn missing_file_seeds_default_categories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(Some(dir.path().join("absent.toml").as_path())).expect("load");

    assert_eq!(settings.categories.len(), 4);
    assert_eq!(settings.categories[0].title, "Search");
    assert_eq!(settings.carousel, CarouselSettings::default());
    assert!(!settings.single_prefix_match_navigates);
}

#[test]
fn reads_nested_categories_from_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("startpage.toml");
    fs::write(
        &path,
        r#"
clock_12h = true
single_prefix_match_navigates = true

[weather]
lat = 52.52
lon = 13.41

[carousel]
visible_count = 3

[[categories]]
title = "Work"
icon = "briefcase"

[[categories.links]]
title = "Tracker"
url = "https://tracker.example"

[[categories.links]]
title = "  "
url = ""
"#,
    )
    .expect("write");

    let settings = load_settings(Some(path.as_path())).expect("load");
    assert!(settings.clock_12h);
    assert!(settings.single_prefix_match_navigates);
    assert_eq!(settings.carousel.visible_count, 3);
    assert_eq!(settings.carousel.wheel_debounce_ms, 200);
    assert_eq!(
        settings.weather_location(),
        Some(WeatherLocation {
            lat: 52.52,
            lon: 13.41
        })
    );
    assert_eq!(settings.categories.len(), 1);
    assert_eq!(settings.categories[0].links.len(), 1);

    let entries = settings.bookmark_entries();
    assert_eq!(entries[0].title, "Tracker");
    assert_eq!(settings.category_ids(), vec![CategoryId(0)]);
}

#[test]
fn invalid_file_is_an_error_with_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "clock_12h = \"sometimes\"").expect("write");

    let err = load_settings(Some(path.as_path())).expect_err("should fail");
    assert!(err.to_string().contains("invalid settings file"));
}

#[test]
fn save_then_load_keeps_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("startpage.toml");

    let mut settings = Settings::seeded();
    settings.wind_imperial = true;
    settings.todoist = Some(TodoistSettings {
        token: "abc".into(),
    });
    save_settings(&path, &settings).expect("save");

    let loaded = load_settings(Some(path.as_path())).expect("load");
    assert_eq!(loaded.categories, settings.categories);
    assert!(loaded.wind_imperial);
    assert_eq!(loaded.todoist_token(), Some("abc"));
}

#[test]
fn env_overrides_win_and_bad_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env(&[
            ("APP__CLOCK_12H", "yes"),
            ("APP__TEMP_IMPERIAL", "maybe"),
            ("APP__SINGLE_PREFIX_MATCH_NAVIGATES", "1"),
            ("APP__WEATHER_LAT", "40.7"),
            ("APP__WEATHER_LON", "-74.0"),
            ("APP__TODOIST_TOKEN", "tok"),
        ]),
    );

    assert!(settings.clock_12h);
    assert!(!settings.temp_imperial);
    assert!(settings.single_prefix_match_navigates);
    assert_eq!(
        settings.weather,
        Some(WeatherLocation {
            lat: 40.7,
            lon: -74.0
        })
    );
    assert_eq!(settings.todoist_token(), Some("tok"));
}

#[test]
fn weather_needs_both_coordinates() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env(&[("APP__WEATHER_LAT", "40.7")]));
    assert_eq!(settings.weather, None);
}

#[test]
fn non_finite_weather_and_blank_token_count_as_unconfigured() {
    let settings = Settings {
        weather: Some(WeatherLocation {
            lat: f64::NAN,
            lon: 1.0,
        }),
        todoist: Some(TodoistSettings {
            token: "   ".into(),
        }),
        ..Settings::default()
    };
    assert_eq!(settings.weather_location(), None);
    assert_eq!(settings.todoist_token(), None);
}

#[test]
fn sanitize_drops_empty_rows_and_trims() {
    let categories = vec![
        Category {
            title: "  Reading ".into(),
            icon: " book ".into(),
            links: vec![
                Link::new(" Blog ", " https://blog.example ", ""),
                Link::new("", "", "star"),
                Link::new("", "https://untitled.example", ""),
            ],
        },
        Category {
            title: "   ".into(),
            icon: "x".into(),
            links: vec![Link::new(" ", " ", "")],
        },
    ];

    let cleaned = sanitize_categories(categories);
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].title, "Reading");
    assert_eq!(cleaned[0].icon, "book");
    assert_eq!(
        cleaned[0].links,
        vec![
            Link::new("Blog", "https://blog.example", ""),
            Link::new("", "https://untitled.example", ""),
        ]
    );
}
