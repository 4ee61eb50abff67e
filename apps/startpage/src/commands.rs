use std::{
    cell::Cell,
    io::{BufRead, Read, Write},
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use carousel::{scroll_command, Carousel, Clock, Direction, Key, StepperState, WheelDelta};
use command_bar::{
    category_counts, evaluate, evaluator::display_value, route, CommandBar, MatchResult,
    RoutePolicy,
};
use clap::Args;
use serde::Serialize;
use settings::{save_settings, Settings};
use shared::{domain::CategoryId, error::ErrorCode, protocol::ScrollCommand};
use tracing::{info, warn};
use widgets::{
    clock::format_clock,
    tasks::{count_label, due_label, sort_by_due, top_tasks, Task, NO_TASKS_TEXT},
    weather::{forecast_url, TemperatureUnit, WindUnit, UNCONFIGURED_TEXT},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTarget {
    Next,
    Prev,
    Index(i64),
}

pub fn parse_step_target(raw: &str) -> Result<StepTarget, String> {
    match raw {
        "next" => Ok(StepTarget::Next),
        "prev" => Ok(StepTarget::Prev),
        other => other
            .parse::<i64>()
            .map(StepTarget::Index)
            .map_err(|_| format!("expected 'next', 'prev' or an index, got '{other}'")),
    }
}

/// Card-list geometry as measured by the page.
#[derive(Args, Debug, Clone, Copy)]
pub struct Geometry {
    #[arg(long)]
    pub items: usize,
    /// Card width plus gap.
    #[arg(long)]
    pub pitch: f64,
    #[arg(long)]
    pub viewport: f64,
    #[arg(long)]
    pub content: f64,
    #[arg(long, default_value_t = 0)]
    pub index: usize,
    #[arg(long)]
    pub visible: Option<usize>,
}

#[derive(Debug, Serialize)]
struct EvalReport {
    evaluated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declined: Option<ErrorCode>,
}

#[derive(Debug, Serialize)]
struct CategoryCount {
    category_id: CategoryId,
    title: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct RouteReport<'a> {
    matches: &'a [MatchResult],
    exact_url: Option<&'a str>,
    category_counts: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
struct StepReport {
    #[serde(flatten)]
    scroll: ScrollCommand,
    max_index: usize,
}

pub fn route_policy(settings: &Settings) -> RoutePolicy {
    RoutePolicy {
        single_prefix_match_navigates: settings.single_prefix_match_navigates,
    }
}

pub fn init(path: &Path, force: bool, out: &mut impl Write) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "settings file '{}' already exists; pass --force to overwrite it",
            path.display()
        );
    }
    save_settings(path, &Settings::seeded())?;
    writeln!(out, "wrote {}", path.display())?;
    Ok(())
}

pub fn eval(expression: &str, last: Option<f64>, out: &mut impl Write) -> Result<()> {
    let evaluation = evaluate(expression, last);
    let report = match evaluation {
        command_bar::Evaluation::Evaluated(value) => EvalReport {
            evaluated: true,
            value: Some(value),
            display: Some(display_value(value)),
            declined: None,
        },
        command_bar::Evaluation::Declined(code) => EvalReport {
            evaluated: false,
            value: None,
            display: None,
            declined: Some(code),
        },
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

pub fn route_query(settings: &Settings, query: &str, out: &mut impl Write) -> Result<()> {
    let entries = settings.bookmark_entries();
    let result = route(query, &entries);
    let counts = category_counts(&result.matches)
        .into_iter()
        .map(|(category_id, count)| CategoryCount {
            category_id,
            title: settings
                .categories
                .get(category_id.0 as usize)
                .map(|category| category.display_title().to_string())
                .unwrap_or_default(),
            count,
        })
        .collect();

    let report = RouteReport {
        matches: &result.matches,
        exact_url: result.exact_url.as_deref(),
        category_counts: counts,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

pub fn submit(
    settings: &Settings,
    query: &str,
    last: Option<f64>,
    out: &mut impl Write,
) -> Result<()> {
    let entries = settings.bookmark_entries();
    let mut bar = CommandBar::new(route_policy(settings)).with_last_result(last);
    let outcome = bar.on_submit(query, &entries);
    writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
    Ok(())
}

fn stepper_state(settings: &Settings, geometry: Geometry) -> StepperState {
    StepperState {
        current_index: geometry.index,
        item_count: geometry.items,
        pitch: geometry.pitch,
        viewport_extent: geometry.viewport,
        content_extent: geometry.content,
        visible_count: geometry
            .visible
            .unwrap_or(settings.carousel.visible_count),
    }
}

pub fn step(
    settings: &Settings,
    geometry: Geometry,
    target: StepTarget,
    out: &mut impl Write,
) -> Result<()> {
    let state = stepper_state(settings, geometry);
    state
        .validate()
        .context("cannot step the carousel with this geometry")?;

    let next = match target {
        StepTarget::Next => state.step(Direction::Forward),
        StepTarget::Prev => state.step(Direction::Backward),
        StepTarget::Index(index) => state.go_to(index),
    };
    let report = StepReport {
        scroll: scroll_command(&next),
        max_index: next.max_index(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

/// One line of a recorded gesture stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Wheel { at_ms: u64, delta: WheelDelta },
    Key(Key),
    PointerDown(f64),
    PointerMove(f64),
    PointerUp,
    PointerCancel,
    GoTo(i64),
}

/// `wheel <ms> <dx> <dy>`, `key <name>`, `down <x>`, `move <x>`, `up`, `cancel`,
/// `goto <n>`.
pub fn parse_gesture(line: &str) -> Option<GestureEvent> {
    let mut parts = line.split_whitespace();
    let event = match parts.next()? {
        "wheel" => GestureEvent::Wheel {
            at_ms: parts.next()?.parse().ok()?,
            delta: WheelDelta {
                dx: parts.next()?.parse().ok()?,
                dy: parts.next()?.parse().ok()?,
            },
        },
        "key" => GestureEvent::Key(Key::from_name(parts.next()?)),
        "down" => GestureEvent::PointerDown(parts.next()?.parse().ok()?),
        "move" => GestureEvent::PointerMove(parts.next()?.parse().ok()?),
        "up" => GestureEvent::PointerUp,
        "cancel" => GestureEvent::PointerCancel,
        "goto" => GestureEvent::GoTo(parts.next()?.parse().ok()?),
        _ => return None,
    };
    Some(event)
}

/// Clock driven by the timestamps of replayed wheel events.
#[derive(Debug)]
struct ReplayClock {
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl Clock for &ReplayClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

pub fn gestures(
    settings: &Settings,
    geometry: Geometry,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let clock = ReplayClock {
        origin: Instant::now(),
        elapsed: Cell::new(Duration::ZERO),
    };
    let mut carousel = Carousel::new(
        &clock,
        Duration::from_millis(settings.carousel.wheel_debounce_ms),
    );
    let mut state = stepper_state(settings, geometry);

    for line in input.lines() {
        let line = line.context("failed to read gesture line")?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(event) = parse_gesture(&line) else {
            warn!(line = %line, "skipping unrecognised gesture");
            continue;
        };

        let command = match event {
            GestureEvent::Wheel { at_ms, delta } => {
                clock.elapsed.set(Duration::from_millis(at_ms));
                carousel.on_wheel(&state, delta)
            }
            GestureEvent::Key(key) => carousel.on_key(&state, key),
            GestureEvent::PointerDown(x) => {
                carousel.on_pointer_down(x);
                None
            }
            GestureEvent::PointerMove(x) => {
                carousel.on_pointer_move(x);
                None
            }
            GestureEvent::PointerUp => carousel.on_pointer_up(&state),
            GestureEvent::PointerCancel => carousel.on_pointer_cancel(&state),
            GestureEvent::GoTo(target) => carousel.go_to(&state, target),
        };

        if let Some(command) = command {
            state = state.with_index(command.index);
            writeln!(out, "{}", serde_json::to_string(&command)?)?;
        }
    }

    Ok(())
}

pub fn clock(settings: &Settings, out: &mut impl Write) -> Result<()> {
    let now = chrono::Local::now().time();
    writeln!(out, "{}", format_clock(now, settings.clock_12h))?;
    Ok(())
}

pub fn weather(settings: &Settings, out: &mut impl Write) -> Result<()> {
    let Some(location) = settings.weather_location() else {
        writeln!(out, "{UNCONFIGURED_TEXT}")?;
        return Ok(());
    };
    let url = forecast_url(
        location.lat,
        location.lon,
        TemperatureUnit::from_imperial(settings.temp_imperial),
        WindUnit::from_imperial(settings.wind_imperial),
    )
    .context("failed to build forecast url")?;
    writeln!(out, "{url}")?;
    Ok(())
}

/// Renders the task card from a Todoist task list read from `input`.
pub fn tasks(input: impl Read, out: &mut impl Write) -> Result<()> {
    let mut tasks: Vec<Task> =
        serde_json::from_reader(input).context("failed to parse task list")?;
    if tasks.is_empty() {
        writeln!(out, "{NO_TASKS_TEXT}")?;
        return Ok(());
    }

    sort_by_due(&mut tasks);
    let today = chrono::Local::now().date_naive();
    writeln!(out, "{}", count_label(tasks.len()))?;
    for task in top_tasks(&tasks) {
        let label = due_label(task.due_at().map(|due| due.date()), today);
        writeln!(out, "{} ({label})", task.display_content())?;
    }
    Ok(())
}

/// Line-oriented stand-in for the page: `?text` is a keystroke, anything else
/// is typed and submitted. The calculator chain survives across lines.
pub fn shell(settings: &Settings, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let entries = settings.bookmark_entries();
    let category_ids = settings.category_ids();
    let mut bar = CommandBar::new(route_policy(settings));
    info!(bookmarks = entries.len(), "command bar ready");

    for line in input.lines() {
        let line = line.context("failed to read input line")?;

        if let Some(live) = line.strip_prefix('?') {
            let instructions = bar.on_input(live, &entries, &category_ids);
            writeln!(out, "{}", serde_json::to_string(&instructions)?)?;
            continue;
        }

        bar.on_input(&line, &entries, &category_ids);
        let outcome = bar.on_submit(&line, &entries);
        writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
