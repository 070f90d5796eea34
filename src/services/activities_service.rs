use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::activities_repo::{self, ActivityListRow};
use crate::error::AppError;

/// Query parameters the JSON listing endpoint accepts.
#[derive(Debug, Deserialize, Default)]
pub struct ActivitiesQuery {
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Stored activity as the API returns it. Capacity indicators live on the
/// card view instead; this is the authoritative record.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub days: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_participants: i64,
    pub participants: Vec<String>,
    pub category: String,
}

pub async fn list_activities(
    pool: &SqlitePool,
    query: &ActivitiesQuery,
) -> Result<Vec<ActivityView>, AppError> {
    let day = query.day.as_deref().unwrap_or("").trim();
    let start_time = query.start_time.as_deref().unwrap_or("").trim();
    let end_time = query.end_time.as_deref().unwrap_or("").trim();

    validate_time_param(start_time, "start_time")?;
    validate_time_param(end_time, "end_time")?;

    let rows = activities_repo::list(pool, day, start_time, end_time).await?;
    Ok(rows.into_iter().map(into_view).collect())
}

fn into_view(row: ActivityListRow) -> ActivityView {
    let participants = parse_string_array_json(row.participants_json.as_deref());
    let category = resolve_category(row.category.as_deref(), &row.name, &row.description);
    let days = row
        .days
        .as_deref()
        .map(|raw| parse_string_array_json(Some(raw)));

    ActivityView {
        name: row.name,
        description: row.description,
        schedule: row.schedule,
        days,
        start_time: row.start_time,
        end_time: row.end_time,
        max_participants: row.max_participants,
        participants,
        category,
    }
}

// ---------------------------------------------------------------------------
// Directory page: consumer-side narrowing plus capacity indicators.

/// Query parameters of the rendered directory page.
#[derive(Debug, Deserialize, Default)]
pub struct DirectoryQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub day: Option<String>,
    pub when: Option<String>,
}

/// Time-of-day presets the page offers. `Weekend` is never translated into a
/// repo filter: the full list is fetched and day-list membership is checked
/// here, on the consumer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    BeforeSchool,
    AfterSchool,
    Weekend,
}

impl TimeWindow {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "before_school" => Some(TimeWindow::BeforeSchool),
            "after_school" => Some(TimeWindow::AfterSchool),
            "weekend" => Some(TimeWindow::Weekend),
            _ => None,
        }
    }

    /// Start/end bounds handed to the repo; none for the weekend preset.
    pub fn bounds(self) -> Option<(&'static str, &'static str)> {
        match self {
            TimeWindow::BeforeSchool => Some(("07:00", "08:00")),
            TimeWindow::AfterSchool => Some(("15:00", "18:00")),
            TimeWindow::Weekend => None,
        }
    }
}

/// Echo of the filters a render applied, for the form controls.
#[derive(Clone, Default)]
pub struct AppliedDirectoryFilters {
    pub search_query: String,
    pub category: String,
    pub day: String,
    pub when: String,
}

pub struct ActivityCardView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub category: String,
    pub enrolled: i64,
    pub max_participants: i64,
    pub spots_left: i64,
    pub capacity_pct: f64,
    /// Whole-percent rendering of `capacity_pct` for the capacity bar.
    pub capacity_label: String,
    pub status: &'static str,
    pub status_class: &'static str,
}

/// A `<select>` option with its applied state, so the template never has to
/// compare strings itself.
#[derive(Clone)]
pub struct FilterOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct DirectoryPageData {
    pub activities: Vec<ActivityCardView>,
    pub filters: AppliedDirectoryFilters,
    pub category_options: Vec<FilterOptionView>,
    pub day_options: Vec<FilterOptionView>,
    pub when_options: Vec<FilterOptionView>,
}

/// Category keys in classifier precedence order; also the select options.
pub const CATEGORIES: &[&str] = &["sports", "arts", "academic", "community", "technology"];

const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WHEN_PRESETS: &[(&str, &str)] = &[
    ("before_school", "Before school (7:00 - 8:00 AM)"),
    ("after_school", "After school (3:00 - 6:00 PM)"),
    ("weekend", "Weekend"),
];

pub async fn build_directory_page(
    pool: &SqlitePool,
    query: &DirectoryQuery,
) -> sqlx::Result<DirectoryPageData> {
    let filters = AppliedDirectoryFilters {
        search_query: query.q.as_deref().unwrap_or("").trim().to_string(),
        category: query.category.as_deref().unwrap_or("").trim().to_string(),
        day: query.day.as_deref().unwrap_or("").trim().to_string(),
        when: query.when.as_deref().unwrap_or("").trim().to_string(),
    };

    let window = TimeWindow::parse(&filters.when);
    let (start_time, end_time) = window.and_then(TimeWindow::bounds).unwrap_or(("", ""));

    let rows = activities_repo::list(pool, &filters.day, start_time, end_time).await?;

    let needle = filters.search_query.to_lowercase();
    let mut cards = Vec::new();
    for row in rows {
        let category = resolve_category(row.category.as_deref(), &row.name, &row.description);

        if !filters.category.is_empty() && category != filters.category {
            continue;
        }
        if !matches_search(&row.name, &row.description, &row.schedule, &needle) {
            continue;
        }
        if window == Some(TimeWindow::Weekend) {
            // Rows without structured days keep falling through unfiltered.
            if let Some(raw) = row.days.as_deref() {
                let days = parse_string_array_json(Some(raw));
                if !is_weekend_schedule(&days) {
                    continue;
                }
            }
        }

        cards.push(build_card(row, category));
    }

    let (category_options, day_options, when_options) = build_filter_options(&filters);

    Ok(DirectoryPageData {
        activities: cards,
        filters,
        category_options,
        day_options,
        when_options,
    })
}

/// Fallback page when the store cannot be read.
pub fn build_empty_page() -> DirectoryPageData {
    let filters = AppliedDirectoryFilters::default();
    let (category_options, day_options, when_options) = build_filter_options(&filters);
    DirectoryPageData {
        activities: Vec::new(),
        filters,
        category_options,
        day_options,
        when_options,
    }
}

type FilterOptions = (
    Vec<FilterOptionView>,
    Vec<FilterOptionView>,
    Vec<FilterOptionView>,
);

fn build_filter_options(filters: &AppliedDirectoryFilters) -> FilterOptions {
    let category_options = CATEGORIES
        .iter()
        .map(|c| FilterOptionView {
            value: c.to_string(),
            label: capitalize(c),
            selected: filters.category == *c,
        })
        .collect();
    let day_options = WEEKDAYS
        .iter()
        .map(|d| FilterOptionView {
            value: d.to_string(),
            label: d.to_string(),
            selected: filters.day.eq_ignore_ascii_case(d),
        })
        .collect();
    let when_options = WHEN_PRESETS
        .iter()
        .map(|(value, label)| FilterOptionView {
            value: value.to_string(),
            label: label.to_string(),
            selected: filters.when == *value,
        })
        .collect();
    (category_options, day_options, when_options)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn build_card(row: ActivityListRow, category: String) -> ActivityCardView {
    let enrolled = parse_string_array_json(row.participants_json.as_deref()).len() as i64;
    let spots_left = row.max_participants - enrolled;
    let capacity_pct = capacity_pct(enrolled, row.max_participants);
    let status = capacity_status(spots_left, capacity_pct);

    ActivityCardView {
        name: row.name,
        description: row.description,
        schedule: row.schedule,
        category,
        enrolled,
        max_participants: row.max_participants,
        spots_left,
        capacity_label: format!("{:.0}", capacity_pct),
        capacity_pct,
        status,
        status_class: match status {
            "near full" => "near-full",
            other => other,
        },
    }
}

/// enrolled / max × 100, exact. Recomputed on every render, never stored.
pub fn capacity_pct(enrolled: i64, max_participants: i64) -> f64 {
    if max_participants <= 0 {
        return 100.0;
    }
    enrolled as f64 / max_participants as f64 * 100.0
}

pub fn capacity_status(spots_left: i64, capacity_pct: f64) -> &'static str {
    if spots_left <= 0 {
        "full"
    } else if capacity_pct >= 75.0 {
        "near full"
    } else {
        "available"
    }
}

fn matches_search(name: &str, description: &str, schedule: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    name.to_lowercase().contains(needle)
        || description.to_lowercase().contains(needle)
        || schedule.to_lowercase().contains(needle)
}

pub fn is_weekend_schedule(days: &[String]) -> bool {
    days.iter()
        .any(|d| d.eq_ignore_ascii_case("saturday") || d.eq_ignore_ascii_case("sunday"))
}

// Precedence matters: the first set with a hit wins, so an incidental keyword
// early in the table can shadow a better match later.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("sports", &["soccer", "basketball", "fitness", "gym", "sports", "athletic"]),
    ("arts", &["art", "drama", "theater", "music", "paint"]),
    ("academic", &["math", "science", "chess", "debate", "academic", "study"]),
    ("community", &["volunteer", "community", "garden", "service"]),
    ("technology", &["programming", "robotics", "computer", "coding", "tech"]),
];

/// Keyword classifier over name + description. Only consulted for rows with
/// no stored category.
pub fn infer_category(name: &str, description: &str) -> &'static str {
    let haystack = format!("{} {}", name, description).to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| haystack.contains(kw)) {
            return category;
        }
    }
    "academic"
}

pub fn resolve_category(stored: Option<&str>, name: &str, description: &str) -> String {
    match stored.map(str::trim).filter(|c| !c.is_empty()) {
        Some(category) => category.to_string(),
        None => infer_category(name, description).to_string(),
    }
}

fn validate_time_param(value: &str, field: &str) -> Result<(), AppError> {
    if value.is_empty() || is_hhmm(value) {
        return Ok(());
    }
    Err(AppError::Validation(format!("Invalid {} format", field)))
}

fn is_hhmm(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour < 24 && minute < 60
}

fn parse_string_array_json(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}
