//! # Rendering
//!
//! Text output for humans, JSON for scripts. Layout math (column widths,
//! truncation) is done on plain strings with `unicode-width`, since city names
//! are mostly double-width Hangul; colour is applied after padding so escape
//! codes never count toward a column.

use chrono::Utc;
use colored::Colorize;
use nomadapp::api::ActivityStats;
use nomadapp::filters::Region;
use nomadapp::model::{parse_timestamp, City, Review, UserProfile};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NAME_WIDTH: usize = 14;
pub const PROVINCE_WIDTH: usize = 16;
pub const TITLE_WIDTH: usize = 48;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|json| format!("{}\n", json))
}

pub fn render_cities(cities: &[City]) -> String {
    if cities.is_empty() {
        return "No cities match.\n".to_string();
    }

    let mut out = String::new();
    for (rank, city) in cities.iter().enumerate() {
        let name = pad_to_width(
            &format!("{} {}", city.emoji.as_deref().unwrap_or(" "), city.name),
            NAME_WIDTH,
        );
        let province = pad_to_width(&city.province, PROVINCE_WIDTH);
        out.push_str(&format!(
            "{:>3}. {} {} {} {:>10} {:>5} Mbps {:>5} nomads\n",
            rank + 1,
            name.bold(),
            province.dimmed(),
            format!("{:>4.1}", city.overall_score).yellow(),
            city.cost_per_month,
            city.internet_speed,
            city.nomads_count,
        ));
    }
    out
}

pub fn render_regions(regions: &[Region]) -> String {
    let mut out = String::new();
    for region in regions {
        out.push_str(&format!(
            "{} {} {}\n",
            pad_to_width(region.key, 12).bold(),
            pad_to_width(region.label, 10),
            region.provinces.join(", ").dimmed()
        ));
    }
    out
}

/// One line per id, with the city name when the id is a known city.
pub fn render_city_ids(ids: &[String], cities: &[City], empty_message: &str) -> String {
    if ids.is_empty() {
        return format!("{}\n", empty_message);
    }
    ids.iter()
        .map(|id| match cities.iter().find(|city| &city.id == id) {
            Some(city) => format!("{} {}\n", pad_to_width(id, 16), city.name.bold()),
            None => format!("{}\n", id),
        })
        .collect()
}

pub fn render_ids(ids: &[String], empty_message: &str) -> String {
    if ids.is_empty() {
        return format!("{}\n", empty_message);
    }
    ids.iter().map(|id| format!("{}\n", id)).collect()
}

pub fn render_reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews yet.\n".to_string();
    }

    let mut out = String::new();
    for review in reviews {
        out.push_str(&format!(
            "{} {}  {} · {}\n",
            stars(review.rating).yellow(),
            truncate_to_width(&review.title, TITLE_WIDTH).bold(),
            review.username,
            format_time_ago(&review.created_at).dimmed(),
        ));
        for line in review.content.lines() {
            out.push_str(&format!("    {}\n", line));
        }
        out.push_str(&format!("    {}\n", review.id.dimmed()));
    }
    out
}

pub fn render_average(city_id: &str, average: f64, count: usize) -> String {
    if count == 0 {
        return format!("{}: no reviews\n", city_id);
    }
    format!(
        "{}: {} ({} review{})\n",
        city_id,
        format!("{:.1}", average).yellow().bold(),
        count,
        if count == 1 { "" } else { "s" }
    )
}

pub fn render_profile(profile: &UserProfile) -> String {
    let mut out = format!("{} <{}>\n", profile.name.bold(), profile.email);
    if let Some(bio) = &profile.bio {
        out.push_str(&format!("{}\n", bio));
    }
    if let Some(avatar) = &profile.avatar_url {
        out.push_str(&format!("avatar: {}\n", avatar.dimmed()));
    }
    out.push_str(&format!(
        "id: {}  joined {}\n",
        profile.id.dimmed(),
        format_time_ago(&profile.created_at)
    ));
    out
}

pub fn render_stats(stats: &ActivityStats) -> String {
    [
        ("Reviews written", stats.reviews_written),
        ("Events joined", stats.events_joined),
        ("Favorites", stats.favorites),
        ("Bookmarks", stats.bookmarks),
    ]
    .iter()
    .map(|(label, value)| format!("{} {}\n", pad_to_width(label, 16), value.to_string().bold()))
    .collect()
}

pub fn success(message: &str) -> String {
    format!("{}\n", message.green())
}

pub fn notice(message: &str) -> String {
    format!("{}\n", message.yellow())
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn pad_to_width(s: &str, width: usize) -> String {
    let shown = truncate_to_width(s, width);
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(created_at: &str) -> String {
    match parse_timestamp(created_at) {
        Some(timestamp) => {
            let elapsed = Utc::now().signed_duration_since(timestamp);
            timeago::Formatter::new().convert(elapsed.to_std().unwrap_or_default())
        }
        None => created_at.to_string(),
    }
}
