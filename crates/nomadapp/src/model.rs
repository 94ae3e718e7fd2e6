//! # Domain Model
//!
//! Core records handled by the data layer: [`City`], [`Review`], [`UserProfile`],
//! plus the input shapes used to create and patch reviews.
//!
//! ## Ownership
//!
//! - **Cities** come from an external record source and are never written here.
//! - **Reviews** are split between a read-only seed and a local overlay (see
//!   [`crate::store::reviews`]).
//! - **Profiles** are owned by the single local profile key.
//!
//! ## Wire Format
//!
//! All records serialize with the snake_case field names used by the remote
//! record service, so seed files and stored values share one shape. Optional
//! fields are skipped when absent and default when missing on read.
//!
//! ## Timestamps
//!
//! `created_at` stays a string: seed data mixes date-only values (`2024-10-20`)
//! with full ISO-8601 date-times. [`parse_timestamp`] turns either form into a
//! comparable instant; date-only values are midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub province: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub overall_score: f64,
    /// Free-text range such as `"2.1~3M"`; the first numeral is the minimum cost.
    pub cost_per_month: String,
    pub internet_speed: u32,
    pub nomads_count: u32,
    pub cafe_rating: f64,
    pub work_score: f64,
    pub quality_score: f64,
    pub reviews_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl City {
    /// Canonical minimum monthly cost, shared by the range filter and the
    /// `cheap` sort.
    pub fn min_cost(&self) -> f64 {
        crate::filters::extract_min_cost(&self.cost_per_month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub city_id: String,
    pub title: String,
    pub content: String,
    pub rating: u8,
    pub created_at: String,
    pub username: String,
}

impl Review {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// A review before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub user_id: String,
    pub city_id: String,
    pub title: String,
    pub content: String,
    pub rating: u8,
    pub created_at: String,
    pub username: String,
}

impl ReviewDraft {
    /// Build a draft stamped with today's date, the format the review form uses.
    pub fn today(
        user_id: impl Into<String>,
        username: impl Into<String>,
        city_id: impl Into<String>,
        rating: u8,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            city_id: city_id.into(),
            title: title.into(),
            content: content.into(),
            rating,
            created_at: Utc::now().format("%Y-%m-%d").to_string(),
            username: username.into(),
        }
    }

    pub fn into_review(self, id: String) -> Review {
        Review {
            id,
            user_id: self.user_id,
            city_id: self.city_id,
            title: self.title,
            content: self.content,
            rating: self.rating,
            created_at: self.created_at,
            username: self.username,
        }
    }
}

/// Partial update for a review. Identity fields (`id`, `user_id`, `city_id`,
/// `created_at`) are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl ReviewPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.rating.is_none()
    }

    pub fn apply(&self, review: &mut Review) {
        if let Some(title) = &self.title {
            review.title = title.clone();
        }
        if let Some(content) = &self.content {
            review.content = content.clone();
        }
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl Default for UserProfile {
    /// The built-in profile served before anything has been saved.
    fn default() -> Self {
        Self {
            id: "current_user_123".to_string(),
            email: "nomad@example.com".to_string(),
            name: "노마드".to_string(),
            bio: None,
            avatar_url: None,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }
}

/// Parse an ISO-8601 date or date-time.
///
/// Accepts RFC 3339 (`2024-10-20T09:30:00.000Z`), a naive date-time (read as
/// UTC) and a bare date (midnight UTC). Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-10-20T09:30:00.000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 10, 20, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight_utc() {
        let ts = parse_timestamp("2024-10-20").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 10, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_datetime() {
        let ts = parse_timestamp("2024-10-20T12:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 10, 20, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let mut review = ReviewDraft::today("u1", "Alice", "seoul", 4, "Title", "Body")
            .into_review("r1".into());
        let patch = ReviewPatch {
            rating: Some(2),
            ..Default::default()
        };
        patch.apply(&mut review);

        assert_eq!(review.rating, 2);
        assert_eq!(review.title, "Title");
        assert_eq!(review.content, "Body");
        assert_eq!(review.city_id, "seoul");
    }

    #[test]
    fn test_city_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "jeju", "name": "제주", "province": "제주특별자치도",
            "overall_score": 8.2, "cost_per_month": "2~3M", "internet_speed": 700,
            "nomads_count": 410, "cafe_rating": 4.7, "work_score": 7,
            "quality_score": 8.4, "reviews_count": 90
        }"#;
        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city.id, "jeju");
        assert!(city.description.is_none());
        assert_eq!(city.min_cost(), 2.0);
    }

    #[test]
    fn test_default_profile_has_identity() {
        let profile = UserProfile::default();
        assert!(!profile.id.is_empty());
        assert!(!profile.email.is_empty());
        assert!(parse_timestamp(&profile.created_at).is_some());
    }
}
