use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COST_MIN: f64 = 1.0;
pub const DEFAULT_COST_MAX: f64 = 5.0;

/// Ordering applied as the last pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Overall score, highest first.
    #[default]
    Overall,
    /// Minimum monthly cost, lowest first.
    Cheap,
    /// Internet speed, fastest first.
    Fast,
    /// Nomad headcount, largest first.
    Active,
    /// Quality-of-life score, highest first.
    Quality,
    /// Review count, most first.
    Reviews,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Overall,
        SortKey::Cheap,
        SortKey::Fast,
        SortKey::Active,
        SortKey::Quality,
        SortKey::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Overall => "overall",
            SortKey::Cheap => "cheap",
            SortKey::Fast => "fast",
            SortKey::Active => "active",
            SortKey::Quality => "quality",
            SortKey::Reviews => "reviews",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == key)
            .ok_or_else(|| {
                let names: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown sort key '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Inclusive bounds on a city's minimum monthly cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, cost: f64) -> bool {
        self.min <= cost && cost <= self.max
    }
}

impl Default for CostRange {
    fn default() -> Self {
        Self::new(DEFAULT_COST_MIN, DEFAULT_COST_MAX)
    }
}

/// A combinable set of city filters.
///
/// The default value is the unfiltered view: no search, no regions, cost
/// `1..=5`, no speed floor, sorted by overall score, no gating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub search: String,
    pub regions: Vec<String>,
    pub cost_range: CostRange,
    /// Minimum internet speed in Mbps; `0` disables the stage.
    pub min_speed: u32,
    pub sort_by: SortKey,
    #[serde(default)]
    pub show_favorites: bool,
    #[serde(default)]
    pub show_bookmarks: bool,
}

impl FilterParams {
    /// Decode the query-string form: `search`, `regions` (comma-joined),
    /// `costMin`, `costMax`, `speed`, `sort`.
    ///
    /// A leading `?` is ignored. Missing or unparsable values keep their
    /// defaults; unknown parameters are skipped. Values are taken verbatim,
    /// no percent-decoding is applied.
    pub fn from_query(query: &str) -> Self {
        let mut params = FilterParams::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            match name {
                "search" => params.search = value.to_string(),
                "regions" => {
                    params.regions = value
                        .split(',')
                        .filter(|key| !key.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "costMin" => {
                    params.cost_range.min = value.parse().unwrap_or(DEFAULT_COST_MIN);
                }
                "costMax" => {
                    params.cost_range.max = value.parse().unwrap_or(DEFAULT_COST_MAX);
                }
                "speed" => params.min_speed = value.parse().unwrap_or(0),
                "sort" => params.sort_by = value.parse().unwrap_or_default(),
                _ => {}
            }
        }

        params
    }

    /// The sort named by the last `sort` pair of `query`, if it names a
    /// known key.
    pub fn query_sort(query: &str) -> Option<SortKey> {
        let query = query.strip_prefix('?').unwrap_or(query);
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(name, _)| *name == "sort")
            .last()
            .and_then(|(_, value)| value.parse().ok())
    }

    /// Encode as a query string (no leading `?`).
    ///
    /// Empty search, empty regions and a zero speed floor are omitted. The
    /// gating flags are session state and never encoded.
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if !self.search.is_empty() {
            parts.push(format!("search={}", self.search));
        }
        if !self.regions.is_empty() {
            parts.push(format!("regions={}", self.regions.join(",")));
        }
        parts.push(format!("costMin={}", self.cost_range.min));
        parts.push(format!("costMax={}", self.cost_range.max));
        if self.min_speed > 0 {
            parts.push(format!("speed={}", self.min_speed));
        }
        parts.push(format!("sort={}", self.sort_by));
        parts.join("&")
    }

    pub fn is_default(&self) -> bool {
        *self == FilterParams::default()
    }
}
