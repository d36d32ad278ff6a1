use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchStatus {
    Success,
    Failed,
    Upcoming,
}

impl LaunchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for LaunchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(format!("unknown launch status '{other}'")),
        }
    }
}

/// A launch as stored in the launches table, keyed by `launch_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub launch_id: String,
    pub mission_name: String,
    pub rocket_id: String,
    pub launch_date_utc: String,
    pub launch_date_unix: i64,
    pub status: LaunchStatus,
    pub launchpad_id: Option<String>,
    pub details: Option<String>,
    pub article_link: Option<String>,
    pub wikipedia: Option<String>,
    pub video_link: Option<String>,
    /// Stamped by the repository on every write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Maps a raw v4 launch object into a record. Never fails: missing or
/// mistyped fields fall back to defaults.
pub fn normalize(raw: &Value) -> LaunchRecord {
    let status = if raw.get("upcoming").is_some_and(truthy) {
        LaunchStatus::Upcoming
    } else if raw.get("success") == Some(&Value::Bool(true)) {
        LaunchStatus::Success
    } else {
        LaunchStatus::Failed
    };

    let links = raw.get("links").filter(|l| l.is_object());
    let link = |name: &str| links.and_then(|l| string_field(l, name));

    LaunchRecord {
        launch_id: string_field(raw, "id").unwrap_or_default(),
        mission_name: string_field(raw, "name").unwrap_or_else(|| "Unknown".into()),
        rocket_id: string_field(raw, "rocket").unwrap_or_default(),
        launch_date_utc: string_field(raw, "date_utc").unwrap_or_default(),
        launch_date_unix: raw.get("date_unix").and_then(integer).unwrap_or(0),
        status,
        launchpad_id: string_field(raw, "launchpad"),
        details: string_field(raw, "details"),
        article_link: link("article"),
        wikipedia: link("wikipedia"),
        video_link: link("webcast"),
        updated_at: None,
    }
}

fn string_field(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_owned)
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
