use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recurrence pattern of an event. Wire values are the uppercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
}

impl Recurrence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
        }
    }

    #[must_use]
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar event as stored and as echoed back from the creation
/// endpoint. `start_at` and `duration_minutes` keep their original wire
/// names (`start_datetime`, `duration`); `created_at` is persistence
/// bookkeeping and never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "start_datetime")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
    pub recurrence: Recurrence,
    pub recurrence_end: Option<DateTime<Utc>>,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}
