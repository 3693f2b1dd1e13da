use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A voting row as read at the start of a run.
#[derive(Debug, Clone)]
pub struct Voting {
    pub id: Uuid,
    pub name: String,
    /// Result stored by a previous run, untyped because older runs may have
    /// written a different shape.
    pub result: Option<serde_json::Value>,
}

impl Voting {
    /// `createdAt` of the previously stored result, if there is one.
    pub fn previous_created_at(&self) -> Option<DateTime<Utc>> {
        let created_at = self.result.as_ref()?.get("createdAt")?;
        match serde_json::from_value(created_at.clone()) {
            Ok(created_at) => Some(created_at),
            Err(e) => {
                warn!(
                    "Ignoring unparseable createdAt {} on voting '{}': {}",
                    created_at, self.name, e
                );
                None
            }
        }
    }
}

// One row of the tally query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyRow {
    pub id: Uuid,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultOption {
    pub id: Uuid,
    pub name: String,
    pub count: i64,
    pub winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub hls: String,
    pub mp4: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turnout {
    /// Distinct users holding an active membership.
    pub eligible: i64,
    /// Distinct users who cast a ballot in the voting.
    pub submitted: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBucket {
    pub key: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStats {
    pub ages: Vec<StatsBucket>,
    pub countries: Vec<StatsBucket>,
    pub ch_cantons: Vec<StatsBucket>,
}

/// The snapshot written to `votings.result`.
///
/// `message` and `video` are left out of the JSON when absent, while
/// `turnout` and `stats` are always written and are `null` when the run
/// did not freeze them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingResult {
    pub options: Vec<ResultOption>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    pub turnout: Option<Turnout>,
    pub stats: Option<VoteStats>,
}

impl VotingResult {
    pub fn winner(&self) -> Option<&ResultOption> {
        self.options.iter().find(|option| option.winner)
    }
}

/// Validated input of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRequest {
    pub name: String,
    pub message: Option<String>,
    /// Tie-break option name, only consulted when the tally is tied.
    pub winner: Option<String>,
    pub video: Option<Video>,
    /// Compute and store turnout and stats.
    pub freeze: bool,
}
