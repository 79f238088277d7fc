use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::Timestamp;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid rule pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// One monitored playlist together with its checkpoint and rules.
///
/// Serialized as the objects of the persisted config array. Fields this
/// program does not know about are kept in `extra` and written back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub uploads_list_id: String,
    /// Publish time of the most recently processed item. Absent or null
    /// means 0.
    #[serde(rename = "last_updated", default, deserialize_with = "null_as_zero")]
    pub watermark: Timestamp,
    #[serde(rename = "actions", default)]
    pub rules: Vec<Rule>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChannelConfig {
    pub fn new(
        uploads_list_id: impl Into<String>,
        watermark: Timestamp,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            uploads_list_id: uploads_list_id.into(),
            watermark,
            rules,
            extra: Map::new(),
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Timestamp>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToPlaylist { target_playlist_id: String },
    PostBulletin { message: String },
}

/// A title pattern and the actions to run for every item it matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct Rule {
    pattern: Regex,
    actions: Vec<Action>,
    extra: Map<String, Value>,
}

impl Rule {
    pub fn new(pattern: &str, actions: Vec<Action>) -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: compile(pattern)?,
            actions,
            extra: Map::new(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Unanchored search, the same way the pattern is written in the config.
    pub fn is_match(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
            && self.actions == other.actions
            && self.extra == other.extra
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

/// On-disk shape of a rule: one object with optional action fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleRecord {
    regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    playlist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bulletin: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RuleRecord> for Rule {
    type Error = ConfigError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        // Playlist insertion always runs before the bulletin.
        let mut actions = Vec::with_capacity(2);
        if let Some(target_playlist_id) = record.playlist_id {
            actions.push(Action::AddToPlaylist { target_playlist_id });
        }
        if let Some(message) = record.bulletin {
            actions.push(Action::PostBulletin { message });
        }
        Ok(Self {
            pattern: compile(&record.regex)?,
            actions,
            extra: record.extra,
        })
    }
}

impl From<Rule> for RuleRecord {
    fn from(rule: Rule) -> Self {
        let mut record = RuleRecord {
            regex: rule.pattern.as_str().to_string(),
            playlist_id: None,
            bulletin: None,
            extra: rule.extra,
        };
        for action in rule.actions {
            match action {
                Action::AddToPlaylist { target_playlist_id } => {
                    record.playlist_id = Some(target_playlist_id)
                }
                Action::PostBulletin { message } => record.bulletin = Some(message),
            }
        }
        record
    }
}
