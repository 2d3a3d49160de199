//! Brand profile model.
//!
//! A brand profile is a named bundle of stylistic rules for one channel. Only
//! five fields are required; anything else in the backing document is kept
//! in `extra` so prompt builders can show the evaluator the whole profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::errors::{WorkflowError, WorkflowResult};

/// Fields every profile document must carry.
pub const REQUIRED_PROFILE_FIELDS: [&str; 5] =
    ["tone", "formality_level", "pacing", "signature_phrases", "avoid"];

/// Stylistic rules for a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Tone descriptors, e.g. `["sarcastic", "deadpan"]`.
    pub tone: Vec<String>,

    pub formality_level: Formality,

    /// Pacing descriptor, e.g. `"rapid-fire"`.
    pub pacing: String,

    /// Phrases the channel is known for. Each one found earns a bonus.
    pub signature_phrases: Vec<String>,

    /// Terms the channel never uses. Each one found costs a penalty.
    pub avoid: Vec<String>,

    /// Optional fields (channel_name, humor_types, sentence_structure, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Formality is written either as a 1-10 scale or as a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Formality {
    Scale(u8),
    Label(String),
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(level) => write!(f, "{level}/10"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl BrandProfile {
    /// Parse and validate a profile document for `channel`.
    ///
    /// Missing required fields are reported together, in declaration order.
    pub fn from_json_str(channel: &str, raw: &str) -> WorkflowResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| WorkflowError::ProfileInvalid {
                channel: channel.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;

        let Some(object) = value.as_object() else {
            return Err(WorkflowError::ProfileInvalid {
                channel: channel.to_string(),
                reason: "profile must be a JSON object".to_string(),
            });
        };

        let missing: Vec<&str> = REQUIRED_PROFILE_FIELDS
            .iter()
            .copied()
            .filter(|field| !object.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(WorkflowError::ProfileInvalid {
                channel: channel.to_string(),
                reason: format!("missing required fields: {missing:?}"),
            });
        }

        serde_json::from_value(value).map_err(|e| WorkflowError::ProfileInvalid {
            channel: channel.to_string(),
            reason: e.to_string(),
        })
    }

    /// Human-facing channel name, falling back to the lookup key.
    pub fn display_name<'a>(&'a self, channel: &'a str) -> &'a str {
        self.extra
            .get("channel_name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(channel)
    }

    /// Target words per sentence, if the profile declares one.
    pub fn target_sentence_length(&self) -> Option<u64> {
        self.extra
            .get("sentence_structure")
            .and_then(|s| s.get("avg_length_words"))
            .and_then(serde_json::Value::as_u64)
    }

    /// String list stored under an optional key such as `humor_types`.
    pub fn extra_list(&self, key: &str) -> Vec<String> {
        self.extra
            .get(key)
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
