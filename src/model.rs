use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ClientResult;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus current enrolment. Negative if the server over-filled it.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activities keyed by name, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub activities: Vec<(String, Activity)>,
}

impl Catalog {
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let raw: Map<String, Value> = serde_json::from_str(json)?;
        let activities = raw
            .into_iter()
            .map(|(name, v)| -> ClientResult<(String, Activity)> {
                Ok((name, serde_json::from_value(v)?))
            })
            .collect::<ClientResult<Vec<_>>>()?;
        Ok(Self { activities })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.activities.iter().map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Decoded answer of a signup or removal call.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationReply {
    Accepted(MessageResponse),
    Rejected { status: u16, body: ErrorResponse },
}

impl MutationReply {
    /// Both the success and failure bodies must be JSON; anything else is an error.
    pub fn from_parts(ok: bool, status: u16, body: &str) -> ClientResult<Self> {
        if ok {
            Ok(Self::Accepted(serde_json::from_str(body)?))
        } else {
            Ok(Self::Rejected {
                status,
                body: serde_json::from_str(body)?,
            })
        }
    }
}
