use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// DTOs for the broadcast API. Field names on the wire are camelCase,
// matching the platform's JSON contract.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBroadcastRequest {
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTemplateBroadcastRequest {
    #[serde(default)]
    pub user_ids: Vec<String>,
    pub template_id: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub subject: String,
    pub html: String,
}

/// Aggregate outcome of one broadcast. Constructed fresh per request,
/// returned once to the caller, never persisted.
#[derive(Debug, Clone, Default)]
pub struct BroadcastOutcome {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub opted_out: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBroadcastResponse {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub opted_out: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<BroadcastOutcome> for SendBroadcastResponse {
    fn from(outcome: BroadcastOutcome) -> Self {
        let warning = if outcome.opted_out > 0 {
            Some(format!(
                "{} selected user(s) have opted out of email and were skipped",
                outcome.opted_out
            ))
        } else {
            None
        };

        Self {
            success: true,
            sent: outcome.sent,
            failed: outcome.failed,
            total: outcome.total,
            opted_out: outcome.opted_out,
            warning,
            errors: if outcome.errors.is_empty() {
                None
            } else {
                Some(outcome.errors)
            },
        }
    }
}
