use serde::{Deserialize, Serialize};

/// Projection of a platform user as read by the broadcast workflow.
///
/// Rows are owned by the platform's user management; this service only
/// ever selects them by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub email: String,
    pub email_subscription_enabled: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Recipient {
    /// A missing or NULL flag counts as subscribed; only an explicit
    /// `false` opts a user out.
    pub fn is_subscribed(&self) -> bool {
        self.email_subscription_enabled != Some(false)
    }
}
