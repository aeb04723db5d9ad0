use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{BroadcastOutcome, Recipient};
use crate::services::email_provider::EmailProvider;
use crate::services::personalizer::personalize;
use crate::services::template_store::TemplateStore;

/// Orchestrates one broadcast request: validate, resolve recipients,
/// filter opt-outs, personalize and dispatch per recipient, aggregate the
/// outcome. No state survives the request.
#[derive(Clone)]
pub struct BroadcastService {
    db: Database,
    templates: Arc<TemplateStore>,
    provider: Arc<dyn EmailProvider>,
}

impl BroadcastService {
    pub fn new(
        db: Database,
        templates: Arc<TemplateStore>,
        provider: Arc<dyn EmailProvider>,
    ) -> Self {
        Self {
            db,
            templates,
            provider,
        }
    }

    /// Fetch the selected users and split them into eligible recipients
    /// and an opted-out count. Unknown ids resolve to no rows at all.
    pub async fn resolve_recipients(
        &self,
        user_ids: &[String],
    ) -> ApiResult<(Vec<Recipient>, usize)> {
        let recipients = self.db.get_users_by_ids(user_ids).await?;
        if recipients.is_empty() {
            return Err(ApiError::NotFound(
                "No users found for the given ids".to_string(),
            ));
        }

        let (eligible, opted_out): (Vec<_>, Vec<_>) =
            recipients.into_iter().partition(Recipient::is_subscribed);

        Ok((eligible, opted_out.len()))
    }

    /// Send caller-resolved subject/content to the selected users.
    ///
    /// `caller_vars` are merged into each recipient's substitution map;
    /// `{name}` and `{email}` are always derived per recipient.
    pub async fn send_broadcast(
        &self,
        user_ids: &[String],
        subject: &str,
        content: &str,
        caller_vars: &HashMap<String, String>,
    ) -> ApiResult<BroadcastOutcome> {
        if user_ids.is_empty() {
            return Err(ApiError::BadRequest("userIds must not be empty".to_string()));
        }
        if subject.trim().is_empty() || content.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Subject and content are required".to_string(),
            ));
        }

        let (eligible, opted_out) = self.resolve_recipients(user_ids).await?;

        if opted_out > 0 {
            warn!(
                opted_out,
                selected = user_ids.len(),
                "Skipping opted-out users"
            );
        }

        // Block before any provider call when nobody is left; partial
        // opt-out only warns.
        if eligible.is_empty() {
            return Err(ApiError::NotFound(
                "No eligible recipients: all selected users have opted out".to_string(),
            ));
        }

        let broadcast_id = Uuid::new_v4();
        info!(
            %broadcast_id,
            recipients = eligible.len(),
            opted_out,
            provider = self.provider.provider_name(),
            "Dispatching broadcast"
        );

        let mut outcome = BroadcastOutcome {
            total: eligible.len(),
            opted_out,
            ..Default::default()
        };

        // One recipient at a time; a provider failure for one recipient
        // never aborts the rest of the batch, and nothing is retried.
        for recipient in &eligible {
            let (final_subject, final_content) =
                personalize(recipient, subject, content, caller_vars);

            match self
                .provider
                .send(&recipient.email, &final_subject, &final_content)
                .await
            {
                Ok(()) => {
                    outcome.sent += 1;
                }
                Err(reason) => {
                    let reason = if reason.is_empty() {
                        "Unknown error".to_string()
                    } else {
                        reason
                    };
                    warn!(
                        %broadcast_id,
                        email = %recipient.email,
                        %reason,
                        "Dispatch failed for recipient"
                    );
                    outcome.failed += 1;
                    outcome.errors.push(format!("{}: {}", recipient.email, reason));
                }
            }
        }

        info!(
            %broadcast_id,
            sent = outcome.sent,
            failed = outcome.failed,
            total = outcome.total,
            "Broadcast complete"
        );

        Ok(outcome)
    }

    /// Send a built-in template to the selected users, resolving it
    /// server-side with the caller's variable map.
    pub async fn send_template_broadcast(
        &self,
        user_ids: &[String],
        template_id: &str,
        caller_vars: &HashMap<String, String>,
    ) -> ApiResult<BroadcastOutcome> {
        let template = self.templates.get_by_str(template_id).ok_or_else(|| {
            ApiError::BadRequest(format!("Unknown template id: {}", template_id))
        })?;

        self.send_broadcast(user_ids, &template.subject, &template.html, caller_vars)
            .await
    }
}
