use regex::Regex;
use thiserror::Error;

use crate::models::{Template, TemplateId};

/// Always derived per recipient at dispatch time; templates use them
/// without declaring them.
const RESERVED_VARIABLES: [&str; 2] = ["name", "email"];

#[derive(Debug, Error)]
pub enum TemplateStoreError {
    #[error("Template '{template}' uses undeclared placeholder '{{{placeholder}}}'")]
    UndeclaredPlaceholder {
        template: String,
        placeholder: String,
    },
}

/// Immutable registry of the built-in email templates.
///
/// Built once at startup and shared through application state; content
/// changes only on redeploy. Registration fails if a template references a
/// placeholder it does not declare, so a typo can never turn into a silent
/// blank substitution at send time.
#[derive(Debug)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new(templates: Vec<Template>) -> Result<Self, TemplateStoreError> {
        let placeholder_re = Regex::new(r"\{([A-Za-z][A-Za-z0-9_]*)\}").unwrap();

        for template in &templates {
            for text in [&template.subject, &template.html] {
                for caps in placeholder_re.captures_iter(text) {
                    let name = &caps[1];
                    if RESERVED_VARIABLES.contains(&name) {
                        continue;
                    }
                    if !template.variables.iter().any(|v| v == name) {
                        return Err(TemplateStoreError::UndeclaredPlaceholder {
                            template: template.id.to_string(),
                            placeholder: name.to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { templates })
    }

    /// Registry with the platform's built-in templates.
    pub fn with_defaults() -> Result<Self, TemplateStoreError> {
        Self::new(default_templates())
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Lookup by the wire form of the id. Unknown ids are a plain miss,
    /// never a default template.
    pub fn get_by_str(&self, id: &str) -> Option<&Template> {
        id.parse::<TemplateId>().ok().and_then(|tid| self.get(tid))
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }
}

fn template(
    id: TemplateId,
    name: &str,
    description: &str,
    subject: &str,
    html: &str,
    variables: &[&str],
) -> Template {
    Template {
        id,
        name: name.to_string(),
        description: description.to_string(),
        subject: subject.to_string(),
        html: html.to_string(),
        variables: variables.iter().map(|v| v.to_string()).collect(),
    }
}

fn default_templates() -> Vec<Template> {
    vec![
        template(
            TemplateId::Welcome,
            "Welcome Email",
            "Sent to new users after they create an account",
            "Welcome to ResumeDeck, {name}!",
            r#"<div style="font-family:Arial,sans-serif;max-width:600px;margin:0 auto;">
  <h2 style="color:#1a56db;">Welcome aboard, {name}!</h2>
  <p>Your ResumeDeck account is ready. Here is what you can do next:</p>
  <ul>
    <li>Build your first resume with the live preview editor</li>
    <li>Track your job applications on the board</li>
    <li>Read career tips on our blog</li>
  </ul>
  <p>Happy job hunting!<br>The ResumeDeck Team</p>
  <p style="color:#6b7280;font-size:12px;">This email was sent to {email}.</p>
</div>"#,
            &[],
        ),
        template(
            TemplateId::Update,
            "Product Update",
            "Announces a new feature or product change",
            "{updateTitle} - a ResumeDeck update",
            r#"<div style="font-family:Arial,sans-serif;max-width:600px;margin:0 auto;">
  <h2 style="color:#1a56db;">{updateTitle}</h2>
  <p>Hi {name},</p>
  <p>{updateBody}</p>
  <p>Log in to try it out.</p>
  <p>The ResumeDeck Team</p>
</div>"#,
            &["updateTitle", "updateBody"],
        ),
        template(
            TemplateId::JobOffer,
            "Job Opportunity",
            "Highlights a job opening matched to the user",
            "New opportunity: {jobTitle} at {companyName}",
            r#"<div style="font-family:Arial,sans-serif;max-width:600px;margin:0 auto;">
  <h2 style="color:#1a56db;">A role that might fit you</h2>
  <p>Hi {name},</p>
  <p><strong>{companyName}</strong> is hiring a <strong>{jobTitle}</strong>.</p>
  <p><a href="{jobUrl}" style="color:#1a56db;">View the listing</a> and add it to your application board.</p>
  <p>The ResumeDeck Team</p>
</div>"#,
            &["jobTitle", "companyName", "jobUrl"],
        ),
        template(
            TemplateId::BlogPost,
            "New Blog Post",
            "Notifies subscribers about a new article",
            "New on the blog: {postTitle}",
            r#"<div style="font-family:Arial,sans-serif;max-width:600px;margin:0 auto;">
  <h2 style="color:#1a56db;">{postTitle}</h2>
  <p>Hi {name},</p>
  <p>{postExcerpt}</p>
  <p><a href="{blogUrl}" style="color:#1a56db;">Read the full post</a></p>
  <p>The ResumeDeck Team</p>
</div>"#,
            &["postTitle", "postExcerpt", "blogUrl"],
        ),
        template(
            TemplateId::WeeklySummary,
            "Weekly Summary",
            "Weekly recap of the user's job search activity",
            "Your week on ResumeDeck",
            r#"<div style="font-family:Arial,sans-serif;max-width:600px;margin:0 auto;">
  <h2 style="color:#1a56db;">Your week in review</h2>
  <p>Hi {name},</p>
  <p>Here is what happened on your application board this week:</p>
  <ul>
    <li>{applicationCount} applications submitted</li>
    <li>{interviewCount} interviews scheduled</li>
    <li>{offerCount} offers received</li>
  </ul>
  <p>Keep it up!<br>The ResumeDeck Team</p>
</div>"#,
            &["applicationCount", "interviewCount", "offerCount"],
        ),
    ]
}
