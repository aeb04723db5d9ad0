use serde::{Deserialize, Serialize};

/// Closed enumeration of the built-in email templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    Welcome,
    Update,
    JobOffer,
    BlogPost,
    WeeklySummary,
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateId::Welcome => write!(f, "welcome"),
            TemplateId::Update => write!(f, "update"),
            TemplateId::JobOffer => write!(f, "job-offer"),
            TemplateId::BlogPost => write!(f, "blog-post"),
            TemplateId::WeeklySummary => write!(f, "weekly-summary"),
        }
    }
}

impl std::str::FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "welcome" => Ok(TemplateId::Welcome),
            "update" => Ok(TemplateId::Update),
            "job-offer" => Ok(TemplateId::JobOffer),
            "blog-post" => Ok(TemplateId::BlogPost),
            "weekly-summary" => Ok(TemplateId::WeeklySummary),
            _ => Err(format!("Invalid template id: {}", s)),
        }
    }
}

/// A subject/body pair with named `{placeholder}` tokens, resolved at send
/// time. `name` and `email` are derived per recipient and never appear in
/// `variables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub html: String,
    pub variables: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
}
