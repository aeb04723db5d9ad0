use std::collections::HashMap;

use crate::models::Recipient;
use crate::services::substitution::substitute;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Derive the greeting name for a recipient.
///
/// Precedence: first+last, first, last, the local part of the email
/// address, then the literal fallback `"there"` when even that is empty.
pub fn display_name(recipient: &Recipient) -> String {
    match (present(&recipient.first_name), present(&recipient.last_name)) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(first), None) => first.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => {
            let local_part = recipient.email.split('@').next().unwrap_or("");
            if local_part.is_empty() {
                "there".to_string()
            } else {
                local_part.to_string()
            }
        }
    }
}

/// Resolve final subject and body for one recipient.
///
/// Caller-supplied variables are merged first; `name` and `email` are then
/// set from the recipient, so the derived values win even if the caller
/// passed conflicting keys under those names.
pub fn personalize(
    recipient: &Recipient,
    base_subject: &str,
    base_content: &str,
    caller_vars: &HashMap<String, String>,
) -> (String, String) {
    let mut vars = caller_vars.clone();
    vars.insert("name".to_string(), display_name(recipient));
    vars.insert("email".to_string(), recipient.email.clone());

    (
        substitute(base_subject, &vars),
        substitute(base_content, &vars),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(email: &str, first: Option<&str>, last: Option<&str>) -> Recipient {
        Recipient {
            id: "u1".to_string(),
            email: email.to_string(),
            email_subscription_enabled: None,
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn test_full_name_wins() {
        let r = recipient("joe@x.com", Some("A"), Some("B"));
        assert_eq!(display_name(&r), "A B");
    }

    #[test]
    fn test_first_name_only() {
        let r = recipient("joe@x.com", Some("A"), None);
        assert_eq!(display_name(&r), "A");
    }

    #[test]
    fn test_last_name_only() {
        let r = recipient("joe@x.com", None, Some("B"));
        assert_eq!(display_name(&r), "B");
    }

    #[test]
    fn test_falls_back_to_email_local_part() {
        let r = recipient("joe@x.com", None, None);
        assert_eq!(display_name(&r), "joe");
    }

    #[test]
    fn test_empty_local_part_falls_back_to_there() {
        let r = recipient("@x.com", None, None);
        assert_eq!(display_name(&r), "there");
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let r = recipient("joe@x.com", Some(""), Some(""));
        assert_eq!(display_name(&r), "joe");
    }

    #[test]
    fn test_personalize_substitutes_name_and_email() {
        let r = recipient("ann@example.com", Some("Ann"), None);
        let (subject, content) = personalize(
            &r,
            "Welcome, {name}!",
            "<p>Sent to {email}</p>",
            &HashMap::new(),
        );
        assert_eq!(subject, "Welcome, Ann!");
        assert_eq!(content, "<p>Sent to ann@example.com</p>");
    }

    #[test]
    fn test_derived_values_override_caller_vars() {
        let r = recipient("ann@example.com", Some("Ann"), None);
        let mut caller_vars = HashMap::new();
        caller_vars.insert("name".to_string(), "Impostor".to_string());
        caller_vars.insert("email".to_string(), "spoof@example.com".to_string());

        let (subject, content) = personalize(&r, "{name}", "{email}", &caller_vars);
        assert_eq!(subject, "Ann");
        assert_eq!(content, "ann@example.com");
    }

    #[test]
    fn test_caller_vars_flow_through() {
        let r = recipient("ann@example.com", Some("Ann"), None);
        let mut caller_vars = HashMap::new();
        caller_vars.insert("updateTitle".to_string(), "Dark mode".to_string());

        let (subject, _) = personalize(&r, "{updateTitle} for {name}", "", &caller_vars);
        assert_eq!(subject, "Dark mode for Ann");
    }
}
