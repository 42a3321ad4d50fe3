//! User models for the Jira API.

use serde::Deserialize;

/// A Jira account: reporter, assignee, comment author or assignable user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Atlassian account id.
    #[serde(default)]
    pub account_id: String,

    /// Email address. Often empty because of privacy settings.
    #[serde(default)]
    pub email_address: String,

    /// Display name.
    #[serde(default)]
    pub display_name: String,

    /// Whether the account is active.
    #[serde(default)]
    pub active: bool,
}

impl User {
    /// Returns the display name, falling back to the account id.
    pub fn display(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else if !self.account_id.is_empty() {
            &self.account_id
        } else {
            "Unknown"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize() {
        let json = r#"{
            "accountId": "5b10a2844c20165700ede21g",
            "emailAddress": "mia@example.com",
            "displayName": "Mia Krystof",
            "active": true,
            "timeZone": "Australia/Sydney"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.account_id, "5b10a2844c20165700ede21g");
        assert_eq!(user.display_name, "Mia Krystof");
        assert!(user.active);
    }

    #[test]
    fn test_user_missing_fields_default() {
        let user: User = serde_json::from_str("{}").unwrap();
        assert_eq!(user, User::default());
        assert!(!user.active);
        assert_eq!(user.display(), "Unknown");
    }

    #[test]
    fn test_user_display_falls_back_to_account_id() {
        let user = User {
            account_id: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display(), "abc");
    }
}
