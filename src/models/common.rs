//! Common types shared across Jira API models.
//!
//! This module defines the paging envelope, the error body, small lookup
//! records (queues, request types, priorities, transitions) and the id
//! deserializer used by all of them.

use serde::Deserialize;

/// Deserializes an id that Jira sends either as a string or as a number.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or an integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Paged list envelope used by the service desk API (`{"values": [...]}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Whether this is the last page.
    #[serde(default)]
    pub is_last_page: Option<bool>,
}

/// Error body returned by Jira on 4xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraErrorBody {
    /// General error messages.
    #[serde(default)]
    pub error_messages: Vec<String>,

    /// Field-specific errors keyed by field name.
    #[serde(default)]
    pub errors: serde_json::Map<String, serde_json::Value>,

    /// Single message used by some service desk endpoints.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl JiraErrorBody {
    /// Collects every message into one line, or `None` if the body had none.
    pub fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = self.error_messages.clone();
        parts.extend(self.error_message.iter().cloned());
        parts.extend(self.errors.iter().map(|(field, message)| match message.as_str() {
            Some(text) => format!("{}: {}", field, text),
            None => format!("{}: {}", field, message),
        }));

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

/// A service desk queue.
#[derive(Debug, Clone, Deserialize)]
pub struct Queue {
    /// Queue id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Queue name.
    #[serde(default)]
    pub name: String,
}

/// A service desk, used to map a project key to its id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDesk {
    /// Service desk id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Key of the backing project (e.g., "SUP").
    #[serde(default)]
    pub project_key: String,

    /// Name of the backing project.
    #[serde(default)]
    pub project_name: String,
}

/// A request type offered by the service desk.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestType {
    /// Request type id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display name (e.g., "Get IT help").
    #[serde(default)]
    pub name: String,

    /// Description shown on the portal.
    #[serde(default)]
    pub description: String,
}

/// An issue priority.
#[derive(Debug, Clone, Deserialize)]
pub struct Priority {
    /// Priority id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Priority name (e.g., "High").
    #[serde(default)]
    pub name: String,
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    /// Transition id, passed back when transitioning.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Transition name (e.g., "Resolve this issue").
    #[serde(default)]
    pub name: String,

    /// Target status name.
    #[serde(default, rename = "to", deserialize_with = "deserialize_status_name")]
    pub to_status: Option<String>,
}

/// Reads `{"name": "..."}` status objects down to their name.
fn deserialize_status_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Named {
        #[serde(default)]
        name: Option<String>,
    }

    Ok(Option::<Named>::deserialize(deserializer)?.and_then(|n| n.name))
}

/// Response of `GET issue/{id}/transitions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    /// Available transitions.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_accepts_numeric_id() {
        let queue: Queue = serde_json::from_str(r#"{"id": 7, "name": "Open"}"#).unwrap();
        assert_eq!(queue.id, "7");
        assert_eq!(queue.name, "Open");

        let queue: Queue = serde_json::from_str(r#"{"id": "8", "name": "Mine"}"#).unwrap();
        assert_eq!(queue.id, "8");
    }

    #[test]
    fn test_paged_response_defaults() {
        let page: PagedResponse<Queue> = serde_json::from_str("{}").unwrap();
        assert!(page.values.is_empty());
        assert!(page.is_last_page.is_none());
    }

    #[test]
    fn test_transition_deserialize() {
        let json = r#"{"transitions": [
            {"id": "11", "name": "Start", "to": {"name": "In Progress", "id": "3"}},
            {"id": "21", "name": "Close"}
        ]}"#;
        let response: TransitionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.transitions.len(), 2);
        assert_eq!(response.transitions[0].to_status.as_deref(), Some("In Progress"));
        assert!(response.transitions[1].to_status.is_none());
    }

    #[test]
    fn test_error_body_summary() {
        let json = r#"{
            "errorMessages": ["Issue does not exist"],
            "errors": {"summary": "Summary is required"}
        }"#;
        let body: JiraErrorBody = serde_json::from_str(json).unwrap();
        let summary = body.summary().unwrap();
        assert!(summary.contains("Issue does not exist"));
        assert!(summary.contains("summary: Summary is required"));
    }

    #[test]
    fn test_error_body_service_desk_shape() {
        let body: JiraErrorBody =
            serde_json::from_str(r#"{"errorMessage": "Request type is invalid"}"#).unwrap();
        assert_eq!(body.summary().as_deref(), Some("Request type is invalid"));
    }

    #[test]
    fn test_error_body_empty() {
        assert!(JiraErrorBody::default().summary().is_none());
    }
}
