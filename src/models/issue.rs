//! Issue model matching the frontend Issue interface.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DESCRIPTION: &str = "";
pub const DEFAULT_STATUS: &str = "open";
pub const DEFAULT_PRIORITY: &str = "medium";
pub const DEFAULT_ASSIGNEE: &str = "";

/// A tracked work item.
///
/// `status` and `priority` are free text by convention (`open`, `in_progress`,
/// `closed` and `low`, `medium`, `high`); the store does not enforce a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Issue {
    /// Look up a field by its wire name. Unknown names yield `None`.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "id" => &self.id,
            "title" => &self.title,
            "description" => &self.description,
            "status" => &self.status,
            "priority" => &self.priority,
            "assignee" => &self.assignee,
            "createdAt" => &self.created_at,
            "updatedAt" => &self.updated_at,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Request body for creating a new issue.
///
/// `title` is optional here so that a missing title surfaces as a validation
/// error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Request body for updating an existing issue. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl UpdateIssueRequest {
    /// Overwrite every field present in the request. Timestamps are the caller's concern.
    ///
    /// A key sent as `null` deserializes to `None` and is skipped rather than
    /// stored, so every field of an `Issue` stays a string.
    pub fn apply_to(self, issue: &mut Issue) {
        if let Some(title) = self.title {
            issue.title = title;
        }
        if let Some(description) = self.description {
            issue.description = description;
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = self.assignee {
            issue.assignee = assignee;
        }
    }
}
