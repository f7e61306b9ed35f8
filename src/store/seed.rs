//! Sample issues loaded at startup.

use super::IdGenerator;
use crate::models::Issue;

struct Sample {
    title: &'static str,
    description: &'static str,
    status: &'static str,
    priority: &'static str,
    assignee: &'static str,
    created_at: &'static str,
    updated_at: &'static str,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        title: "Fix login bug",
        description: "Users cannot log in with special characters in password",
        status: "open",
        priority: "high",
        assignee: "john.doe@example.com",
        created_at: "2024-01-15T10:30:00Z",
        updated_at: "2024-01-15T10:30:00Z",
    },
    Sample {
        title: "Improve UI responsiveness",
        description: "The application should work better on mobile devices",
        status: "in_progress",
        priority: "medium",
        assignee: "jane.smith@example.com",
        created_at: "2024-01-14T09:15:00Z",
        updated_at: "2024-01-16T14:22:00Z",
    },
    Sample {
        title: "Add dark mode",
        description: "Implement dark mode theme for better user experience",
        status: "closed",
        priority: "low",
        assignee: "bob.wilson@example.com",
        created_at: "2024-01-10T16:45:00Z",
        updated_at: "2024-01-18T11:30:00Z",
    },
    Sample {
        title: "Database performance optimization",
        description: "Optimize slow queries in the user management module",
        status: "open",
        priority: "high",
        assignee: "alice.brown@example.com",
        created_at: "2024-01-12T13:20:00Z",
        updated_at: "2024-01-17T09:45:00Z",
    },
    Sample {
        title: "Update documentation",
        description: "API documentation needs to be updated with latest changes",
        status: "in_progress",
        priority: "medium",
        assignee: "charlie.davis@example.com",
        created_at: "2024-01-11T08:00:00Z",
        updated_at: "2024-01-16T15:10:00Z",
    },
];

/// Build the sample issues, drawing a fresh id for each.
pub fn sample_issues(ids: &dyn IdGenerator) -> Vec<Issue> {
    SAMPLES
        .iter()
        .map(|sample| Issue {
            id: ids.next_id(),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            status: sample.status.to_string(),
            priority: sample.priority.to_string(),
            assignee: sample.assignee.to_string(),
            created_at: sample.created_at.to_string(),
            updated_at: sample.updated_at.to_string(),
        })
        .collect()
}
