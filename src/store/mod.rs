//! In-memory issue store.
//!
//! The store owns every issue for the lifetime of the process. All access goes
//! through a single mutex, so each operation is one atomic step over the collection.

pub mod query;
pub mod seed;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::AppError;
use crate::models::{
    CreateIssueRequest, Issue, UpdateIssueRequest, DEFAULT_ASSIGNEE, DEFAULT_DESCRIPTION,
    DEFAULT_PRIORITY, DEFAULT_STATUS,
};

pub use query::{IssuePage, IssueQuery, SortOrder};

/// Source of fresh issue ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids in textual form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render a timestamp as ISO-8601 UTC with microseconds and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Mutex-guarded, insertion-ordered collection of issues.
pub struct IssueStore {
    issues: Mutex<Vec<Issue>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator), Arc::new(SystemClock))
    }
}

impl IssueStore {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            issues: Mutex::new(Vec::new()),
            ids,
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Issue>>, AppError> {
        self.issues.lock().map_err(|e| {
            tracing::error!("Issue store lock poisoned: {}", e);
            AppError::Internal("Issue store is unavailable".to_string())
        })
    }

    fn timestamp(&self) -> String {
        format_timestamp(self.clock.now())
    }

    /// Number of stored issues.
    pub fn count(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }

    /// Append the built-in sample issues, each under a fresh id.
    pub fn seed_samples(&self) -> Result<usize, AppError> {
        let samples = seed::sample_issues(self.ids.as_ref());
        let count = samples.len();
        self.lock()?.extend(samples);
        Ok(count)
    }

    /// Create an issue, filling defaults for every optional field.
    pub fn create(&self, request: CreateIssueRequest) -> Result<Issue, AppError> {
        let title = match request.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(AppError::title_required()),
        };

        let now = self.timestamp();
        let issue = Issue {
            id: self.ids.next_id(),
            title,
            description: request
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            status: request.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            priority: request
                .priority
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            assignee: request
                .assignee
                .unwrap_or_else(|| DEFAULT_ASSIGNEE.to_string()),
            created_at: now.clone(),
            updated_at: now,
        };

        self.lock()?.push(issue.clone());
        tracing::info!(issue_id = %issue.id, "Created issue");
        Ok(issue)
    }

    /// Fetch a single issue by id.
    pub fn get(&self, id: &str) -> Result<Issue, AppError> {
        self.lock()?
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or_else(AppError::issue_not_found)
    }

    /// Overwrite the fields present in `request` and refresh `updatedAt`.
    ///
    /// The title is not re-validated here, so an update may clear it.
    pub fn update(&self, id: &str, request: UpdateIssueRequest) -> Result<Issue, AppError> {
        let mut issues = self.lock()?;
        let issue = issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(AppError::issue_not_found)?;

        request.apply_to(issue);
        issue.updated_at = self.timestamp();

        tracing::info!(issue_id = %issue.id, "Updated issue");
        Ok(issue.clone())
    }

    /// Run the search, filter, sort and paginate pipeline over a snapshot.
    pub fn query(&self, params: &IssueQuery) -> Result<IssuePage, AppError> {
        let snapshot = self.lock()?.clone();
        query::run(&snapshot, params)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{ManualClock, SequentialIds};
    use super::*;

    fn store() -> (IssueStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let store = IssueStore::new(Arc::new(SequentialIds::default()), clock.clone());
        (store, clock)
    }

    fn titled(title: &str) -> CreateIssueRequest {
        CreateIssueRequest {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let (store, _) = store();
        let issue = store.create(titled("Only a title")).unwrap();

        assert_eq!(issue.id, "issue-1");
        assert_eq!(issue.title, "Only a title");
        assert_eq!(issue.description, "");
        assert_eq!(issue.status, "open");
        assert_eq!(issue.priority, "medium");
        assert_eq!(issue.assignee, "");
        assert_eq!(issue.created_at, issue.updated_at);
        assert_eq!(issue.created_at, "2025-03-01T12:00:00.000000Z");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_create_keeps_supplied_fields() {
        let (store, _) = store();
        let issue = store
            .create(CreateIssueRequest {
                title: Some("Crash on save".to_string()),
                description: Some("Stack trace attached".to_string()),
                status: Some("in_progress".to_string()),
                priority: Some("high".to_string()),
                assignee: Some("dev@example.com".to_string()),
            })
            .unwrap();

        assert_eq!(issue.description, "Stack trace attached");
        assert_eq!(issue.status, "in_progress");
        assert_eq!(issue.priority, "high");
        assert_eq!(issue.assignee, "dev@example.com");
    }

    #[test]
    fn test_create_rejects_missing_or_empty_title() {
        let (store, _) = store();

        let missing = store.create(CreateIssueRequest::default());
        assert_eq!(missing, Err(AppError::title_required()));

        let empty = store.create(titled(""));
        assert_eq!(empty, Err(AppError::title_required()));

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_get_round_trips_created_issue() {
        let (store, _) = store();
        let created = store.create(titled("Find me")).unwrap();

        assert_eq!(store.get(&created.id).unwrap(), created);
    }

    #[test]
    fn test_get_unknown_id() {
        let (store, _) = store();
        store.create(titled("Present")).unwrap();

        assert_eq!(store.get("missing"), Err(AppError::issue_not_found()));
    }

    #[test]
    fn test_update_changes_only_supplied_fields() {
        let (store, clock) = store();
        let created = store
            .create(CreateIssueRequest {
                title: Some("Original".to_string()),
                description: Some("Keep me".to_string()),
                ..Default::default()
            })
            .unwrap();

        clock.advance(90);
        let updated = store
            .update(
                &created.id,
                UpdateIssueRequest {
                    status: Some("closed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.status, "closed");
        assert_eq!(updated.title, "Original");
        assert_eq!(updated.description, "Keep me");
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(store.get(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_with_empty_payload_refreshes_timestamp() {
        let (store, clock) = store();
        let created = store.create(titled("Untouched")).unwrap();

        clock.advance(1);
        let updated = store
            .update(&created.id, UpdateIssueRequest::default())
            .unwrap();

        assert_eq!(updated.title, created.title);
        assert_eq!(updated.updated_at, "2025-03-01T12:00:01.000000Z");
    }

    #[test]
    fn test_update_allows_clearing_title() {
        let (store, _) = store();
        let created = store.create(titled("Soon blank")).unwrap();

        let updated = store
            .update(
                &created.id,
                UpdateIssueRequest {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "");
    }

    #[test]
    fn test_update_unknown_id() {
        let (store, _) = store();
        store.create(titled("Existing")).unwrap();

        let result = store.update("missing", UpdateIssueRequest::default());
        assert_eq!(result, Err(AppError::issue_not_found()));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_seed_samples_assigns_fresh_ids() {
        let (store, _) = store();
        assert_eq!(store.seed_samples().unwrap(), 5);

        let created = store.create(titled("After seed")).unwrap();
        assert_eq!(created.id, "issue-6");
        assert_eq!(store.count().unwrap(), 6);
    }

    #[test]
    fn test_query_runs_against_current_contents() {
        let (store, _) = store();
        store.seed_samples().unwrap();

        let page = store
            .query(&IssueQuery {
                status: Some("closed".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.issues[0].title, "Add dark mode");
    }
}
