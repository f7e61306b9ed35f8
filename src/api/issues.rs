//! Issue API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use super::{created, success, ApiResult};
use crate::models::{CreateIssueRequest, Issue, UpdateIssueRequest};
use crate::store::{query, IssuePage, IssueQuery, SortOrder};
use crate::AppState;

/// List query parameters. Every parameter is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<usize>,
}

impl From<ListIssuesParams> for IssueQuery {
    fn from(params: ListIssuesParams) -> Self {
        Self {
            search: params.search,
            status: params.status,
            priority: params.priority,
            assignee: params.assignee,
            sort_by: params
                .sort_by
                .unwrap_or_else(|| query::DEFAULT_SORT_FIELD.to_string()),
            sort_order: params
                .sort_order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
            page: params.page.unwrap_or(query::DEFAULT_PAGE),
            page_size: params.page_size.unwrap_or(query::DEFAULT_PAGE_SIZE),
        }
    }
}

/// GET /issues - Search, filter, sort and paginate issues.
pub async fn list_issues(
    State(state): State<AppState>,
    params: Result<Query<ListIssuesParams>, QueryRejection>,
) -> ApiResult<IssuePage> {
    let Query(params) = params?;
    let query = IssueQuery::from(params);
    tracing::debug!(?query, "Listing issues");

    success(state.store.query(&query)?)
}

/// GET /issues/:id - Get a single issue.
pub async fn get_issue(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Issue> {
    success(state.store.get(&id)?)
}

/// POST /issues - Create a new issue.
pub async fn create_issue(
    State(state): State<AppState>,
    request: Result<Json<Option<CreateIssueRequest>>, JsonRejection>,
) -> ApiResult<Issue> {
    // A `null` body is treated like `{}` so the title check decides the outcome.
    let Json(request) = request?;
    created(state.store.create(request.unwrap_or_default())?)
}

/// PUT /issues/:id - Update an issue.
pub async fn update_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<UpdateIssueRequest>, JsonRejection>,
) -> ApiResult<Issue> {
    let Json(request) = request?;
    success(state.store.update(&id, request)?)
}
