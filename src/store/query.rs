//! List query pipeline: search, filter, sort, paginate.
//!
//! The stages run in that fixed order. Pagination counts the post-filter,
//! post-sort set, so reordering the stages changes results.

use std::cmp::Ordering;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::Issue;

pub const DEFAULT_SORT_FIELD: &str = "updatedAt";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `desc` in any case is descending; every other value is ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Parameters of a list query. Empty strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
    /// Case-insensitive exact match.
    pub status: Option<String>,
    /// Case-insensitive exact match.
    pub priority: Option<String>,
    /// Case-insensitive substring.
    pub assignee: Option<String>,
    /// Wire name of the field to sort by. Unknown names sort as empty strings.
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// 1-based page number. Pages below 1 are empty.
    pub page: i64,
    pub page_size: usize,
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            priority: None,
            assignee: None,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    pub pagination: Pagination,
}

fn present(term: &Option<String>) -> Option<String> {
    term.as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn sort_key<'a>(issue: &'a Issue, field: &str) -> &'a str {
    issue.field(field).unwrap_or("")
}

/// Execute the pipeline over `issues`, which are taken in collection order.
pub fn run(issues: &[Issue], query: &IssueQuery) -> Result<IssuePage, AppError> {
    if query.page_size == 0 {
        return Err(AppError::Internal(
            "pageSize must be greater than zero".to_string(),
        ));
    }

    let search = present(&query.search);
    let status = present(&query.status);
    let priority = present(&query.priority);
    let assignee = present(&query.assignee);

    let mut matched: Vec<&Issue> = issues
        .iter()
        .filter(|issue| match &search {
            Some(term) => contains_ci(&issue.title, term) || contains_ci(&issue.description, term),
            None => true,
        })
        .filter(|issue| match &status {
            Some(wanted) => issue.status.to_lowercase() == *wanted,
            None => true,
        })
        .filter(|issue| match &priority {
            Some(wanted) => issue.priority.to_lowercase() == *wanted,
            None => true,
        })
        .filter(|issue| match &assignee {
            Some(term) => contains_ci(&issue.assignee, term),
            None => true,
        })
        .collect();

    // Timestamps compare correctly as strings since they share one zero-padded format.
    let field = query.sort_by.as_str();
    let compare = |a: &&Issue, b: &&Issue| -> Ordering { sort_key(a, field).cmp(sort_key(b, field)) };
    match query.sort_order {
        SortOrder::Asc => matched.sort_by(compare),
        SortOrder::Desc => matched.sort_by(|a, b| compare(b, a)),
    }

    let total = matched.len();
    let total_pages = total.div_ceil(query.page_size);

    let page_issues = query
        .page
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| index.checked_mul(query.page_size))
        .map(|start| {
            matched
                .iter()
                .skip(start)
                .take(query.page_size)
                .map(|issue| (*issue).clone())
                .collect()
        })
        .unwrap_or_default();

    Ok(IssuePage {
        issues: page_issues,
        pagination: Pagination {
            page: query.page,
            page_size: query.page_size,
            total,
            total_pages,
        },
    })
}
