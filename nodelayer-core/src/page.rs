//! Pagination parameter validation and result windowing.
//!
//! This module resolves a [`PaginationInput`] into a concrete
//! offset/size window and summarizes a returned window as a [`PageInfo`].
//! The tie-break rules between competing parameters are deliberate and must
//! be preserved exactly: `first` overrides `last` for page size, `after`
//! overrides `before` for the offset.

use serde::{Deserialize, Serialize};

use crate::cursor::encode_offset;
use crate::error::{NodeStoreError, NodeStoreResult};
use crate::query::PaginationInput;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Summary of a paginated result window.
///
/// Computed fresh per query and never mutated after construction. The
/// boundary cursors are opaque tokens produced by the cursor codec; both are
/// `None` when the result set is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether strictly more results exist beyond the returned window.
    pub has_next_page: bool,
    /// Whether results exist before the returned window.
    pub has_previous_page: bool,
    /// Cursor of the first returned result.
    pub start_cursor: Option<String>,
    /// Cursor of the last returned result.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Builds the page info for a window starting at `offset` that returned
    /// `returned` rows, where `has_next` says whether more rows exist past it.
    pub fn for_window(offset: usize, returned: usize, has_next: bool) -> NodeStoreResult<Self> {
        if returned == 0 {
            return Ok(PageInfo {
                has_next_page: has_next,
                has_previous_page: offset > 0,
                start_cursor: None,
                end_cursor: None,
            });
        }

        Ok(PageInfo {
            has_next_page: has_next,
            has_previous_page: offset > 0,
            start_cursor: Some(encode_offset(offset as i64)?),
            end_cursor: Some(encode_offset((offset + returned - 1) as i64)?),
        })
    }
}

/// Validates pagination parameters before windowing.
///
/// Setting both `first` and `last` is an ambiguous page-size request and is
/// rejected here; every other combination (including all-empty) is accepted.
/// This runs ahead of [`PageWindow::resolve`] in the request path, whose
/// `first`-wins rule is a defensive fallback rather than the primary contract.
pub fn validate_pagination(pagination: &PaginationInput) -> NodeStoreResult<()> {
    if pagination.first > 0 && pagination.last > 0 {
        return Err(NodeStoreError::InvalidPagination(
            "if `first` is specified for pagination, `last` cannot be specified".to_string(),
        ));
    }

    Ok(())
}

/// A resolved pagination window: skip `offset` rows, return up to `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of rows to skip before the window starts.
    pub offset: usize,
    /// Maximum number of rows in the window.
    pub size: usize,
}

impl PageWindow {
    /// Resolves pagination input into a concrete window.
    ///
    /// Returns `Ok(None)` for `None` input: the caller should return all
    /// results unwindowed. Page size starts from [`DEFAULT_PAGE_SIZE`]; a
    /// positive `last` adopts it, a positive `first` overrides it. The offset
    /// starts at 0; a parseable `before` adopts it, a parseable `after`
    /// overrides it. A non-empty `before`/`after` that does not parse as a
    /// non-negative integer is a validation error, not silently ignored.
    pub fn resolve(pagination: Option<&PaginationInput>) -> NodeStoreResult<Option<Self>> {
        let Some(pagination) = pagination else {
            return Ok(None);
        };

        let mut size = DEFAULT_PAGE_SIZE;
        if pagination.last > 0 {
            size = pagination.last as usize;
        }
        if pagination.first > 0 {
            size = pagination.first as usize;
        }

        let mut offset = 0_usize;
        if !pagination.before.is_empty() {
            offset = parse_offset("before", &pagination.before)?;
        }
        if !pagination.after.is_empty() {
            offset = parse_offset("after", &pagination.after)?;
        }

        Ok(Some(PageWindow { offset, size }))
    }

    /// One-based page number for stores that window with page/size semantics
    /// rather than offset/limit.
    pub fn page_number(&self) -> usize {
        self.offset / self.size + 1
    }
}

fn parse_offset(name: &str, value: &str) -> NodeStoreResult<usize> {
    value.parse::<usize>().map_err(|_| {
        NodeStoreError::InvalidPagination(format!(
            "expected `{name}` to be parseable as a non-negative int; got {value:?}"
        ))
    })
}
