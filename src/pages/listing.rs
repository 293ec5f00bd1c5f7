//! Listing page state and its pure recompute function.
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::data::{Catalog, Facet, Record};
use crate::pagination::{PageInfo, paginate, total_pages};

/// Page-local UI state: search text, selected filter, current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    query: String,
    filter: Option<String>,
    current_page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            query: String::new(),
            filter: None,
            current_page: 1,
        }
    }
}

impl ListingState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replace the search text. Always returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.current_page = 1;
    }

    /// Select a filter value (`None` for "all"). Always returns to page 1.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.trim().is_empty());
        self.current_page = 1;
    }

    /// The "clear filters" reset action.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Jump to `page`. Requests outside `[1, total_pages]` are ignored and
    /// return `false`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages.max(1) {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.current_page + 1, total_pages)
    }

    pub fn previous_page(&mut self, total_pages: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page, total_pages),
            None => false,
        }
    }
}

/// Shown in place of results when a search/filter matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: String,
    pub reset_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a, T> {
    pub items: Vec<&'a T>,
    pub page: PageInfo,
    pub total_results: usize,
    pub empty_state: Option<EmptyState>,
}

/// Recompute the visible page for `state` against the full catalog.
pub fn recompute<'a, T: Record>(
    catalog: &'a Catalog<T>,
    facet: Facet,
    state: &ListingState,
    page_size: NonZeroUsize,
) -> ListingView<'a, T> {
    let filter = state.filter().map(|value| (facet, value));
    let matches = catalog.query(state.query(), filter);
    let page = paginate(&matches, page_size, state.current_page());

    let empty_state = matches.is_empty().then(|| EmptyState {
        message: empty_message(state),
        reset_label: "Clear filters",
    });

    ListingView {
        items: page.items.to_vec(),
        page: page.info,
        total_results: matches.len(),
        empty_state,
    }
}

/// Total pages `state` would produce, for validating page jumps.
pub fn page_count<T: Record>(
    catalog: &Catalog<T>,
    facet: Facet,
    state: &ListingState,
    page_size: NonZeroUsize,
) -> usize {
    let filter = state.filter().map(|value| (facet, value));
    total_pages(catalog.query(state.query(), filter).len(), page_size).max(1)
}

fn empty_message(state: &ListingState) -> String {
    match (state.query().trim(), state.filter()) {
        ("", None) => "No entries available.".to_string(),
        ("", Some(filter)) => format!("No results in \"{filter}\"."),
        (query, None) => format!("No results for \"{query}\"."),
        (query, Some(filter)) => format!("No results for \"{query}\" in \"{filter}\"."),
    }
}
