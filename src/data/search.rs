//! Free-text search, facet filtering and facet value listing.
//!
//! All operations are linear scans over the catalog in natural order.
//! Nothing is cached: datasets hold tens of records.
use std::collections::BTreeSet;

use tracing::debug;

use super::models::split_joined;
use super::{Catalog, Facet, FacetValue, Record};

/// Whether any searchable field contains `needle`. `needle` must already
/// be lowercased.
pub fn matches_query<T: Record>(record: &T, needle: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Whether the record's facet matches `value`: exact equality for single
/// values, substring for comma-joined values.
pub fn matches_facet<T: Record>(record: &T, facet: Facet, value: &str) -> bool {
    match record.facet(facet) {
        Some(FacetValue::Single(v)) => v == value,
        Some(FacetValue::Joined(v)) => v.contains(value),
        None => false,
    }
}

impl<T: Record> Catalog<T> {
    /// Case-insensitive substring search across the record's searchable
    /// fields. A blank query returns every record.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&T> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all();
        }

        let hits: Vec<&T> = self
            .records
            .iter()
            .filter(|r| matches_query(*r, &needle))
            .collect();
        debug!(dataset = self.name, query = %needle, hits = hits.len(), "search");
        hits
    }

    /// Records whose facet matches `value`. A blank value selects everything.
    #[must_use]
    pub fn filter(&self, facet: Facet, value: &str) -> Vec<&T> {
        if value.trim().is_empty() {
            return self.all();
        }

        let hits: Vec<&T> = self
            .records
            .iter()
            .filter(|r| matches_facet(*r, facet, value))
            .collect();
        debug!(dataset = self.name, ?facet, value, hits = hits.len(), "filter");
        hits
    }

    #[must_use]
    pub fn filter_by_category(&self, category: &str) -> Vec<&T> {
        self.filter(Facet::Category, category)
    }

    #[must_use]
    pub fn filter_by_specialty(&self, specialty: &str) -> Vec<&T> {
        self.filter(Facet::Specialty, specialty)
    }

    /// Search and facet filter combined, as a listing page applies them.
    #[must_use]
    pub fn query(&self, query: &str, filter: Option<(Facet, &str)>) -> Vec<&T> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| needle.is_empty() || matches_query(*r, &needle))
            .filter(|r| match filter {
                Some((facet, value)) if !value.trim().is_empty() => matches_facet(*r, facet, value),
                _ => true,
            })
            .collect()
    }

    /// Distinct facet values for populating a filter menu: joined values
    /// are split and trimmed, then deduplicated and sorted.
    #[must_use]
    pub fn distinct(&self, facet: Facet) -> Vec<String> {
        let mut values = BTreeSet::new();
        for record in &self.records {
            match record.facet(facet) {
                Some(FacetValue::Single(v)) => {
                    let v = v.trim();
                    if !v.is_empty() {
                        values.insert(v.to_string());
                    }
                }
                Some(FacetValue::Joined(v)) => {
                    values.extend(split_joined(v).map(str::to_string));
                }
                None => {}
            }
        }
        values.into_iter().collect()
    }
}
