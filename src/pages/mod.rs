//! Page views over the reference datasets.
//!
//! A [`Renderer`] turns a [`Route`] plus the listing UI state into a
//! serializable [`PageView`]: a filtered, paginated listing, a single
//! record with its resolved cross-references, or a not-found view.
use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::debug;

pub mod clipboard;
pub mod detail;
pub mod listing;
pub mod meta;
pub mod routes;

use crate::config::Config;
use crate::data::models::{
    ChartTimelineEntry, CodeEntry, LabTestEntry, PhraseEntry, TerminologyEntry,
};
use crate::data::{Catalog, Datasets, Record};
use crate::pagination::PageInfo;
use clipboard::{Clipboard, Toast, copy_to_clipboard};
use detail::RelatedRef;
use listing::{EmptyState, ListingState};
use meta::PageMeta;
use routes::{Route, Section};

/// A borrowed record of any dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailRecord<'a> {
    Code(&'a CodeEntry),
    Term(&'a TerminologyEntry),
    Phrase(&'a PhraseEntry),
    Chart(&'a ChartTimelineEntry),
    LabTest(&'a LabTestEntry),
}

impl DetailRecord<'_> {
    pub fn key(&self) -> &str {
        match self {
            Self::Code(r) => r.key(),
            Self::Term(r) => r.key(),
            Self::Phrase(r) => r.key(),
            Self::Chart(r) => r.key(),
            Self::LabTest(r) => r.key(),
        }
    }

    pub fn clipboard_text(&self) -> String {
        match self {
            Self::Code(r) => r.clipboard_text(),
            Self::Term(r) => r.clipboard_text(),
            Self::Phrase(r) => r.clipboard_text(),
            Self::Chart(r) => r.clipboard_text(),
            Self::LabTest(r) => r.clipboard_text(),
        }
    }
}

impl<'a> From<&'a CodeEntry> for DetailRecord<'a> {
    fn from(r: &'a CodeEntry) -> Self {
        Self::Code(r)
    }
}

impl<'a> From<&'a TerminologyEntry> for DetailRecord<'a> {
    fn from(r: &'a TerminologyEntry) -> Self {
        Self::Term(r)
    }
}

impl<'a> From<&'a PhraseEntry> for DetailRecord<'a> {
    fn from(r: &'a PhraseEntry) -> Self {
        Self::Phrase(r)
    }
}

impl<'a> From<&'a ChartTimelineEntry> for DetailRecord<'a> {
    fn from(r: &'a ChartTimelineEntry) -> Self {
        Self::Chart(r)
    }
}

impl<'a> From<&'a LabTestEntry> for DetailRecord<'a> {
    fn from(r: &'a LabTestEntry) -> Self {
        Self::LabTest(r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PageView<'a> {
    Listing {
        meta: PageMeta,
        section: Section,
        query: String,
        filter: Option<String>,
        filter_options: Vec<String>,
        items: Vec<DetailRecord<'a>>,
        page: PageInfo,
        total_results: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_state: Option<EmptyState>,
    },
    Detail {
        meta: PageMeta,
        section: Section,
        record: DetailRecord<'a>,
        related: Vec<RelatedRef>,
        copy_text: String,
    },
    NotFound {
        meta: PageMeta,
        message: String,
        back_link: Link,
    },
}

impl PageView<'_> {
    pub fn meta(&self) -> &PageMeta {
        match self {
            Self::Listing { meta, .. } | Self::Detail { meta, .. } | Self::NotFound { meta, .. } => {
                meta
            }
        }
    }
}

// ── Renderer ─────────────────────────────────────────────────────────

pub struct Renderer<'a> {
    datasets: &'a Datasets,
    site_url: String,
    page_size: NonZeroUsize,
}

impl<'a> Renderer<'a> {
    pub fn new(datasets: &'a Datasets, site_url: impl Into<String>, page_size: NonZeroUsize) -> Self {
        Self {
            datasets,
            site_url: site_url.into(),
            page_size,
        }
    }

    pub fn from_config(datasets: &'a Datasets, config: &Config) -> Self {
        Self::new(datasets, config.site_url.clone(), config.page_size())
    }

    /// Render `route`. `state` only applies to listing routes.
    pub fn render(&self, route: &Route, state: &ListingState) -> PageView<'a> {
        let d = self.datasets;
        match route {
            Route::Listing(section) => match section {
                Section::CptCodes => self.listing(*section, &d.cpt_codes, state),
                Section::HcpcsCodes => self.listing(*section, &d.hcpcs_codes, state),
                Section::MedicalPrefixes => self.listing(*section, &d.medical_prefixes, state),
                Section::MedicalSuffixes => self.listing(*section, &d.medical_suffixes, state),
                Section::MedicalRoots => self.listing(*section, &d.medical_roots, state),
                Section::MedicalPhrases => self.listing(*section, &d.medical_phrases, state),
                Section::ChartsTimelines => self.listing(*section, &d.charts_timelines, state),
                Section::LabTests => self.listing(*section, &d.lab_tests, state),
            },
            Route::Detail { section, key } => match self.lookup(*section, key) {
                Some((record, related)) => PageView::Detail {
                    meta: meta::detail(*section, &record, &self.site_url),
                    section: *section,
                    copy_text: record.clipboard_text(),
                    record,
                    related,
                },
                None => {
                    debug!(section = section.segment(), key = %key, "detail not found");
                    PageView::NotFound {
                        meta: meta::not_found(&route.path(), &self.site_url),
                        message: format!("No entry \"{key}\" in {}.", section.title()),
                        back_link: Link {
                            label: format!("Back to {}", section.title()),
                            href: section.path(),
                        },
                    }
                }
            },
            Route::Unknown(path) => PageView::NotFound {
                meta: meta::not_found(path, &self.site_url),
                message: format!("No page exists at {path}."),
                back_link: Link {
                    label: "Back to home".to_string(),
                    href: "/".to_string(),
                },
            },
        }
    }

    /// Resolve a detail route to its record.
    pub fn record(&self, route: &Route) -> Option<DetailRecord<'a>> {
        match route {
            Route::Detail { section, key } => self.lookup(*section, key).map(|(record, _)| record),
            _ => None,
        }
    }

    /// Copy a detail record's text. `None` when the route names no record.
    pub fn copy_record(
        &self,
        route: &Route,
        clipboard: &dyn Clipboard,
        toast_duration_ms: u64,
    ) -> Option<Toast> {
        let record = self.record(route)?;
        Some(copy_to_clipboard(
            clipboard,
            &record.clipboard_text(),
            toast_duration_ms,
        ))
    }

    /// Filter-menu values for a section's primary facet.
    pub fn filter_options(&self, section: Section) -> Vec<String> {
        let d = self.datasets;
        let facet = section.primary_facet();
        match section {
            Section::CptCodes => d.cpt_codes.distinct(facet),
            Section::HcpcsCodes => d.hcpcs_codes.distinct(facet),
            Section::MedicalPrefixes => d.medical_prefixes.distinct(facet),
            Section::MedicalSuffixes => d.medical_suffixes.distinct(facet),
            Section::MedicalRoots => d.medical_roots.distinct(facet),
            Section::MedicalPhrases => d.medical_phrases.distinct(facet),
            Section::ChartsTimelines => d.charts_timelines.distinct(facet),
            Section::LabTests => d.lab_tests.distinct(facet),
        }
    }

    /// Total pages a listing shows for `state`.
    pub fn total_pages(&self, section: Section, state: &ListingState) -> usize {
        let d = self.datasets;
        let facet = section.primary_facet();
        let size = self.page_size;
        match section {
            Section::CptCodes => listing::page_count(&d.cpt_codes, facet, state, size),
            Section::HcpcsCodes => listing::page_count(&d.hcpcs_codes, facet, state, size),
            Section::MedicalPrefixes => listing::page_count(&d.medical_prefixes, facet, state, size),
            Section::MedicalSuffixes => listing::page_count(&d.medical_suffixes, facet, state, size),
            Section::MedicalRoots => listing::page_count(&d.medical_roots, facet, state, size),
            Section::MedicalPhrases => listing::page_count(&d.medical_phrases, facet, state, size),
            Section::ChartsTimelines => listing::page_count(&d.charts_timelines, facet, state, size),
            Section::LabTests => listing::page_count(&d.lab_tests, facet, state, size),
        }
    }

    fn listing<T>(&self, section: Section, catalog: &'a Catalog<T>, state: &ListingState) -> PageView<'a>
    where
        T: Record,
        &'a T: Into<DetailRecord<'a>>,
    {
        let view = listing::recompute(catalog, section.primary_facet(), state, self.page_size);
        PageView::Listing {
            meta: meta::listing(section, &self.site_url),
            section,
            query: state.query().to_string(),
            filter: state.filter().map(str::to_string),
            filter_options: catalog.distinct(section.primary_facet()),
            items: view.items.into_iter().map(Into::into).collect(),
            page: view.page,
            total_results: view.total_results,
            empty_state: view.empty_state,
        }
    }

    fn lookup(&self, section: Section, key: &str) -> Option<(DetailRecord<'a>, Vec<RelatedRef>)> {
        let d = self.datasets;
        let found: (DetailRecord<'a>, Vec<RelatedRef>) = match section {
            Section::CptCodes | Section::HcpcsCodes => {
                let catalog = if section == Section::CptCodes {
                    &d.cpt_codes
                } else {
                    &d.hcpcs_codes
                };
                let entry = catalog.get(key)?;
                (entry.into(), detail::related_codes(d, entry))
            }
            Section::MedicalPrefixes | Section::MedicalSuffixes | Section::MedicalRoots => {
                let catalog = match section {
                    Section::MedicalPrefixes => &d.medical_prefixes,
                    Section::MedicalSuffixes => &d.medical_suffixes,
                    _ => &d.medical_roots,
                };
                let entry = catalog.get(key)?;
                (entry.into(), detail::related_terms(d, entry))
            }
            Section::MedicalPhrases => {
                let entry = d.medical_phrases.get(key)?;
                (entry.into(), detail::related_phrases(d, entry))
            }
            Section::ChartsTimelines => (d.charts_timelines.get(key)?.into(), Vec::new()),
            Section::LabTests => (d.lab_tests.get(key)?.into(), Vec::new()),
        };
        Some(found)
    }
}
