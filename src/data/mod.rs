//! Read-only reference datasets and their accessor layer.
//!
//! Every dataset is a [`Catalog`] of one record type. Records describe
//! themselves through the [`Record`] trait (key, searchable fields, facets,
//! natural ordering), and the catalog provides the query operations on top.
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

pub mod embedded;
pub mod models;
pub mod search;

use models::{ChartTimelineEntry, CodeEntry, LabTestEntry, PhraseEntry, TerminologyEntry};

/// Errors raised while loading a bundled dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to parse {dataset}: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate key in {dataset}: {key}")]
    DuplicateKey { dataset: &'static str, key: String },

    #[error("key in {dataset} is not URL-safe: {key:?}")]
    InvalidKey { dataset: &'static str, key: String },
}

// ── Record trait ─────────────────────────────────────────────────────

/// How `Catalog::get` compares a requested key against record keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    /// Slugs and ids: byte-for-byte, and validated as URL-safe at load.
    Exact,
    /// Free-text terms such as `brady-`.
    CaseInsensitive,
}

/// A filterable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Category,
    Specialty,
    System,
    SectionOfNote,
}

/// The value a record holds for a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetValue<'a> {
    Single(&'a str),
    /// Comma-joined list, e.g. `"Cardiology, Family Medicine"`.
    Joined(&'a str),
}

pub trait Record {
    const KEY_MATCH: KeyMatch;

    fn key(&self) -> &str;

    /// Fields consulted by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    fn facet(&self, facet: Facet) -> Option<FacetValue<'_>>;

    /// Ordering used by `Catalog::all`. Records that return `Equal`
    /// keep their bundle order.
    fn natural_cmp(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }

    /// Text block written by the "copy to clipboard" action.
    fn clipboard_text(&self) -> String;
}

// ── Catalog ──────────────────────────────────────────────────────────

static URL_SAFE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap());

/// Word parts: `brady-`, `-itis`, `cardio`.
static URL_SAFE_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[A-Za-z0-9]+-?$").unwrap());

/// An immutable, naturally ordered collection of records.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    name: &'static str,
    records: Vec<T>,
}

impl<T: Record> Catalog<T> {
    /// Validate keys and sort into natural order (stable).
    pub fn from_records(name: &'static str, mut records: Vec<T>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            let (pattern, key) = match T::KEY_MATCH {
                KeyMatch::Exact => (&*URL_SAFE_KEY, record.key().to_string()),
                KeyMatch::CaseInsensitive => (&*URL_SAFE_TERM, record.key().to_lowercase()),
            };
            if !pattern.is_match(record.key()) {
                return Err(DatasetError::InvalidKey {
                    dataset: name,
                    key: record.key().to_string(),
                });
            }
            if !seen.insert(key) {
                return Err(DatasetError::DuplicateKey {
                    dataset: name,
                    key: record.key().to_string(),
                });
            }
        }

        records.sort_by(|a, b| a.natural_cmp(b));
        Ok(Self { name, records })
    }

    pub fn from_json(name: &'static str, json: &str) -> Result<Self, DatasetError>
    where
        T: DeserializeOwned,
    {
        let records: Vec<T> = serde_json::from_str(json)
            .map_err(|source| DatasetError::Parse { dataset: name, source })?;
        Self::from_records(name, records)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in natural order.
    #[must_use]
    pub fn all(&self) -> Vec<&T> {
        self.records.iter().collect()
    }

    /// Exact-key lookup. Terms compare case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        match T::KEY_MATCH {
            KeyMatch::Exact => self.records.iter().find(|r| r.key() == key),
            KeyMatch::CaseInsensitive => {
                let wanted = key.to_lowercase();
                self.records.iter().find(|r| r.key().to_lowercase() == wanted)
            }
        }
    }
}

impl Catalog<CodeEntry> {
    /// Look a code entry up by its human-facing code (e.g. `99214`).
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&CodeEntry> {
        self.records
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code.trim()))
    }
}

// ── Datasets ─────────────────────────────────────────────────────────

/// All bundled reference datasets.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub cpt_codes: Catalog<CodeEntry>,
    pub hcpcs_codes: Catalog<CodeEntry>,
    pub medical_prefixes: Catalog<TerminologyEntry>,
    pub medical_suffixes: Catalog<TerminologyEntry>,
    pub medical_roots: Catalog<TerminologyEntry>,
    pub medical_phrases: Catalog<PhraseEntry>,
    pub charts_timelines: Catalog<ChartTimelineEntry>,
    pub lab_tests: Catalog<LabTestEntry>,
}

impl Datasets {
    /// Parse and validate every embedded dataset.
    pub fn load() -> Result<Self, DatasetError> {
        let datasets = Self {
            cpt_codes: Catalog::from_json("cpt_codes", embedded::CPT_CODES)?,
            hcpcs_codes: Catalog::from_json("hcpcs_codes", embedded::HCPCS_CODES)?,
            medical_prefixes: Catalog::from_json("medical_prefixes", embedded::MEDICAL_PREFIXES)?,
            medical_suffixes: Catalog::from_json("medical_suffixes", embedded::MEDICAL_SUFFIXES)?,
            medical_roots: Catalog::from_json("medical_roots", embedded::MEDICAL_ROOTS)?,
            medical_phrases: Catalog::from_json("medical_phrases", embedded::MEDICAL_PHRASES)?,
            charts_timelines: Catalog::from_json("charts_timelines", embedded::CHARTS_TIMELINES)?,
            lab_tests: Catalog::from_json("lab_tests", embedded::LAB_TESTS)?,
        };

        info!(
            cpt = datasets.cpt_codes.len(),
            hcpcs = datasets.hcpcs_codes.len(),
            prefixes = datasets.medical_prefixes.len(),
            suffixes = datasets.medical_suffixes.len(),
            roots = datasets.medical_roots.len(),
            phrases = datasets.medical_phrases.len(),
            charts = datasets.charts_timelines.len(),
            lab_tests = datasets.lab_tests.len(),
            "Reference datasets loaded"
        );

        Ok(datasets)
    }
}

static DATASETS: LazyLock<Datasets> = LazyLock::new(|| match Datasets::load() {
    Ok(datasets) => datasets,
    Err(e) => panic!("bundled reference data is invalid: {e}"),
});

/// Process-wide datasets, loaded on first access and never mutated.
pub fn datasets() -> &'static Datasets {
    &DATASETS
}
