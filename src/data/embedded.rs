//! Bundled reference content.
//!
//! Every dataset is embedded at compile time with `include_str!()` and
//! parsed once by [`super::Datasets::load`].

/// CPT codes
pub const CPT_CODES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/cpt_codes.json"));

/// HCPCS Level II codes
pub const HCPCS_CODES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/hcpcs_codes.json"));

pub const MEDICAL_PREFIXES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/medical_prefixes.json"));

pub const MEDICAL_SUFFIXES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/medical_suffixes.json"));

pub const MEDICAL_ROOTS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/medical_roots.json"));

/// Clinical note phrases
pub const MEDICAL_PHRASES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/medical_phrases.json"));

/// Scoring systems, protocols and reference charts
pub const CHARTS_TIMELINES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/charts_timelines.json"));

pub const LAB_TESTS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/lab_tests.json"));
