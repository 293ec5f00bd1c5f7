//! Path ⇄ route mapping for listing and detail pages.
use serde::Serialize;

use crate::data::Facet;

/// One reference section of the site: a listing page plus its detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    CptCodes,
    HcpcsCodes,
    MedicalPrefixes,
    MedicalSuffixes,
    MedicalRoots,
    MedicalPhrases,
    ChartsTimelines,
    LabTests,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::CptCodes,
        Section::HcpcsCodes,
        Section::MedicalPrefixes,
        Section::MedicalSuffixes,
        Section::MedicalRoots,
        Section::MedicalPhrases,
        Section::ChartsTimelines,
        Section::LabTests,
    ];

    pub fn segment(self) -> &'static str {
        match self {
            Self::CptCodes => "cpt-codes",
            Self::HcpcsCodes => "hcpcs-codes",
            Self::MedicalPrefixes => "medical-prefixes",
            Self::MedicalSuffixes => "medical-suffixes",
            Self::MedicalRoots => "medical-roots",
            Self::MedicalPhrases => "medical-phrases",
            Self::ChartsTimelines => "charts-timelines",
            Self::LabTests => "lab-tests",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.segment() == segment)
    }

    /// Listing path, e.g. `/cpt-codes`.
    pub fn path(self) -> String {
        format!("/{}", self.segment())
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CptCodes => "CPT Codes",
            Self::HcpcsCodes => "HCPCS Codes",
            Self::MedicalPrefixes => "Medical Prefixes",
            Self::MedicalSuffixes => "Medical Suffixes",
            Self::MedicalRoots => "Medical Roots",
            Self::MedicalPhrases => "Medical Phrases",
            Self::ChartsTimelines => "Charts & Timelines",
            Self::LabTests => "Lab Tests",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CptCodes => {
                "Search CPT procedure codes with definitions, documentation requirements and billing tips."
            }
            Self::HcpcsCodes => {
                "Browse HCPCS Level II codes for supplies, drugs, equipment and Medicare services."
            }
            Self::MedicalPrefixes => "Medical prefixes with meanings, origins and clinical examples.",
            Self::MedicalSuffixes => "Medical suffixes with meanings, origins and clinical examples.",
            Self::MedicalRoots => "Medical word roots with meanings, origins and clinical examples.",
            Self::MedicalPhrases => {
                "Common clinical documentation phrases and where they belong in the note."
            }
            Self::ChartsTimelines => {
                "Clinical scoring systems, time-critical protocols and reference charts."
            }
            Self::LabTests => "Laboratory tests with clinical relevance and sex-specific reference ranges.",
        }
    }

    /// Facet offered by the listing page's filter menu.
    pub fn primary_facet(self) -> Facet {
        match self {
            Self::CptCodes | Self::HcpcsCodes => Facet::Specialty,
            Self::MedicalPrefixes | Self::MedicalSuffixes | Self::MedicalRoots => Facet::Specialty,
            Self::MedicalPhrases => Facet::SectionOfNote,
            Self::ChartsTimelines => Facet::Category,
            Self::LabTests => Facet::Specialty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing(Section),
    Detail { section: Section, key: String },
    Unknown(String),
}

impl Route {
    /// Resolve a request path. Trailing slashes and any query string or
    /// fragment are ignored; the detail segment is matched verbatim.
    pub fn resolve(path: &str) -> Route {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [section] => match Section::from_segment(section) {
                Some(section) => Route::Listing(section),
                None => Route::Unknown(path.to_string()),
            },
            [section, key] => match Section::from_segment(section) {
                Some(section) => Route::Detail {
                    section,
                    key: (*key).to_string(),
                },
                None => Route::Unknown(path.to_string()),
            },
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn detail(section: Section, key: impl Into<String>) -> Route {
        Route::Detail {
            section,
            key: key.into(),
        }
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Route::Listing(section) | Route::Detail { section, .. } => Some(*section),
            Route::Unknown(_) => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Listing(section) => section.path(),
            Route::Detail { section, key } => format!("{}/{key}", section.path()),
            Route::Unknown(path) => path.clone(),
        }
    }
}
