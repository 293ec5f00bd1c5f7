//! Cross-reference resolution for detail pages.
//!
//! Related mentions are free text. A mention becomes a link only when it
//! names a record that exists; otherwise it is shown as plain text.
use serde::Serialize;

use super::routes::{Route, Section};
use crate::data::Datasets;
use crate::data::models::{CodeEntry, PhraseEntry, TerminologyEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedRef {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RelatedRef {
    fn plain(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
        }
    }

    fn linked(label: &str, route: Route) -> Self {
        Self {
            label: label.to_string(),
            href: Some(route.path()),
        }
    }
}

/// Related codes may live in either code set.
pub fn related_codes(datasets: &Datasets, entry: &CodeEntry) -> Vec<RelatedRef> {
    entry
        .related_codes
        .iter()
        .map(|mention| {
            let cpt = datasets
                .cpt_codes
                .find_by_code(mention)
                .map(|c| Route::detail(Section::CptCodes, &c.slug));
            let route = cpt.or_else(|| {
                datasets
                    .hcpcs_codes
                    .find_by_code(mention)
                    .map(|c| Route::detail(Section::HcpcsCodes, &c.slug))
            });
            match route {
                Some(route) => RelatedRef::linked(mention, route),
                None => RelatedRef::plain(mention),
            }
        })
        .collect()
}

/// Related terms may be prefixes, suffixes or roots.
pub fn related_terms(datasets: &Datasets, entry: &TerminologyEntry) -> Vec<RelatedRef> {
    let catalogs = [
        (Section::MedicalPrefixes, &datasets.medical_prefixes),
        (Section::MedicalSuffixes, &datasets.medical_suffixes),
        (Section::MedicalRoots, &datasets.medical_roots),
    ];

    entry
        .related_terms
        .iter()
        .map(|mention| {
            let found = catalogs.iter().find_map(|(section, catalog)| {
                catalog
                    .get(mention)
                    .map(|t| Route::detail(*section, &t.term))
            });
            match found {
                Some(route) => RelatedRef::linked(mention, route),
                None => RelatedRef::plain(mention),
            }
        })
        .collect()
}

pub fn related_phrases(datasets: &Datasets, entry: &PhraseEntry) -> Vec<RelatedRef> {
    entry
        .related_phrases
        .iter()
        .map(|id| match datasets.medical_phrases.get(id) {
            Some(phrase) => RelatedRef {
                label: phrase.phrase.clone(),
                href: Some(Route::detail(Section::MedicalPhrases, &phrase.id).path()),
            },
            None => RelatedRef::plain(id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datasets;

    #[test]
    fn test_related_codes_cross_code_sets() {
        let datasets = datasets();
        let g2211 = datasets.hcpcs_codes.find_by_code("G2211").unwrap();
        let refs = related_codes(datasets, g2211);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].label, "99214");
        assert!(refs[0].href.as_deref().unwrap().starts_with("/cpt-codes/"));
    }

    #[test]
    fn test_unknown_code_is_plain_text() {
        let datasets = datasets();
        let g0438 = datasets.hcpcs_codes.find_by_code("G0438").unwrap();
        let refs = related_codes(datasets, g0438);
        assert_eq!(
            refs[0].href.as_deref(),
            Some("/hcpcs-codes/g0439-subsequent-annual-wellness-visit")
        );
        assert_eq!(refs[1], RelatedRef::plain("G0402"));
    }

    #[test]
    fn test_related_terms_span_catalogs() {
        let datasets = datasets();
        let brady = datasets.medical_prefixes.get("brady-").unwrap();
        let refs = related_terms(datasets, brady);
        assert_eq!(refs[0].href.as_deref(), Some("/medical-prefixes/tachy-"));
        assert_eq!(refs[1].href.as_deref(), Some("/medical-suffixes/-cardia"));
    }

    #[test]
    fn test_missing_phrase_is_unlinked() {
        let datasets = datasets();
        let nad = datasets.medical_phrases.get("no-acute-distress").unwrap();
        let refs = related_phrases(datasets, nad);
        assert_eq!(
            refs[0].href.as_deref(),
            Some("/medical-phrases/alert-and-oriented-times-three")
        );
        assert_eq!(refs[1], RelatedRef::plain("well-appearing"));
    }
}
