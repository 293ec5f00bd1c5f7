//! Document head metadata (title, description, canonical URL, JSON-LD).
use serde::Serialize;
use serde_json::{Value, json};

use super::DetailRecord;
use super::routes::{Route, Section};
use crate::data::models::ChartTimelineEntry;

const SITE_NAME: &str = "MedRef";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub json_ld: Value,
}

pub fn canonical_url(site_url: &str, route: &Route) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), route.path())
}

pub fn listing(section: Section, site_url: &str) -> PageMeta {
    let url = canonical_url(site_url, &Route::Listing(section));
    PageMeta {
        title: format!("{} | {SITE_NAME}", section.title()),
        description: section.description().to_string(),
        json_ld: json!({
            "@context": "https://schema.org",
            "@type": "CollectionPage",
            "name": section.title(),
            "description": section.description(),
            "url": url,
        }),
        canonical_url: url,
    }
}

pub fn detail(section: Section, record: &DetailRecord<'_>, site_url: &str) -> PageMeta {
    let route = Route::detail(section, record.key());
    let url = canonical_url(site_url, &route);
    let coding_system = if section == Section::HcpcsCodes { "HCPCS" } else { "CPT" };

    let (title, description, json_ld) = match record {
        DetailRecord::Code(c) => (
            format!("{} - {}", c.code, c.title),
            c.definition.clone(),
            json!({
                "@context": "https://schema.org",
                "@type": "MedicalCode",
                "codeValue": c.code,
                "codingSystem": coding_system,
                "name": c.title,
                "description": c.definition,
                "url": url,
            }),
        ),
        DetailRecord::Term(t) => (
            format!("{}: {}", t.term, t.meaning),
            format!("{} means \"{}\". {}", t.term, t.meaning, t.clinical_context),
            json!({
                "@context": "https://schema.org",
                "@type": "DefinedTerm",
                "name": t.term,
                "description": t.meaning,
                "inDefinedTermSet": section.title(),
                "url": url,
            }),
        ),
        DetailRecord::Phrase(p) => (
            p.phrase.clone(),
            p.meaning.clone(),
            json!({
                "@context": "https://schema.org",
                "@type": "DefinedTerm",
                "name": p.phrase,
                "description": p.meaning,
                "inDefinedTermSet": section.title(),
                "url": url,
            }),
        ),
        DetailRecord::Chart(c) => (c.name.clone(), c.description.clone(), chart_json_ld(c, &url)),
        DetailRecord::LabTest(t) => (
            t.test_name.clone(),
            t.clinical_relevance.clone(),
            json!({
                "@context": "https://schema.org",
                "@type": "MedicalTest",
                "name": t.test_name,
                "description": t.clinical_relevance,
                "relevantSpecialty": t.specialty,
                "url": url,
            }),
        ),
    };

    PageMeta {
        title: format!("{title} | {SITE_NAME}"),
        description,
        canonical_url: url,
        json_ld,
    }
}

fn chart_json_ld(chart: &ChartTimelineEntry, url: &str) -> Value {
    let page = json!({
        "@context": "https://schema.org",
        "@type": "MedicalWebPage",
        "name": chart.name,
        "description": chart.description,
        "url": url,
    });
    if chart.faqs.is_empty() {
        return page;
    }

    let faq = json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": chart.faqs.iter().map(|f| json!({
            "@type": "Question",
            "name": f.question,
            "acceptedAnswer": { "@type": "Answer", "text": f.answer },
        })).collect::<Vec<_>>(),
    });
    Value::Array(vec![page, faq])
}

pub fn not_found(path: &str, site_url: &str) -> PageMeta {
    PageMeta {
        title: format!("Page Not Found | {SITE_NAME}"),
        description: format!("No page exists at {path}."),
        canonical_url: format!("{}{path}", site_url.trim_end_matches('/')),
        json_ld: Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datasets;

    #[test]
    fn test_canonical_url_strips_trailing_slash() {
        let url = canonical_url("https://site.test/", &Route::Listing(Section::LabTests));
        assert_eq!(url, "https://site.test/lab-tests");
    }

    #[test]
    fn test_code_json_ld() {
        let code = datasets().hcpcs_codes.find_by_code("G0438").unwrap();
        let meta = detail(Section::HcpcsCodes, &DetailRecord::Code(code), "https://site.test");
        assert_eq!(meta.json_ld["@type"], "MedicalCode");
        assert_eq!(meta.json_ld["codingSystem"], "HCPCS");
        assert_eq!(
            meta.canonical_url,
            "https://site.test/hcpcs-codes/g0438-initial-annual-wellness-visit"
        );
    }

    #[test]
    fn test_chart_with_faqs_adds_faq_page() {
        let chart = datasets().charts_timelines.get("glasgow-coma-scale").unwrap();
        let meta = detail(Section::ChartsTimelines, &DetailRecord::Chart(chart), "https://site.test");
        let blocks = meta.json_ld.as_array().unwrap();
        assert_eq!(blocks[1]["@type"], "FAQPage");
        assert_eq!(blocks[1]["mainEntity"].as_array().unwrap().len(), chart.faqs.len());
    }

    #[test]
    fn test_chart_without_faqs_is_single_block() {
        let chart = datasets().charts_timelines.get("cha2ds2-vasc").unwrap();
        let meta = detail(Section::ChartsTimelines, &DetailRecord::Chart(chart), "https://site.test");
        assert_eq!(meta.json_ld["@type"], "MedicalWebPage");
    }
}
