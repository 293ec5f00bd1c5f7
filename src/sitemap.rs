//! XML sitemap over every listing and detail route.
use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::data::{Catalog, Datasets, Record};
use crate::pages::routes::{Route, Section};

/// Every listing route followed by its detail routes, in natural order.
pub fn routes(datasets: &Datasets) -> Vec<Route> {
    let mut routes = Vec::new();
    for section in Section::ALL {
        routes.push(Route::Listing(section));
        let keys = match section {
            Section::CptCodes => keys(&datasets.cpt_codes),
            Section::HcpcsCodes => keys(&datasets.hcpcs_codes),
            Section::MedicalPrefixes => keys(&datasets.medical_prefixes),
            Section::MedicalSuffixes => keys(&datasets.medical_suffixes),
            Section::MedicalRoots => keys(&datasets.medical_roots),
            Section::MedicalPhrases => keys(&datasets.medical_phrases),
            Section::ChartsTimelines => keys(&datasets.charts_timelines),
            Section::LabTests => keys(&datasets.lab_tests),
        };
        routes.extend(keys.into_iter().map(|key| Route::detail(section, key)));
    }
    routes
}

fn keys<T: Record>(catalog: &Catalog<T>) -> Vec<String> {
    catalog.all().into_iter().map(|r| r.key().to_string()).collect()
}

pub fn build(datasets: &Datasets, site_url: &str, lastmod: NaiveDate) -> String {
    let base = site_url.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d");

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in routes(datasets) {
        let priority = match route {
            Route::Listing(_) => "0.8",
            _ => "0.6",
        };
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <priority>{priority}</priority>\n  </url>\n",
            escape(&format!("{base}{}", route.path()))
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
