use std::cmp::Ordering;
use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

use serde::{Deserialize, Serialize};

use super::{Facet, FacetValue, KeyMatch, Record};

// ── Codes (CPT / HCPCS) ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeEntry {
    pub slug: String,
    pub code: String,
    pub title: String,
    pub category: String,
    /// Comma-joined, e.g. `"Cardiology, Family Medicine"`.
    pub specialty: String,
    pub complexity_level: String,
    pub definition: String,
    #[serde(default)]
    pub documentation_requirements: Vec<String>,
    /// Free-text mentions of other codes.
    #[serde(default)]
    pub related_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub billing_tips: Vec<String>,
}

impl Record for CodeEntry {
    const KEY_MATCH: KeyMatch = KeyMatch::Exact;

    fn key(&self) -> &str {
        &self.slug
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.code.as_str(),
            self.title.as_str(),
            self.definition.as_str(),
            self.category.as_str(),
            self.specialty.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<FacetValue<'_>> {
        match facet {
            Facet::Category => Some(FacetValue::Single(&self.category)),
            Facet::Specialty => Some(FacetValue::Joined(&self.specialty)),
            _ => None,
        }
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.code, &other.code)
    }

    fn clipboard_text(&self) -> String {
        let mut text = format!("{} - {}\n\n{}\n\n", self.code, self.title, self.definition);
        let _ = writeln!(text, "Category: {}", self.category);
        let _ = writeln!(text, "Specialty: {}", self.specialty);
        let _ = writeln!(text, "Complexity: {}", self.complexity_level);
        push_list(&mut text, "Documentation requirements", &self.documentation_requirements);
        push_list(&mut text, "Billing tips", &self.billing_tips);
        push_list(&mut text, "Related codes", &self.related_codes);
        text.trim_end().to_string()
    }
}

// ── Terminology (prefixes / suffixes / roots) ────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermExample {
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminologyEntry {
    pub term: String,
    pub meaning: String,
    pub origin: String,
    #[serde(default)]
    pub examples: Vec<TermExample>,
    pub specialty: String,
    #[serde(default)]
    pub related_terms: Vec<String>,
    pub clinical_context: String,
}

impl Record for TerminologyEntry {
    const KEY_MATCH: KeyMatch = KeyMatch::CaseInsensitive;

    fn key(&self) -> &str {
        &self.term
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.term.as_str(),
            self.meaning.as_str(),
            self.specialty.as_str(),
        ];
        fields.extend(self.examples.iter().map(|e| e.word.as_str()));
        fields
    }

    fn facet(&self, facet: Facet) -> Option<FacetValue<'_>> {
        match facet {
            Facet::Specialty => Some(FacetValue::Single(&self.specialty)),
            _ => None,
        }
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.term.to_lowercase().cmp(&other.term.to_lowercase())
    }

    fn clipboard_text(&self) -> String {
        let mut text = format!("{}: {}\n", self.term, self.meaning);
        let _ = writeln!(text, "Origin: {}", self.origin);
        let _ = writeln!(text, "Specialty: {}", self.specialty);
        if !self.examples.is_empty() {
            text.push_str("\nExamples:\n");
            for example in &self.examples {
                let _ = writeln!(text, "- {}: {}", example.word, example.definition);
            }
        }
        let _ = write!(text, "\n{}", self.clinical_context);
        text
    }
}

// ── Clinical phrases ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseEntry {
    pub id: String,
    pub phrase: String,
    pub meaning: String,
    pub section_of_note: String,
    pub specialty: String,
    pub clinical_context: String,
    #[serde(default)]
    pub related_phrases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_link: Option<String>,
}

impl Record for PhraseEntry {
    const KEY_MATCH: KeyMatch = KeyMatch::Exact;

    fn key(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.phrase.as_str(),
            self.meaning.as_str(),
            self.section_of_note.as_str(),
            self.specialty.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<FacetValue<'_>> {
        match facet {
            Facet::SectionOfNote => Some(FacetValue::Single(&self.section_of_note)),
            Facet::Specialty => Some(FacetValue::Single(&self.specialty)),
            _ => None,
        }
    }

    fn clipboard_text(&self) -> String {
        let mut text = format!("\"{}\"\n{}\n\n", self.phrase, self.meaning);
        let _ = writeln!(text, "Section of note: {}", self.section_of_note);
        let _ = writeln!(text, "Specialty: {}", self.specialty);
        if let Some(icd10) = &self.icd10_link {
            let _ = writeln!(text, "ICD-10: {icd10}");
        }
        text.trim_end().to_string()
    }
}

// ── Charts & timelines ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartCategory {
    Scoring,
    Protocols,
    Charts,
}

impl ChartCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scoring => "scoring",
            Self::Protocols => "protocols",
            Self::Charts => "charts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub range: String,
    pub meaning: String,
}

/// Category-specific content, serialized as `{"category": ..., "details": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "details", rename_all = "lowercase")]
pub enum ChartDetails {
    Scoring {
        components: Vec<ScoreComponent>,
        interpretation: Vec<ScoreBand>,
    },
    Protocols {
        steps: Vec<String>,
    },
    Charts {
        usage: Vec<String>,
    },
}

impl ChartDetails {
    pub fn category(&self) -> ChartCategory {
        match self {
            Self::Scoring { .. } => ChartCategory::Scoring,
            Self::Protocols { .. } => ChartCategory::Protocols,
            Self::Charts { .. } => ChartCategory::Charts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTimelineEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub details: ChartDetails,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl ChartTimelineEntry {
    pub fn category(&self) -> ChartCategory {
        self.details.category()
    }
}

impl Record for ChartTimelineEntry {
    const KEY_MATCH: KeyMatch = KeyMatch::Exact;

    fn key(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category().as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<FacetValue<'_>> {
        match facet {
            Facet::Category => Some(FacetValue::Single(self.category().as_str())),
            _ => None,
        }
    }

    fn clipboard_text(&self) -> String {
        let mut text = format!("{}\n{}\n\n", self.name, self.description);
        match &self.details {
            ChartDetails::Scoring {
                components,
                interpretation,
            } => {
                text.push_str("Components:\n");
                for c in components {
                    let _ = writeln!(text, "- {} ({} points)", c.name, c.points);
                }
                text.push_str("\nInterpretation:\n");
                for band in interpretation {
                    let _ = writeln!(text, "- {}: {}", band.range, band.meaning);
                }
            }
            ChartDetails::Protocols { steps } => {
                text.push_str("Steps:\n");
                for (i, step) in steps.iter().enumerate() {
                    let _ = writeln!(text, "{}. {step}", i + 1);
                }
            }
            ChartDetails::Charts { usage } => push_list(&mut text, "Usage", usage),
        }
        text.trim_end().to_string()
    }
}

// ── Lab tests ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRanges {
    pub male: String,
    pub female: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestEntry {
    pub slug: String,
    pub test_name: String,
    pub specialty: String,
    pub system: String,
    pub clinical_relevance: String,
    pub reference_ranges: ReferenceRanges,
}

impl Record for LabTestEntry {
    const KEY_MATCH: KeyMatch = KeyMatch::Exact;

    fn key(&self) -> &str {
        &self.slug
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.test_name.as_str(),
            self.specialty.as_str(),
            self.system.as_str(),
            self.clinical_relevance.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<FacetValue<'_>> {
        match facet {
            Facet::Specialty => Some(FacetValue::Single(&self.specialty)),
            Facet::System => Some(FacetValue::Single(&self.system)),
            _ => None,
        }
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.test_name
            .to_lowercase()
            .cmp(&other.test_name.to_lowercase())
    }

    fn clipboard_text(&self) -> String {
        let ranges = &self.reference_ranges;
        format!(
            "{}\nMale: {} {}\nFemale: {} {}\n\n{}",
            self.test_name,
            ranges.male,
            ranges.unit,
            ranges.female,
            ranges.unit,
            self.clinical_relevance
        )
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Split a comma-joined field into trimmed, non-empty parts.
pub fn split_joined(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn push_list(text: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(text, "\n{heading}:");
    for item in items {
        let _ = writeln!(text, "- {item}");
    }
}

/// Alphanumeric ordering where digit runs compare by numeric value,
/// so `0001U < 93000 < 99213 < 99214`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                let lt = ln.trim_start_matches('0');
                let rt = rn.trim_start_matches('0');
                let ord = lt
                    .len()
                    .cmp(&rt.len())
                    .then_with(|| lt.cmp(rt))
                    .then_with(|| ln.len().cmp(&rn.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_ascii_lowercase().cmp(&r.to_ascii_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("99213", "99214"), Ordering::Less);
        assert_eq!(natural_cmp("0001U", "36415"), Ordering::Less);
        assert_eq!(natural_cmp("A0428", "a0428"), Ordering::Equal);
        assert_eq!(natural_cmp("G9", "G10"), Ordering::Less);
        assert_eq!(natural_cmp("E0601", "G0438"), Ordering::Less);
        assert_eq!(natural_cmp("9921", "99214"), Ordering::Less);
    }

    #[test]
    fn test_split_joined() {
        let parts: Vec<&str> = split_joined(" Cardiology,Family Medicine , ,Pediatrics").collect();
        assert_eq!(parts, vec!["Cardiology", "Family Medicine", "Pediatrics"]);
    }

    #[test]
    fn test_chart_details_tagged_by_category() {
        let json = r#"{
            "id": "sepsis", "name": "Sepsis", "description": "d",
            "category": "protocols",
            "details": {"steps": ["a", "b"]}
        }"#;
        let entry: ChartTimelineEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category(), ChartCategory::Protocols);
        assert!(entry.faqs.is_empty());
        match &entry.details {
            ChartDetails::Protocols { steps } => assert_eq!(steps.len(), 2),
            other => panic!("unexpected details: {other:?}"),
        }

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["category"], "protocols");
        assert_eq!(value["details"]["steps"][1], "b");
    }

    #[test]
    fn test_chart_details_shape_must_match_category() {
        let json = r#"{
            "id": "x", "name": "X", "description": "d",
            "category": "scoring",
            "details": {"steps": ["a"]}
        }"#;
        assert!(serde_json::from_str::<ChartTimelineEntry>(json).is_err());
    }

    #[test]
    fn test_phrase_optional_icd10() {
        let json = r#"{
            "id": "wnl", "phrase": "Within normal limits", "meaning": "m",
            "sectionOfNote": "Results", "specialty": "General Medicine",
            "clinicalContext": "c"
        }"#;
        let phrase: PhraseEntry = serde_json::from_str(json).unwrap();
        assert!(phrase.icd10_link.is_none());
        assert!(phrase.related_phrases.is_empty());
        let value = serde_json::to_value(&phrase).unwrap();
        assert!(value.get("icd10Link").is_none());
    }

    #[test]
    fn test_code_clipboard_text() {
        let entry = CodeEntry {
            slug: "93000-ecg".to_string(),
            code: "93000".to_string(),
            title: "Electrocardiogram".to_string(),
            category: "Cardiovascular Medicine".to_string(),
            specialty: "Cardiology".to_string(),
            complexity_level: "Low".to_string(),
            definition: "Routine ECG.".to_string(),
            documentation_requirements: vec!["Signed report".to_string()],
            related_codes: vec![],
            billing_tips: vec![],
        };
        let text = entry.clipboard_text();
        assert!(text.starts_with("93000 - Electrocardiogram"));
        assert!(text.contains("- Signed report"));
        assert!(!text.contains("Related codes"));
    }
}
