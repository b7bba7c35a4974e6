use serde::{Deserialize, Serialize};

use crate::services::SearchResult;

/// Substrings that mark generated text as a failure description rather than
/// marketing content.
const FAILURE_MARKERS: [&str; 2] = ["Failed to generate", "Error"];

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub clinic_name: String,
    pub location: String,
    pub max_results: Option<usize>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ClinicsQuery {
    pub location: Option<String>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ClinicsResponse {
    pub clinics: Vec<SearchResult>,
    pub formatted: String,
}

/// Outcome of one search-then-generate run.
///
/// `insights` is `None` when the search found nothing and no generation was
/// attempted. When present, `failed` tells whether the text is an error
/// description instead of generated content.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub clinic_name: String,
    pub location: String,
    pub clinics: Vec<SearchResult>,
    pub insights: Option<String>,
    pub failed: bool,
}

impl Analysis {
    pub fn no_clinics(clinic_name: &str, location: &str) -> Self {
        Self {
            clinic_name: clinic_name.to_string(),
            location: location.to_string(),
            clinics: vec![],
            insights: None,
            failed: false,
        }
    }
}

/// Both the clinic name and the location must contain something other than
/// whitespace.
pub fn validate_inputs(clinic_name: &str, location: &str) -> bool {
    !clinic_name.trim().is_empty() && !location.trim().is_empty()
}

pub fn is_failure_text(text: &str) -> bool {
    FAILURE_MARKERS.iter().any(|marker| text.contains(marker))
}
