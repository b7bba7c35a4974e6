use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::models::{is_failure_text, validate_inputs, Analysis, AnalyzeRequest};
use crate::services::{format_results, ClinicFinder, InsightGenerator};

/// Runs the search, format and generate steps for one clinic.
#[derive(Clone)]
pub struct Analyzer {
    finder: ClinicFinder,
    generator: InsightGenerator,
}

impl Analyzer {
    pub fn new(finder: ClinicFinder, generator: InsightGenerator) -> Self {
        Self { finder, generator }
    }

    /// Fails when the settings carry no API key.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            ClinicFinder::new(settings)?,
            InsightGenerator::new(settings)?,
        ))
    }

    pub fn finder(&self) -> &ClinicFinder {
        &self.finder
    }

    pub fn generator(&self) -> &InsightGenerator {
        &self.generator
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<Analysis> {
        if !validate_inputs(&request.clinic_name, &request.location) {
            return Err(AppError::Validation(
                "Please fill in both the clinic name and location.".into(),
            ));
        }

        let clinic_name = request.clinic_name.trim();
        let location = request.location.trim();

        let clinics = self
            .finder
            .search_clinics_near(location, request.max_results)
            .await;

        if clinics.is_empty() {
            warn!(location = %location, "No clinics found, skipping generation");
            return Ok(Analysis::no_clinics(clinic_name, location));
        }

        let clinic_data = format_results(&clinics);
        let insights = self
            .generator
            .generate(
                &clinic_data,
                clinic_name,
                request.temperature,
                request.max_tokens,
            )
            .await;
        let failed = is_failure_text(&insights);

        info!(
            clinic = %clinic_name,
            clinics = clinics.len(),
            failed = failed,
            "Analysis completed"
        );

        Ok(Analysis {
            clinic_name: clinic_name.to_string(),
            location: location.to_string(),
            clinics,
            insights: Some(insights),
            failed,
        })
    }
}
