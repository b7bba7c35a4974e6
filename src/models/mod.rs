pub mod analysis;

pub use analysis::{
    is_failure_text, validate_inputs, Analysis, AnalyzeRequest, ClinicsQuery, ClinicsResponse,
};
