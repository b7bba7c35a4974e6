pub mod analyzer;
pub mod clinic_finder;
pub mod insight_generator;

pub use analyzer::Analyzer;
pub use clinic_finder::{format_results, ClinicFinder, SearchResult};
pub use insight_generator::InsightGenerator;
