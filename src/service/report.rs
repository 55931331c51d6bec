//! Response payloads

use super::request::Mode;
use crate::page::PageRecord;
use crate::probe::FileProbeResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Either report, serialized without a wrapper
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExtractReport {
    Basic(BasicReport),
    Advanced(Box<AdvancedReport>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BasicReport {
    Success(BasicSuccess),
    Failure(BasicFailure),
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicSuccess {
    pub mode: Mode,
    pub target_url: String,
    pub status_code: u16,

    /// Every response header of the target
    pub security_headers: BTreeMap<String, String>,

    pub tech_stack: Vec<String>,

    /// Raw anchor hrefs, unique, first-seen order
    pub endpoints: Vec<String>,

    /// Seconds, two decimals
    pub extraction_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicFailure {
    pub mode: Mode,
    pub target_url: String,
    pub error: String,
    pub message: String,
    pub extraction_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvancedReport {
    pub mode: Mode,
    pub extraction_summary: ExtractionSummary,
    pub website_structure: WebsiteStructure,
    pub technical_data: TechnicalData,
    pub content_analysis: ContentAnalysis,
    pub llm_ready_data: LlmReadyData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub target_url: String,
    pub total_pages_extracted: usize,
    pub total_urls_found: usize,
    pub total_files_found: usize,
    pub extraction_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebsiteStructure {
    pub pages: Vec<PageRecord>,
    pub all_urls: Vec<String>,
    pub sitemap_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalData {
    /// Headers of the independent root fetch
    pub headers: BTreeMap<String, String>,
    pub detected_files: BTreeMap<String, FileProbeResult>,
    pub file_types_found: Vec<String>,

    /// Hints of the first crawled page
    pub technology_hints: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentAnalysis {
    pub total_forms: usize,
    pub total_images: usize,
    pub total_scripts: usize,
    pub total_links: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LlmReadyData {
    pub pages_count: usize,
    pub forms_count: usize,
    pub endpoints_found: usize,
    pub technologies: Vec<String>,
}
