//! Data model for consultation requests and generated reports.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fixed catalogue of report categories offered to the requester.
///
/// Unknown form values fall back to [`ConsultancyType::Custom`] instead of
/// rejecting the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConsultancyType {
    Strategy,
    Implementation,
    Audit,
    Roadmap,
    Ethics,
    Training,
    Custom,
}

impl ConsultancyType {
    pub const KNOWN: [ConsultancyType; 6] = [
        ConsultancyType::Strategy,
        ConsultancyType::Implementation,
        ConsultancyType::Audit,
        ConsultancyType::Roadmap,
        ConsultancyType::Ethics,
        ConsultancyType::Training,
    ];

    pub fn from_form_value(value: &str) -> Self {
        match value {
            "strategy" => ConsultancyType::Strategy,
            "implementation" => ConsultancyType::Implementation,
            "audit" => ConsultancyType::Audit,
            "roadmap" => ConsultancyType::Roadmap,
            "ethics" => ConsultancyType::Ethics,
            "training" => ConsultancyType::Training,
            _ => ConsultancyType::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultancyType::Strategy => "strategy",
            ConsultancyType::Implementation => "implementation",
            ConsultancyType::Audit => "audit",
            ConsultancyType::Roadmap => "roadmap",
            ConsultancyType::Ethics => "ethics",
            ConsultancyType::Training => "training",
            ConsultancyType::Custom => "custom",
        }
    }

    /// Catalogue label, `None` for the custom fallback.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ConsultancyType::Strategy => Some("AI Business Strategy Consultation"),
            ConsultancyType::Implementation => Some("AI Implementation Plan"),
            ConsultancyType::Audit => Some("AI Readiness Audit"),
            ConsultancyType::Roadmap => Some("AI Adoption Roadmap"),
            ConsultancyType::Ethics => Some("AI Ethics Framework"),
            ConsultancyType::Training => Some("AI Training Program"),
            ConsultancyType::Custom => None,
        }
    }

    /// Product name shown at checkout.
    pub fn checkout_label(&self) -> &'static str {
        self.label().unwrap_or("Custom Consultation")
    }

    /// Report kind echoed into the generation prompt.
    pub fn prompt_label(&self) -> &'static str {
        self.label().unwrap_or("AI Consultancy")
    }

    /// Title printed on the rendered document.
    pub fn document_title(&self) -> &'static str {
        self.label().unwrap_or("AI Consultancy Report")
    }
}

/// A focus area the requester ticked on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Strategy,
    Operations,
    Marketing,
    Customer,
}

impl FocusArea {
    pub const ALL: [FocusArea; 4] = [
        FocusArea::Strategy,
        FocusArea::Operations,
        FocusArea::Marketing,
        FocusArea::Customer,
    ];

    /// Form field name carrying this checkbox.
    pub fn form_field(&self) -> &'static str {
        match self {
            FocusArea::Strategy => "focus_strategy",
            FocusArea::Operations => "focus_operations",
            FocusArea::Marketing => "focus_marketing",
            FocusArea::Customer => "focus_customer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Strategy => "Business Strategy",
            FocusArea::Operations => "Operations Optimization",
            FocusArea::Marketing => "Marketing & Sales",
            FocusArea::Customer => "Customer Experience",
        }
    }
}

/// A validated business-profile form submission.
///
/// Built once from raw form fields and never mutated afterwards. Missing or
/// unknown fields degrade to empty/default values; construction cannot fail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsultationRequest {
    pub consultancy_type: ConsultancyType,
    pub business_name: String,
    pub business_type: String,
    pub industry: String,
    pub business_size: String,
    pub focus_areas: Vec<FocusArea>,
    pub additional_instructions: String,
}

impl ConsultationRequest {
    /// Build a request from raw urlencoded form fields.
    ///
    /// Checkbox fields count as selected when present with a non-empty value.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let field = |name: &str| form.get(name).cloned().unwrap_or_default();

        let focus_areas = FocusArea::ALL
            .into_iter()
            .filter(|area| {
                form.get(area.form_field())
                    .map(|value| !value.is_empty())
                    .unwrap_or(false)
            })
            .collect();

        ConsultationRequest {
            consultancy_type: ConsultancyType::from_form_value(&field("consultancy_type")),
            business_name: field("business_name"),
            business_type: field("business_type"),
            industry: field("industry"),
            business_size: field("business_size"),
            focus_areas,
            additional_instructions: field("additional_instructions"),
        }
    }
}

/// The raw model output for one consultation, created once per successful
/// generation call and consumed exactly once by the renderer.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub raw_text: String,
    pub report_title: String,
    pub owning_business_name: String,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedReport {
    pub fn new(
        report_title: impl Into<String>,
        owning_business_name: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        GeneratedReport {
            raw_text: raw_text.into(),
            report_title: report_title.into(),
            owning_business_name: owning_business_name.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Reference to a rendered artifact on durable storage.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub path: PathBuf,
}

impl RenderedDocument {
    pub fn download_url(&self) -> String {
        format!("/download/{}", self.filename)
    }
}
