//! Prompt template for consultation report generation.

use crate::report::ConsultationRequest;

/// System role text sent with every generation call.
pub const SYSTEM_PROMPT: &str = "You are an AI business consultant that creates professional, \
     actionable reports to help businesses adopt AI technologies effectively.";

/// Build the user prompt from the consultation form fields.
pub fn build_prompt(request: &ConsultationRequest) -> String {
    let focus_areas = if request.focus_areas.is_empty() {
        "General AI Adoption".to_string()
    } else {
        request
            .focus_areas
            .iter()
            .map(|area| area.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"Generate a comprehensive {report_kind} report for {business_name}, a {business_size} {business_type} in the {industry} industry.

Focus Areas: {focus_areas}

Additional Instructions: {additional_instructions}

**Report Structure Guidelines:**
1. Executive Summary (1 paragraph)
2. Current State Analysis
3. Key Opportunities for AI Adoption
4. Recommended AI Solutions
5. Implementation Roadmap
6. Risk Assessment
7. ROI Projections
8. Next Steps

Format the report professionally with clear headings, bullet points for key recommendations, and data-driven insights. Use business-friendly language while maintaining technical accuracy.
"#,
        report_kind = request.consultancy_type.prompt_label(),
        business_name = request.business_name,
        business_size = request.business_size,
        business_type = request.business_type,
        industry = request.industry,
        additional_instructions = request.additional_instructions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ConsultancyType, FocusArea};

    fn sample_request(focus_areas: Vec<FocusArea>) -> ConsultationRequest {
        ConsultationRequest {
            consultancy_type: ConsultancyType::Strategy,
            business_name: "Acme".to_string(),
            business_type: "LLC".to_string(),
            industry: "retail".to_string(),
            business_size: "small".to_string(),
            focus_areas,
            additional_instructions: "Prioritize quick wins.".to_string(),
        }
    }

    #[test]
    fn test_prompt_includes_business_descriptors() {
        let prompt = build_prompt(&sample_request(vec![FocusArea::Strategy]));
        assert!(prompt.contains("AI Business Strategy Consultation report for Acme"));
        assert!(prompt.contains("a small LLC in the retail industry"));
        assert!(prompt.contains("Focus Areas: Business Strategy"));
        assert!(prompt.contains("Additional Instructions: Prioritize quick wins."));
    }

    #[test]
    fn test_focus_areas_joined_by_comma() {
        let prompt = build_prompt(&sample_request(vec![
            FocusArea::Operations,
            FocusArea::Marketing,
        ]));
        assert!(prompt.contains("Focus Areas: Operations Optimization, Marketing & Sales"));
    }

    #[test]
    fn test_empty_focus_areas_fall_back() {
        let prompt = build_prompt(&sample_request(vec![]));
        assert!(prompt.contains("Focus Areas: General AI Adoption"));
    }
}
