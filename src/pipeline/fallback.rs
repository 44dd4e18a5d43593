//! Fallback Analysis
//!
//! Deterministic, keyword-driven analysis used whenever the model path fails.
//! Classification runs over an ordered rule table so every input resolves to
//! a well-formed result without any network dependency.

use crate::constants::excerpts::SOURCE_CHARS;
use crate::types::utils::excerpt;
use crate::types::{AnalysisResult, Clause, LanguageCode, RiskLevel};

/// The violation-notice clause carries a longer excerpt than other clauses.
const VIOLATION_EXCERPT_CHARS: usize = 300;

// =============================================================================
// Classification Rules
// =============================================================================

/// Document categories the keyword rules can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    TrafficChallan,
    RentalAgreement,
    EmploymentContract,
    ServiceAgreement,
    LegalDocument,
}

impl DocumentKind {
    fn label(&self) -> &'static str {
        match self {
            Self::TrafficChallan => "Traffic Challan",
            Self::RentalAgreement => "Rental Agreement",
            Self::EmploymentContract => "Employment Contract",
            Self::ServiceAgreement => "Service Agreement",
            Self::LegalDocument => "Legal Document",
        }
    }
}

/// Where a rule's keywords may match. Agreement kinds are named by the
/// uploaded filename; body prose like "service of notices" must not
/// reclassify the document.
#[derive(Clone, Copy)]
enum MatchScope {
    NameAndText,
    NameOnly,
}

/// One classification rule: any keyword hit within `scope` selects `kind`.
struct ClassificationRule {
    kind: DocumentKind,
    scope: MatchScope,
    keywords: &'static [&'static str],
}

/// Evaluated in order; the first matching rule wins.
const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        kind: DocumentKind::TrafficChallan,
        scope: MatchScope::NameAndText,
        keywords: &[
            "challan",
            "traffic",
            "violation",
            "vehicle inspection",
            "infringement report",
            "motor vehicles act",
        ],
    },
    ClassificationRule {
        kind: DocumentKind::RentalAgreement,
        scope: MatchScope::NameOnly,
        keywords: &["rental"],
    },
    ClassificationRule {
        kind: DocumentKind::EmploymentContract,
        scope: MatchScope::NameOnly,
        keywords: &["employment"],
    },
    ClassificationRule {
        kind: DocumentKind::ServiceAgreement,
        scope: MatchScope::NameOnly,
        keywords: &["service"],
    },
];

/// Regional-authority markers, matched against document text only.
const TAMIL_NADU_KEYWORDS: &[&str] = &["tamilnadu", "tamil nadu", "chennai traffic police"];

fn classify(file_name: &str, text: &str) -> DocumentKind {
    let name = file_name.to_lowercase();
    let body = text.to_lowercase();

    RULES
        .iter()
        .find(|rule| {
            rule.keywords.iter().any(|k| match rule.scope {
                MatchScope::NameAndText => name.contains(k) || body.contains(k),
                MatchScope::NameOnly => name.contains(k),
            })
        })
        .map(|rule| rule.kind)
        .unwrap_or(DocumentKind::LegalDocument)
}

fn is_tamil_nadu(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TAMIL_NADU_KEYWORDS.iter().any(|k| lowered.contains(k))
}

// =============================================================================
// Analysis Construction
// =============================================================================

/// Build a deterministic analysis from text and filename alone.
///
/// Always succeeds; this is the pipeline's ultimate backstop.
pub fn fallback_analysis(text: &str, file_name: &str, language: &LanguageCode) -> AnalysisResult {
    match classify(file_name, text) {
        DocumentKind::TrafficChallan => challan_analysis(text, is_tamil_nadu(text), language),
        kind => generic_analysis(text, kind, language),
    }
}

fn challan_analysis(text: &str, regional: bool, language: &LanguageCode) -> AnalysisResult {
    let issued_by = if regional {
        " issued by Tamil Nadu Traffic Police"
    } else {
        ""
    };
    let issued_by_hi = if regional {
        " जो तमिलनाडु ट्रैफिक पुलिस द्वारा जारी किया गया है"
    } else {
        ""
    };

    let summary_en = format!(
        "This is a traffic challan (violation notice) document{}. The document appears to be a \
         legal notice issued by traffic authorities for a motor vehicle violation under the \
         Motor Vehicles Act, 1988. Please review the violation details, fine amount, and legal \
         implications carefully.",
        issued_by
    );
    let summary_local = if language.is_hindi() {
        format!(
            "यह एक ट्रैफिक चालान (उल्लंघन नोटिस) दस्तावेज़ है{}। यह दस्तावेज़ मोटर वाहन उल्लंघन के लिए \
             ट्रैफिक अधिकारियों द्वारा जारी किया गया कानूनी नोटिस प्रतीत होता है। कृपया उल्लंघन विवरण, \
             जुर्माना राशि और कानूनी प्रभावों की सावधानीपूर्वक समीक्षा करें।",
            issued_by_hi
        )
    } else {
        format!(
            "This is a traffic challan (violation notice) document{}. Please review the \
             violation details carefully.",
            issued_by
        )
    };

    AnalysisResult {
        summary_en,
        summary_local,
        clauses: vec![
            Clause::new(
                "Traffic Violation Notice",
                excerpt(text, VIOLATION_EXCERPT_CHARS),
                "This is a legal notice for a traffic violation under the Motor Vehicles Act, \
                 1988. It contains details about the offense, fine amount, and legal \
                 consequences. The document appears to be issued by traffic police authorities.",
                RiskLevel::High,
            )
            .with_reasons(&[
                "Legal notice requires immediate attention",
                "Fine payment deadline",
                "Potential court proceedings",
                "Vehicle registration may be affected",
            ])
            .with_markers(&[
                "motor_vehicles_act",
                "traffic_law",
                "penalty_notice",
                "tamil_nadu_traffic",
            ]),
            Clause::new(
                "Payment and Compliance",
                "Payment and compliance requirements",
                "The challan requires payment of the specified fine within the given timeframe \
                 to avoid further legal action. Non-payment may result in additional penalties \
                 or court proceedings.",
                RiskLevel::Medium,
            )
            .with_reasons(&[
                "Time-sensitive payment",
                "Additional penalties for delay",
                "Vehicle impoundment risk",
            ])
            .with_markers(&["fine_payment", "compliance_deadline", "motor_vehicles_act"]),
            Clause::new(
                "Document Completeness",
                excerpt(text, SOURCE_CHARS),
                "Review the document for completeness. Ensure all required fields are filled \
                 including challan number, vehicle details, offense description, and fine \
                 amount.",
                RiskLevel::Medium,
            )
            .with_reasons(&[
                "Incomplete information may affect validity",
                "Missing details could delay processing",
            ])
            .with_markers(&["document_validation", "legal_procedure"]),
        ],
        recommended_questions: vec![
            "What is the violation I'm being charged for?".to_string(),
            "What is the fine amount and payment deadline?".to_string(),
            "What happens if I don't pay the fine on time?".to_string(),
            "Can I contest this challan?".to_string(),
            "What are my legal rights in this case?".to_string(),
            "How does this affect my driving record?".to_string(),
            "Is this challan valid if some fields are blank?".to_string(),
            "What should I do if the challan has incomplete information?".to_string(),
        ],
        disclaimer: "This is a legal notice that requires immediate attention. Please consult \
                     with a traffic lawyer or legal expert for specific advice regarding your \
                     case. Non-payment may result in additional penalties or court proceedings."
            .to_string(),
    }
}

fn generic_analysis(text: &str, kind: DocumentKind, language: &LanguageCode) -> AnalysisResult {
    let label = kind.label().to_lowercase();

    let summary_en = format!(
        "This appears to be a {}. The document has been uploaded successfully and is ready for \
         analysis. Please review the content carefully and consult with a legal professional \
         for specific advice.",
        label
    );
    let summary_local = if language.is_hindi() {
        format!(
            "यह एक {} प्रतीत होता है। दस्तावेज़ सफलतापूर्वक अपलोड हो गया है और विश्लेषण के लिए तैयार है।",
            label
        )
    } else {
        format!(
            "This appears to be a {}. The document has been uploaded successfully.",
            label
        )
    };

    AnalysisResult {
        summary_en,
        summary_local,
        clauses: vec![
            Clause::new(
                "Document Uploaded Successfully",
                excerpt(text, SOURCE_CHARS),
                "Your document has been uploaded and is ready for detailed analysis. Please \
                 ensure all terms are clear before proceeding.",
                RiskLevel::Medium,
            )
            .with_reasons(&["Document requires review", "Terms need verification"])
            .with_markers(&["general_legal", "document_review"]),
        ],
        recommended_questions: vec![
            "What are the main terms and conditions?".to_string(),
            "Are there any clauses I should be concerned about?".to_string(),
            "How does this apply under Indian law?".to_string(),
            "What should I verify before signing?".to_string(),
        ],
        disclaimer: "This analysis is for informational purposes only and does not constitute \
                     legal advice. Please consult with a qualified legal professional for \
                     specific legal matters."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> LanguageCode {
        LanguageCode::new("en")
    }

    fn hi() -> LanguageCode {
        LanguageCode::new("hi")
    }

    #[test]
    fn test_challan_from_filename() {
        let result = fallback_analysis(
            "Some body text",
            "UP_Traffic_Challan_2019.pdf",
            &en(),
        );

        assert!(result.summary_en.contains("traffic challan"));
        assert_eq!(result.clauses[0].risk_level, RiskLevel::High);
        assert_eq!(result.clauses.len(), 3);
        assert_eq!(result.recommended_questions.len(), 8);
    }

    #[test]
    fn test_challan_from_body_text() {
        let result = fallback_analysis(
            "Notice under the Motor Vehicles Act for overspeeding",
            "scan001.pdf",
            &en(),
        );

        assert!(result.summary_en.contains("traffic challan"));
        assert_eq!(result.clauses[0].title, "Traffic Violation Notice");
        assert_eq!(result.clauses[0].risk_level, RiskLevel::High);
    }

    #[test]
    fn test_tamil_nadu_variant() {
        let result = fallback_analysis(
            "Challan issued by Chennai Traffic Police for signal jump",
            "notice.jpg",
            &hi(),
        );

        assert!(result.summary_en.contains("Tamil Nadu Traffic Police"));
        assert!(result.summary_local.contains("तमिलनाडु"));
    }

    #[test]
    fn test_non_regional_challan_summary_is_generic() {
        let result = fallback_analysis("Traffic violation notice", "challan.pdf", &en());
        assert!(!result.summary_en.contains("Tamil Nadu"));
        // The marker taxonomy is fixed per clause, not per region
        assert!(
            result.clauses[0]
                .india_markers
                .contains(&"tamil_nadu_traffic".to_string())
        );
    }

    #[test]
    fn test_filename_document_kinds() {
        let rental = fallback_analysis("body", "rental_agreement.docx", &en());
        assert!(rental.summary_en.contains("rental agreement"));

        let employment = fallback_analysis("body", "Employment_Offer.pdf", &en());
        assert!(employment.summary_en.contains("employment contract"));

        let service = fallback_analysis("body", "service-contract.pdf", &en());
        assert!(service.summary_en.contains("service agreement"));
    }

    #[test]
    fn test_body_text_never_selects_agreement_kinds() {
        // "service of notices" is ordinary legal prose, not a service contract
        let result = fallback_analysis(
            "This deed covers service of notices between the parties",
            "deed.pdf",
            &en(),
        );
        assert!(result.summary_en.contains("legal document"));

        assert_eq!(
            classify("notice.pdf", "monthly rental of Rs 12,000 is payable"),
            DocumentKind::LegalDocument
        );
        assert_eq!(
            classify("letter.pdf", "employment commences on 1 April"),
            DocumentKind::LegalDocument
        );
    }

    #[test]
    fn test_generic_document() {
        let result = fallback_analysis("Some deed of sale", "deed.pdf", &en());

        assert!(result.summary_en.contains("legal document"));
        assert_eq!(result.clauses.len(), 1);
        assert_eq!(result.clauses[0].title, "Document Uploaded Successfully");
        assert_eq!(result.clauses[0].risk_level, RiskLevel::Medium);
        assert_eq!(result.recommended_questions.len(), 4);
    }

    #[test]
    fn test_generic_hindi_summary() {
        let result = fallback_analysis("text", "will.pdf", &hi());
        assert!(result.summary_local.contains("दस्तावेज़ सफलतापूर्वक अपलोड"));
    }

    #[test]
    fn test_classification_case_insensitive() {
        assert_eq!(classify("CHALLAN.PDF", ""), DocumentKind::TrafficChallan);
        assert_eq!(classify("", "VEHICLE INSPECTION report"), DocumentKind::TrafficChallan);
        assert_eq!(classify("My_Rental.docx", ""), DocumentKind::RentalAgreement);
        assert_eq!(classify("notes.txt", "plain text"), DocumentKind::LegalDocument);
    }

    #[test]
    fn test_challan_rule_outranks_filename_kinds() {
        // "service" also matches a later rule; the challan rule wins by order
        let kind = classify("service_agreement.pdf", "pending traffic violation");
        assert_eq!(kind, DocumentKind::TrafficChallan);
    }

    #[test]
    fn test_excerpts_truncate_long_text() {
        let long_text = "x".repeat(1_000);
        let result = fallback_analysis(&long_text, "challan.pdf", &en());

        assert_eq!(
            result.clauses[0].source_excerpt.chars().count(),
            VIOLATION_EXCERPT_CHARS + 3
        );
        assert!(result.clauses[0].source_excerpt.ends_with("..."));
    }
}
