//! Prompt Construction
//!
//! Standardized prompt assembly for every generation task. All prompts open
//! with the same Indian-law assistant role line and close with the exact
//! output contract the response normalizer expects.
//!
//! ## Layout
//!
//! 1. **Role**: assistant framing plus the task sentence
//! 2. **Rules**: language separation and JSON-only output requirements
//! 3. **Payload**: the document text or chat context
//! 4. **Schema**: the JSON shape the model must return

use crate::types::LanguageCode;

const ROLE_PREFIX: &str = "You are a legal AI assistant specializing in Indian law.";

/// Prompt section types
#[derive(Debug, Clone)]
enum PromptSection {
    /// Role line with the task sentence
    Role(String),
    /// Numbered instructions
    Steps(Vec<String>),
    /// IMPORTANT bullet rules
    Rules(Vec<String>),
    /// Labeled payload block (document text, chunk)
    Labeled { label: String, content: String },
    /// Output schema with its lead-in line
    Schema { lead: String, body: String },
    /// Free-form text
    Custom(String),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the role line; `task` completes the assistant framing sentence.
    pub fn role(mut self, task: &str) -> Self {
        self.sections
            .push(PromptSection::Role(format!("{} {}", ROLE_PREFIX, task)));
        self
    }

    /// Add numbered instructions under a "Please:" header
    pub fn steps(mut self, steps: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Steps(
            steps.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add IMPORTANT bullet rules
    pub fn rules(mut self, rules: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Rules(
            rules.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a labeled payload block
    pub fn labeled(mut self, label: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Labeled {
            label: label.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add the output schema with its lead-in line
    pub fn schema(mut self, lead: &str, body: &str) -> Self {
        self.sections.push(PromptSection::Schema {
            lead: lead.to_string(),
            body: body.to_string(),
        });
        self
    }

    /// Add free-form text
    pub fn custom(mut self, content: &str) -> Self {
        self.sections
            .push(PromptSection::Custom(content.to_string()));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role(line) => {
                    prompt.push_str(&line);
                    prompt.push_str("\n\n");
                }
                PromptSection::Steps(steps) => {
                    prompt.push_str("Please:\n");
                    for (i, step) in steps.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, step));
                    }
                    prompt.push('\n');
                }
                PromptSection::Rules(rules) => {
                    prompt.push_str("IMPORTANT:\n");
                    for rule in rules {
                        prompt.push_str(&format!("- {}\n", rule));
                    }
                    prompt.push('\n');
                }
                PromptSection::Labeled { label, content } => {
                    prompt.push_str(&format!("{}:\n{}\n\n", label, content));
                }
                PromptSection::Schema { lead, body } => {
                    prompt.push_str(&format!("{}\n{}\n\n", lead, body));
                }
                PromptSection::Custom(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

/// Preset prompts for each generation task
pub struct PromptTemplates;

impl PromptTemplates {
    /// Full-document analysis prompt (documents under the chunking threshold).
    pub fn document_analysis(text: &str, language: &LanguageCode) -> String {
        let local_rule = local_summary_rule(language);
        PromptBuilder::new()
            .role("Analyze the following legal document and provide a detailed analysis.")
            .labeled("DOCUMENT TEXT", text)
            .rules(vec![
                "Provide summary_en in English ONLY",
                &local_rule,
                "Do NOT mix languages within the same field",
                "Return ONLY valid JSON without markdown code blocks",
                "For Hindi summary, write complete sentences in Hindi using Devanagari script",
                "Pay special attention to Indian legal documents like traffic challans, court notices, legal agreements",
                "Identify specific legal sections, acts, and regulations mentioned",
                "Extract key details like challan numbers, fine amounts, dates, vehicle numbers, etc.",
            ])
            .schema(
                "Return your response as a clean JSON object:",
                &document_schema(language),
            )
            .build()
    }

    /// Per-chunk analysis prompt; `chunk_number` is 1-based.
    pub fn chunk_analysis(
        chunk: &str,
        chunk_number: usize,
        total_chunks: usize,
        language: &LanguageCode,
    ) -> String {
        let local_rule = local_summary_rule(language);
        PromptBuilder::new()
            .role(&format!(
                "Analyze this portion of a legal document (chunk {} of {}) and provide a detailed analysis.",
                chunk_number, total_chunks
            ))
            .labeled("DOCUMENT CHUNK", chunk)
            .rules(vec![
                "Provide summary_en in English ONLY",
                &local_rule,
                "Do NOT mix languages within the same field",
                "Return ONLY valid JSON without markdown code blocks",
                "Focus on the specific content in this chunk",
            ])
            .schema(
                "Return your response as a clean JSON object:",
                &chunk_schema(language),
            )
            .build()
    }

    /// Image analysis prompt; the image itself travels as an inline part
    /// alongside this text.
    pub fn image_analysis(language: &LanguageCode) -> String {
        let local_rule = local_summary_rule(language);
        PromptBuilder::new()
            .role("Analyze this legal document image and provide a detailed analysis.")
            .steps(vec![
                "Extract all text from the image using OCR (including Tamil, Hindi, English text)",
                "Identify key legal information, dates, amounts, parties involved, challan numbers, vehicle details",
                "Analyze the legal implications under Indian law (Motor Vehicles Act, specific sections)",
                "Provide risk assessment and recommendations",
                "Pay special attention to traffic challans, court notices, legal notices",
                "Extract specific details like fine amounts, payment deadlines, legal sections",
            ])
            .rules(vec![
                "Provide summary_en in English ONLY",
                &local_rule,
                "Do NOT mix languages within the same field",
                "Return ONLY valid JSON without markdown code blocks",
                "For Hindi summary, write complete sentences in Hindi using Devanagari script",
                "Extract actual content from the document, not generic responses",
            ])
            .schema(
                "Return your response as a clean JSON object:",
                &image_schema(language),
            )
            .build()
    }

    /// Question-answering prompt over previously analyzed document context.
    pub fn chat(question: &str, context: Option<&str>) -> String {
        PromptBuilder::new()
            .role(&format!(
                "Answer this question about the legal document: \"{}\"",
                question
            ))
            .custom(&format!(
                "Context: {}",
                context.unwrap_or("No additional context provided.")
            ))
            .custom(
                "Provide a detailed answer focusing on Indian legal implications and cite relevant sections of Indian law where applicable.",
            )
            .schema("Format your response as JSON:", CHAT_SCHEMA)
            .build()
    }

    /// Plain-text summary prompt; the only task whose output is not JSON.
    pub fn summary(text: &str, language: &LanguageCode) -> String {
        let language_rule = format!(
            "Provide summary in {}",
            if language.is_hindi() {
                "Hindi using Devanagari script"
            } else {
                "English"
            }
        );
        PromptBuilder::new()
            .role("Generate a concise summary of the following legal document:")
            .custom(text)
            .rules(vec![
                &language_rule,
                "Focus on key legal points, terms, and implications under Indian law",
                "Keep it concise but comprehensive",
                "Do NOT include markdown formatting",
            ])
            .custom("Return only the summary text without any additional formatting.")
            .build()
    }
}

fn local_summary_rule(language: &LanguageCode) -> String {
    format!(
        "Provide summary_local in {} ONLY",
        if language.is_hindi() { "Hindi" } else { "English" }
    )
}

fn document_schema(language: &LanguageCode) -> String {
    let local = if language.is_hindi() {
        "दस्तावेज़ का पूरा हिंदी सारांश - मुख्य बिंदु, शर्तें और कानूनी प्रभाव"
    } else {
        "Complete English summary of the document with specific legal details"
    };
    format!(
        r#"{{
  "summary_en": "Complete English summary of the document with specific legal details",
  "summary_local": "{}",
  "clauses": [
    {{
      "title": "Specific legal clause or section title",
      "source_excerpt": "Relevant text from document with actual content",
      "explanation_en": "Detailed explanation of legal implications under Indian law",
      "risk_level": "HIGH/MEDIUM/LOW",
      "risk_reasons": ["specific reason1", "specific reason2"],
      "india_markers": ["specific_legal_area1", "specific_legal_area2"]
    }}
  ],
  "recommended_questions": ["Specific question1", "Specific question2"],
  "disclaimer": "This analysis is for informational purposes only and does not constitute legal advice. Please consult with a qualified legal professional for specific legal matters."
}}"#,
        local
    )
}

fn image_schema(language: &LanguageCode) -> String {
    let local = if language.is_hindi() {
        "दस्तावेज़ से निकाले गए विशिष्ट कानूनी विवरणों के साथ पूरा हिंदी सारांश"
    } else {
        "Complete English summary with specific legal details extracted from the document"
    };
    format!(
        r#"{{
  "summary_en": "Complete English summary with specific legal details extracted from the document",
  "summary_local": "{}",
  "clauses": [
    {{
      "title": "Specific legal information found in document",
      "source_excerpt": "Actual extracted text from the document",
      "explanation_en": "Detailed explanation of legal implications under Indian law",
      "risk_level": "HIGH/MEDIUM/LOW",
      "risk_reasons": ["specific reason based on document content"],
      "india_markers": ["specific_legal_area", "motor_vehicles_act", "traffic_law"]
    }}
  ],
  "recommended_questions": [
    "What specific violation is mentioned in this document?",
    "What is the fine amount and payment deadline?",
    "What legal sections are referenced?",
    "What are the consequences of non-compliance?"
  ],
  "disclaimer": "This analysis is for informational purposes only and does not constitute legal advice. Please consult with a qualified legal professional for specific legal matters."
}}"#,
        local
    )
}

fn chunk_schema(language: &LanguageCode) -> String {
    let local = if language.is_hindi() {
        "इस खंड का सारांश"
    } else {
        "Summary of this chunk"
    };
    format!(
        r#"{{
  "summary_en": "Summary of this chunk",
  "summary_local": "{}",
  "clauses": [
    {{
      "title": "Clause title",
      "source_excerpt": "Relevant text from this chunk",
      "explanation_en": "Explanation",
      "risk_level": "HIGH/MEDIUM/LOW",
      "risk_reasons": ["reason1", "reason2"],
      "india_markers": ["legal_area1", "legal_area2"]
    }}
  ],
  "recommended_questions": ["question1", "question2"],
  "disclaimer": "This analysis covers only a portion of the document."
}}"#,
        local
    )
}

const CHAT_SCHEMA: &str = r#"{
  "answer": "Your detailed answer here",
  "evidence": [
    {
      "chunk_id": 1,
      "snippet": "Relevant text from document"
    }
  ]
}"#;

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
    fn test_document_analysis_prompt() {
        let prompt = PromptTemplates::document_analysis("The lessee shall pay rent.", &en());

        assert!(prompt.starts_with("You are a legal AI assistant specializing in Indian law."));
        assert!(prompt.contains("DOCUMENT TEXT:\nThe lessee shall pay rent."));
        assert!(prompt.contains("- Provide summary_en in English ONLY"));
        assert!(prompt.contains("- Provide summary_local in English ONLY"));
        assert!(prompt.contains("Return ONLY valid JSON without markdown code blocks"));
        assert!(prompt.contains("\"risk_level\": \"HIGH/MEDIUM/LOW\""));
    }

    #[test]
    fn test_hindi_language_rules() {
        let prompt = PromptTemplates::document_analysis("text", &hi());

        assert!(prompt.contains("- Provide summary_local in Hindi ONLY"));
        assert!(prompt.contains("Devanagari script"));
        assert!(prompt.contains("हिंदी सारांश"));
    }

    #[test]
    fn test_chunk_prompt_numbering() {
        let prompt = PromptTemplates::chunk_analysis("chunk body", 2, 5, &en());

        assert!(prompt.contains("(chunk 2 of 5)"));
        assert!(prompt.contains("DOCUMENT CHUNK:\nchunk body"));
        assert!(prompt.contains("Focus on the specific content in this chunk"));
        assert!(prompt.contains("This analysis covers only a portion of the document."));
    }

    #[test]
    fn test_image_prompt_steps() {
        let prompt = PromptTemplates::image_analysis(&en());

        assert!(prompt.contains("Please:\n1. Extract all text from the image using OCR"));
        assert!(prompt.contains("Motor Vehicles Act"));
        assert!(prompt.contains("6. Extract specific details"));
        assert!(prompt.contains("not generic responses"));
    }

    #[test]
    fn test_chat_prompt() {
        let prompt = PromptTemplates::chat("What is the fine amount?", Some("Clause 3: Rs 500"));

        assert!(prompt.contains("Answer this question about the legal document: \"What is the fine amount?\""));
        assert!(prompt.contains("Context: Clause 3: Rs 500"));
        assert!(prompt.contains("\"chunk_id\": 1"));
    }

    #[test]
    fn test_chat_prompt_without_context() {
        let prompt = PromptTemplates::chat("Is this valid?", None);
        assert!(prompt.contains("Context: No additional context provided."));
    }

    #[test]
    fn test_summary_prompt() {
        let prompt = PromptTemplates::summary("Agreement text.", &hi());

        assert!(prompt.contains("Generate a concise summary"));
        assert!(prompt.contains("- Provide summary in Hindi using Devanagari script"));
        assert!(prompt.contains("Return only the summary text without any additional formatting."));
        assert!(!prompt.contains("risk_level"));
    }

    #[test]
    fn test_builder_section_order() {
        let prompt = PromptBuilder::new()
            .role("Do the task.")
            .rules(vec!["first rule"])
            .schema("Return JSON:", "{}")
            .build();

        let role_pos = prompt.find("Do the task.").unwrap();
        let rules_pos = prompt.find("IMPORTANT:").unwrap();
        let schema_pos = prompt.find("Return JSON:").unwrap();
        assert!(role_pos < rules_pos && rules_pos < schema_pos);
        assert!(prompt.ends_with("{}"));
    }
}
