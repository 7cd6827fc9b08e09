use serde::{Deserialize, Serialize};

/// A cited source inside an answer part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub source_id: String,
}

impl Reference {
    pub fn new<S: Into<String>>(source_id: S) -> Self {
        Reference {
            source_id: source_id.into(),
        }
    }
}

/// One citation-bearing segment of an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPart {
    pub text: String,
    pub references: Vec<Reference>,
}

/// The ordered answer parts, in the shape used for both final-answer citations and
/// knowledge-base generations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResponse {
    pub generated_response_parts: Vec<AnswerPart>,
}

impl GeneratedResponse {
    pub fn new(parts: Vec<AnswerPart>) -> Self {
        GeneratedResponse {
            generated_response_parts: parts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.generated_response_parts.is_empty()
    }
}

/// The final answer of an orchestration step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalAnswer {
    #[serde(rename = "responseText")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<GeneratedResponse>,
}

impl FinalAnswer {
    pub fn text<S: Into<String>>(text: S) -> Self {
        FinalAnswer {
            text: text.into(),
            citations: None,
        }
    }

    /// Attach citations, leaving them absent when there are no parts
    pub fn with_citations(mut self, parts: Vec<AnswerPart>) -> Self {
        self.citations = if parts.is_empty() {
            None
        } else {
            Some(GeneratedResponse::new(parts))
        };
        self
    }

    pub fn parts(&self) -> &[AnswerPart] {
        self.citations
            .as_ref()
            .map(|citations| citations.generated_response_parts.as_slice())
            .unwrap_or_default()
    }
}
