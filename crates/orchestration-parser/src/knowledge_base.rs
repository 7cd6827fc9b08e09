use tracing::{debug, info};

use crate::errors::ParseResult;
use crate::models::answer::{AnswerPart, GeneratedResponse};
use crate::parsers::answer::marked_parts;

/// Parse the output of a knowledge base answer generation step.
///
/// Each part's text is its clean `<text>` segment followed by the part's full inner markup.
/// Text without any `<answer_part>` yields an empty response.
pub fn parse_kb_generated_response(raw: &str) -> ParseResult<GeneratedResponse> {
    debug!("Parsing KB generated response. Input: {}", raw);

    let parts = marked_parts(raw)?
        .into_iter()
        .map(|part| AnswerPart {
            text: format!("{} {}", part.text, part.body),
            references: part.references,
        })
        .collect();

    let response = GeneratedResponse::new(parts);
    info!(
        "KB generated response with {} parts",
        response.generated_response_parts.len()
    );
    Ok(response)
}
