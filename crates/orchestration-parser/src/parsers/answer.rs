use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, info};

use crate::errors::{ParseError, ParseResult};
use crate::models::answer::{AnswerPart, FinalAnswer, Reference};

pub const ANSWER_TAG: &str = "<answer>";

lazy_static! {
    static ref ANSWER_PART_PATTERN: Regex =
        Regex::new(r"(?s)<answer_part>(.+?)</answer_part>").expect("valid answer part pattern");
    static ref ANSWER_TEXT_PART_PATTERN: Regex =
        Regex::new(r"(?s)<text>(.+?)</text>").expect("valid answer text pattern");
    static ref ANSWER_REFERENCE_PART_PATTERN: Regex =
        Regex::new(r"(?s)<source>(.+?)</source>").expect("valid answer source pattern");
    static ref ANSWER_PATTERN: Regex =
        Regex::new(r"(?s)<answer>(.*)").expect("valid answer pattern");
    static ref ANSWER_CLOSING_PATTERN: Regex =
        Regex::new(r"(?:</answer>|<answer>)\s*\z").expect("valid answer closing pattern");
}

/// One `<answer_part>` span
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MarkedPart<'a> {
    /// The whitespace-stripped inner markup of the span
    pub body: &'a str,
    pub text: String,
    pub references: Vec<Reference>,
}

impl MarkedPart<'_> {
    pub fn into_answer_part(self) -> AnswerPart {
        AnswerPart {
            text: self.text,
            references: self.references,
        }
    }
}

pub fn has_generated_response(raw: &str) -> bool {
    let has_parts = ANSWER_PART_PATTERN.is_match(raw);
    debug!("Generated response format detected: {}", has_parts);
    has_parts
}

/// Split text into its answer parts, left to right.
///
/// A part without a `<text>` segment fails the whole parse.
pub(crate) fn marked_parts(raw: &str) -> ParseResult<Vec<MarkedPart<'_>>> {
    let parts = ANSWER_PART_PATTERN
        .captures_iter(raw)
        .filter_map(|captures| captures.get(1))
        .map(|part| {
            let body = part.as_str().trim();
            let text = ANSWER_TEXT_PART_PATTERN
                .captures(body)
                .and_then(|captures| captures.get(1))
                .map(|text| text.as_str().trim().to_string())
                .ok_or_else(|| {
                    error!("Failed to find text match in answer part");
                    ParseError::MalformedAnswerMarkup
                })?;

            Ok(MarkedPart {
                body,
                text,
                references: parse_references(body),
            })
        })
        .collect::<ParseResult<Vec<_>>>()?;

    info!("Found {} answer parts", parts.len());
    Ok(parts)
}

pub fn parse_references(answer_part: &str) -> Vec<Reference> {
    ANSWER_REFERENCE_PART_PATTERN
        .captures_iter(answer_part)
        .filter_map(|captures| captures.get(1))
        .map(|source| Reference::new(source.as_str().trim()))
        .collect()
}

/// Parse the multi-part format into one answer string plus its citations
pub fn parse_generated_response(text: &str) -> ParseResult<FinalAnswer> {
    let parts: Vec<AnswerPart> = marked_parts(text)?
        .into_iter()
        .map(MarkedPart::into_answer_part)
        .collect();

    let final_response = parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Generated final response length: {}", final_response.len());

    Ok(FinalAnswer::text(final_response).with_citations(parts))
}

/// Parse the final answer from a text block.
///
/// Uses the multi-part format when any `<answer_part>` is present, otherwise everything
/// after the first `<answer>` tag. Returns `None` when neither is present.
pub fn parse_answer(response: &str) -> ParseResult<Option<FinalAnswer>> {
    let text = response.trim();
    debug!("Parsing answer. Input: {}", text);

    if has_generated_response(text) {
        return parse_generated_response(text).map(Some);
    }

    match ANSWER_PATTERN.captures(text).and_then(|captures| captures.get(1)) {
        Some(answer) => {
            let answer = ANSWER_CLOSING_PATTERN.replace(answer.as_str(), "");
            let answer = answer.trim();
            info!("Found direct answer match: {}", answer);
            Ok(Some(FinalAnswer::text(answer)))
        }
        None => {
            info!("No answer pattern found");
            Ok(None)
        }
    }
}
