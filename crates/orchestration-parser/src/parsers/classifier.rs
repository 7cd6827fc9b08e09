use std::collections::HashMap;

use crate::models::content::{ContentItem, ToolUseContent};

/// Content blocks grouped by kind, each group in its original order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentByKind {
    groups: HashMap<String, Vec<ContentItem>>,
}

impl ContentByKind {
    pub fn get(&self, kind: &str) -> &[ContentItem] {
        self.groups.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.groups.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.get(ContentItem::TEXT)
            .iter()
            .filter_map(ContentItem::as_text)
    }

    pub fn tool_uses(&self) -> impl Iterator<Item = &ToolUseContent> {
        self.get(ContentItem::TOOL_USE)
            .iter()
            .filter_map(ContentItem::as_tool_use)
    }

    pub fn first_text(&self) -> Option<&str> {
        self.texts().next()
    }

    /// Only the first tool_use block of a step is acted on
    pub fn first_tool_use(&self) -> Option<&ToolUseContent> {
        self.tool_uses().next()
    }
}

pub fn classify<I>(items: I) -> ContentByKind
where
    I: IntoIterator<Item = ContentItem>,
{
    let mut groups: HashMap<String, Vec<ContentItem>> = HashMap::new();
    for item in items {
        groups.entry(item.kind().to_string()).or_default().push(item);
    }
    ContentByKind { groups }
}
