use orchestration_parser::ParserOptions;

/// Shared application state
#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    pub options: ParserOptions,
}
