pub mod errors;
pub mod handler;
pub mod knowledge_base;
pub mod models;
pub mod orchestration;
pub mod parsers;

pub use handler::{handle, InvocationEvent};
pub use models::response::ParsedResponse;
pub use parsers::tool::{ListFlattening, ParserOptions};
