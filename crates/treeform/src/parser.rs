//! Tree builders folding a token stream into a [`crate::Node`]

pub mod json;
pub mod markup;

pub use json::JsonParser;
pub use markup::MarkupParser;
