/// Parser and canonical formatter for chat-style markdown
pub mod ast;
pub mod error;
pub mod inline;
pub mod options;
pub mod parser;
pub mod patterns;
pub mod renderer;
pub mod spans;

pub use ast::{
    Block, Blockquote, BlockquoteItem, CodeBlock, Header, Image, Inline, InlineContainer,
    InlineKind, Link, List, ListItem, ListMarker,
};
pub use error::{OptionsError, ParseError};
pub use options::{Limits, ParseOptions};
pub use parser::Parser;
pub use renderer::{MarkdownRenderer, ToMarkdown};

/// Parse markdown text with default options
pub fn parse(markdown: &str) -> Result<Vec<Block>, ParseError> {
    Parser::new().parse(markdown)
}

pub fn parse_with_options(
    markdown: &str,
    options: &ParseOptions,
) -> Result<Vec<Block>, ParseError> {
    Parser::with_options(options.clone()).parse(markdown)
}

/// Render blocks back to markdown text
pub fn render(blocks: &[Block]) -> String {
    MarkdownRenderer::new().render(blocks)
}

/// Parse and re-render, yielding the canonical form of `markdown`
pub fn normalize(markdown: &str) -> Result<String, ParseError> {
    Ok(render(&parse(markdown)?))
}
