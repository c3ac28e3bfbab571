/// Block segmenter for the chat markdown dialect
use crate::ast::{
    Block, Blockquote, BlockquoteItem, CodeBlock, Header, Image, InlineContainer, List, ListItem,
    ListMarker,
};
use crate::error::ParseError;
use crate::inline::InlineTokenizer;
use crate::options::ParseOptions;
use crate::patterns::{self, MarkerMatch};
use crate::spans::ReservedSpans;
use tracing::debug;

/// One input line split into its text and its terminator.
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    /// 1-based line number.
    number: usize,
    body: &'a str,
    /// `"\n"`, `"\r\n"` or empty for a final unterminated line.
    terminator: &'a str,
}

impl<'a> SourceLine<'a> {
    fn split(input: &'a str) -> Vec<SourceLine<'a>> {
        input
            .split_inclusive('\n')
            .enumerate()
            .map(|(index, raw)| {
                let body = raw
                    .strip_suffix('\n')
                    .map(|body| body.strip_suffix('\r').unwrap_or(body))
                    .unwrap_or(raw);
                SourceLine {
                    number: index + 1,
                    body,
                    terminator: &raw[body.len()..],
                }
            })
            .collect()
    }

    fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Parses text into an ordered sequence of blocks in a single pass.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Parser { options }
    }

    /// Parses `input`. The only errors are exceeded resource limits.
    pub fn parse(&self, input: &str) -> Result<Vec<Block>, ParseError> {
        let limits = &self.options.limits;
        if input.len() > limits.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                len: input.len(),
                limit: limits.max_input_bytes,
            });
        }

        let lines = SourceLine::split(input);
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];

            if line.is_blank() {
                i += 1;
            }
            // Fences are checked before the pattern table
            else if let Some(lang) = patterns::match_code_fence_start(line.body) {
                let (code_block, lines_consumed) = self.parse_code_block(&lines[i..], lang);
                self.trace(line, &code_block);
                blocks.push(code_block);
                i += lines_consumed;
            } else if let Some(header) = patterns::match_header(line.body) {
                let header = Block::Header(Header {
                    level: header.level,
                    content: header.content.to_string(),
                });
                self.trace(line, &header);
                blocks.push(header);
                i += 1;
            } else if patterns::match_list_item(line.body).is_some() {
                let (list, lines_consumed) = self.parse_list(&lines[i..]);
                self.trace(line, &list);
                blocks.push(list);
                i += lines_consumed;
            } else if patterns::match_blockquote(line.body).is_some() {
                let (blockquote, lines_consumed) = self.parse_blockquote(&lines[i..]);
                self.trace(line, &blockquote);
                blocks.push(blockquote);
                i += lines_consumed;
            } else if let Some(image) = patterns::match_masked_image(line.body) {
                let image = Block::Image(Image {
                    content: image.alt.map(str::to_string),
                    href: image.href.to_string(),
                });
                self.trace(line, &image);
                blocks.push(image);
                i += 1;
            } else {
                let paragraph = Block::Paragraph(self.parse_paragraph_line(line)?);
                self.trace(line, &paragraph);
                blocks.push(paragraph);
                i += 1;
            }
        }

        Ok(blocks)
    }

    fn trace(&self, line: &SourceLine<'_>, block: &Block) {
        if self.options.debug {
            debug!(line = line.number, kind = block.kind_name(), "matched block");
        }
    }

    /// Collects raw lines until a closing fence. An unterminated fence runs to
    /// the end of input.
    fn parse_code_block(&self, lines: &[SourceLine<'_>], lang: Option<&str>) -> (Block, usize) {
        let mut content = String::new();
        let mut i = 1; // Skip the opening fence

        while i < lines.len() {
            let line = &lines[i];
            i += 1;
            if patterns::is_code_fence_end(line.body) {
                break;
            }
            content.push_str(line.body);
            content.push_str(line.terminator);
        }

        let code_block = CodeBlock {
            lang: lang.map(str::to_string),
            content,
        };
        (Block::CodeBlock(code_block), i)
    }

    /// Consumes list items and their continuation lines up to and including
    /// the first blank line.
    fn parse_list(&self, lines: &[SourceLine<'_>]) -> (Block, usize) {
        let mut items: Vec<ListItem> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            i += 1;

            if line.is_blank() {
                break;
            }

            if let Some(item) = patterns::match_list_item(line.body) {
                let marker = match item.marker {
                    MarkerMatch::Bullet(bullet) => ListMarker::Bullet(bullet),
                    MarkerMatch::Ordered(number) => ListMarker::Ordered(number.to_string()),
                };
                items.push(ListItem {
                    indent: item.indent,
                    marker,
                    content: item.content.to_string(),
                });
            } else if let Some(last) = items.last_mut() {
                // Continuation keeps the previous line's terminator
                last.content.push_str(lines[i - 2].terminator);
                last.content.push_str(line.body);
            }
        }

        (Block::List(List { items }), i)
    }

    /// Same shape as [`Parser::parse_list`], keyed on `>` markers.
    fn parse_blockquote(&self, lines: &[SourceLine<'_>]) -> (Block, usize) {
        let mut items: Vec<BlockquoteItem> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            i += 1;

            if line.is_blank() {
                break;
            }

            if let Some(quote) = patterns::match_blockquote(line.body) {
                items.push(BlockquoteItem {
                    depth: quote.depth,
                    content: quote.content.to_string(),
                });
            } else if let Some(last) = items.last_mut() {
                last.content.push_str(lines[i - 2].terminator);
                last.content.push_str(line.body);
            }
        }

        (Block::Blockquote(Blockquote { items }), i)
    }

    fn parse_paragraph_line(&self, line: &SourceLine<'_>) -> Result<InlineContainer, ParseError> {
        let limits = self.options.limits;
        let len = line.body.chars().count();
        if len > limits.max_line_chars {
            return Err(ParseError::LineTooLong {
                line: line.number,
                len,
                limit: limits.max_line_chars,
            });
        }

        let spans = ReservedSpans::scan(line.body);
        if self.options.debug && !spans.is_empty() {
            debug!(line = line.number, reserved = spans.len(), "reserved link spans");
        }
        InlineTokenizer::new(line.body, &spans, limits, line.number)
            .with_debug(self.options.debug)
            .tokenize()
    }
}
