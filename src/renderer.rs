/// Canonical markdown serializer for the document tree
use crate::ast::{
    Block, Blockquote, BlockquoteItem, CodeBlock, Header, Image, Inline, InlineContainer, Link,
    List, ListItem,
};

/// Rendering back to dialect text, implemented by every node type.
pub trait ToMarkdown {
    fn write_markdown(&self, out: &mut String);

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        self.write_markdown(&mut out);
        out
    }
}

/// Renders whole documents.
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer
    }

    pub fn render(&self, blocks: &[Block]) -> String {
        blocks.to_markdown()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ToMarkdown for [Block] {
    fn write_markdown(&self, out: &mut String) {
        for block in self {
            block.write_markdown(out);
        }
    }
}

impl ToMarkdown for Block {
    fn write_markdown(&self, out: &mut String) {
        match self {
            Block::Header(header) => header.write_markdown(out),
            Block::CodeBlock(code_block) => code_block.write_markdown(out),
            Block::List(list) => list.write_markdown(out),
            Block::Blockquote(blockquote) => blockquote.write_markdown(out),
            Block::Image(image) => {
                image.write_markdown(out);
                out.push('\n');
            }
            Block::Paragraph(container) => {
                container.write_markdown(out);
                out.push('\n');
            }
        }
    }
}

impl ToMarkdown for Header {
    fn write_markdown(&self, out: &mut String) {
        for _ in 0..self.level {
            out.push('#');
        }
        out.push(' ');
        out.push_str(&self.content);
        out.push('\n');
    }
}

impl ToMarkdown for CodeBlock {
    fn write_markdown(&self, out: &mut String) {
        out.push_str("```");
        if let Some(lang) = &self.lang {
            out.push_str(lang);
        }
        out.push('\n');
        let content = self.content.trim_matches(['\r', '\n']);
        if !content.is_empty() {
            out.push_str(content);
            out.push('\n');
        }
        out.push_str("```\n");
    }
}

impl ToMarkdown for List {
    fn write_markdown(&self, out: &mut String) {
        for item in &self.items {
            item.write_markdown(out);
        }
        // Blank line ends the list
        out.push('\n');
    }
}

impl ToMarkdown for ListItem {
    fn write_markdown(&self, out: &mut String) {
        let marker = self.marker.to_source();
        // Continuation lines line up with the item text
        let hang = self.indent + marker.chars().count() + 1;
        let mut lines = self.content.split('\n');

        push_spaces(out, self.indent);
        out.push_str(&marker);
        out.push(' ');
        out.push_str(lines.next().unwrap_or_default());
        out.push('\n');

        for line in lines {
            push_spaces(out, hang);
            out.push_str(line.trim_start());
            out.push('\n');
        }
    }
}

impl ToMarkdown for Blockquote {
    fn write_markdown(&self, out: &mut String) {
        for item in &self.items {
            item.write_markdown(out);
        }
        out.push('\n');
    }
}

impl ToMarkdown for BlockquoteItem {
    fn write_markdown(&self, out: &mut String) {
        for _ in 0..self.depth {
            out.push('>');
        }
        out.push_str(&self.content);
        out.push('\n');
    }
}

/// Only the href survives; alt text is dropped.
impl ToMarkdown for Image {
    fn write_markdown(&self, out: &mut String) {
        out.push_str(&self.href);
    }
}

impl ToMarkdown for Link {
    fn write_markdown(&self, out: &mut String) {
        match &self.content {
            Some(content) => {
                out.push('[');
                out.push_str(content);
                out.push_str("](");
                out.push_str(&self.href);
                out.push(')');
            }
            None => out.push_str(&self.href),
        }
    }
}

impl ToMarkdown for InlineContainer {
    fn write_markdown(&self, out: &mut String) {
        let delimiter = self.kind.delimiter();
        out.push_str(delimiter);
        for child in &self.children {
            child.write_markdown(out);
        }
        out.push_str(delimiter);
    }
}

impl ToMarkdown for Inline {
    fn write_markdown(&self, out: &mut String) {
        match self {
            Inline::Text(text) => out.push_str(text),
            Inline::Link(link) => link.write_markdown(out),
            Inline::Container(container) => container.write_markdown(out),
        }
    }
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{InlineKind, ListMarker};
    use pretty_assertions::assert_eq;

    fn container(kind: InlineKind, children: Vec<Inline>) -> InlineContainer {
        InlineContainer { kind, children }
    }

    #[test]
    fn header() {
        let header = Header {
            level: 2,
            content: "Title".to_string(),
        };
        assert_eq!(header.to_markdown(), "## Title\n");
    }

    #[test]
    fn code_block_trims_surrounding_newlines() {
        let code_block = CodeBlock {
            lang: Some("rs".to_string()),
            content: "\nfn main() {}\n\n".to_string(),
        };
        assert_eq!(code_block.to_markdown(), "```rs\nfn main() {}\n```\n");

        let empty = CodeBlock {
            lang: None,
            content: String::new(),
        };
        assert_eq!(empty.to_markdown(), "```\n```\n");
    }

    #[test]
    fn list_reindents_continuations() {
        let list = List {
            items: vec![
                ListItem {
                    indent: 0,
                    marker: ListMarker::Bullet('*'),
                    content: "one\n      more".to_string(),
                },
                ListItem {
                    indent: 2,
                    marker: ListMarker::Ordered("10".to_string()),
                    content: "ten".to_string(),
                },
            ],
        };
        assert_eq!(list.to_markdown(), "* one\n  more\n  10. ten\n\n");
    }

    #[test]
    fn blockquote_repeats_markers_per_depth() {
        let blockquote = Blockquote {
            items: vec![
                BlockquoteItem {
                    depth: 1,
                    content: " a\ncontinued".to_string(),
                },
                BlockquoteItem {
                    depth: 3,
                    content: "deep".to_string(),
                },
            ],
        };
        assert_eq!(blockquote.to_markdown(), "> a\ncontinued\n>>>deep\n\n");
    }

    #[test]
    fn image_drops_alt_text() {
        let image = Block::Image(Image {
            content: Some("alt".to_string()),
            href: "https://x".to_string(),
        });
        assert_eq!(image.to_markdown(), "https://x\n");
    }

    #[test]
    fn links_masked_and_bare() {
        let masked = Link {
            content: Some("a".to_string()),
            href: "https://x".to_string(),
        };
        let bare = Link {
            content: None,
            href: "https://y".to_string(),
        };
        assert_eq!(masked.to_markdown(), "[a](https://x)");
        assert_eq!(bare.to_markdown(), "https://y");
    }

    #[test]
    fn every_inline_kind_uses_its_delimiter() {
        let kinds = [
            (InlineKind::Bold, "**x**"),
            (InlineKind::Underline, "__x__"),
            (InlineKind::Italic, "_x_"),
            (InlineKind::Strikethrough, "~~x~~"),
            (InlineKind::Code, "`x`"),
            (InlineKind::CodeBlock, "```x```"),
            (InlineKind::Secret, "||x||"),
            (InlineKind::Inline, "x"),
        ];
        for (kind, expected) in kinds {
            let node = container(kind, vec![Inline::Text("x".to_string())]);
            assert_eq!(node.to_markdown(), expected);
        }
    }

    #[test]
    fn paragraph_concatenates_children() {
        let paragraph = Block::Paragraph(container(
            InlineKind::Inline,
            vec![
                Inline::Text("a ".to_string()),
                Inline::Container(container(
                    InlineKind::Bold,
                    vec![Inline::Container(container(
                        InlineKind::Italic,
                        vec![Inline::Text("b".to_string())],
                    ))],
                )),
            ],
        ));
        assert_eq!(paragraph.to_markdown(), "a **_b_**\n");
    }

    #[test]
    fn document_is_concatenation() {
        let blocks = vec![
            Block::Header(Header {
                level: 1,
                content: "T".to_string(),
            }),
            Block::Image(Image {
                content: None,
                href: "https://i".to_string(),
            }),
        ];
        assert_eq!(MarkdownRenderer::new().render(&blocks), "# T\nhttps://i\n");
    }
}
