/// Document tree for the chat markdown dialect
use serde::{Deserialize, Serialize};

/// One top-level construct of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Header(Header),
    CodeBlock(CodeBlock),
    List(List),
    Blockquote(Blockquote),
    Image(Image),
    /// A single paragraph line; its container is always of kind `Inline`.
    Paragraph(InlineContainer),
}

impl Block {
    /// Type name used by the dialect for this construct.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Header(_) => "header",
            Block::CodeBlock(_) => "codeblock",
            Block::List(_) => "list",
            Block::Blockquote(_) => "blockquote",
            Block::Image(_) => "image",
            Block::Paragraph(container) => container.kind.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Number of leading `#` characters, 1 to 3.
    pub level: u8,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub lang: Option<String>,
    /// Raw lines between the fences, terminators included.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Leading whitespace of the item line, in source columns.
    pub indent: usize,
    pub marker: ListMarker,
    /// Item text. Continuation lines follow their original terminators.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListMarker {
    /// `*`, `-` or `+`.
    Bullet(char),
    /// The digits of an ordered marker, without the trailing `.`.
    Ordered(String),
}

impl ListMarker {
    /// Marker as written in source, e.g. `-` or `12.`.
    pub fn to_source(&self) -> String {
        match self {
            ListMarker::Bullet(bullet) => bullet.to_string(),
            ListMarker::Ordered(number) => format!("{number}."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockquote {
    pub items: Vec<BlockquoteItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockquoteItem {
    /// Count of leading `>` characters.
    pub depth: usize,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Alt text, if any was written.
    pub content: Option<String>,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display text; `None` for bare URLs.
    pub content: Option<String>,
    pub href: String,
}

/// Formatting applied by an inline container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InlineKind {
    /// Unformatted root of a paragraph line.
    Inline,
    Bold,
    Underline,
    Italic,
    Strikethrough,
    Code,
    CodeBlock,
    Secret,
}

impl InlineKind {
    pub fn name(self) -> &'static str {
        match self {
            InlineKind::Inline => "inline",
            InlineKind::Bold => "bold",
            InlineKind::Underline => "underline",
            InlineKind::Italic => "italic",
            InlineKind::Strikethrough => "strikethrough",
            InlineKind::Code => "code",
            InlineKind::CodeBlock => "codeblock",
            InlineKind::Secret => "secret",
        }
    }

    /// Canonical delimiter written on both sides of a closed span.
    pub fn delimiter(self) -> &'static str {
        match self {
            InlineKind::Inline => "",
            InlineKind::Bold => "**",
            InlineKind::Underline => "__",
            InlineKind::Italic => "_",
            InlineKind::Strikethrough => "~~",
            InlineKind::Code => "`",
            InlineKind::CodeBlock => "```",
            InlineKind::Secret => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineContainer {
    pub kind: InlineKind,
    pub children: Vec<Inline>,
}

impl InlineContainer {
    pub fn new(kind: InlineKind) -> Self {
        InlineContainer {
            kind,
            children: Vec::new(),
        }
    }

    /// Appends literal text, merging it into a trailing text child.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Inline::Text(existing)) => existing.push_str(text),
            _ => self.children.push(Inline::Text(text.to_string())),
        }
    }

    pub fn push_char(&mut self, ch: char) {
        match self.children.last_mut() {
            Some(Inline::Text(existing)) => existing.push(ch),
            _ => self.children.push(Inline::Text(ch.to_string())),
        }
    }
}

/// A child of an inline container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    Text(String),
    Link(Link),
    Container(InlineContainer),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_text_coalesces() {
        let mut container = InlineContainer::new(InlineKind::Inline);
        container.push_text("*");
        container.push_char('a');
        container.push_text("");
        container.children.push(Inline::Container(InlineContainer::new(
            InlineKind::Bold,
        )));
        container.push_char('b');
        assert_eq!(
            container.children,
            vec![
                Inline::Text("*a".to_string()),
                Inline::Container(InlineContainer::new(InlineKind::Bold)),
                Inline::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn kind_names_follow_the_dialect() {
        let paragraph = Block::Paragraph(InlineContainer::new(InlineKind::Inline));
        assert_eq!(paragraph.kind_name(), "inline");
        let header = Block::Header(Header {
            level: 1,
            content: "x".to_string(),
        });
        assert_eq!(header.kind_name(), "header");
        assert_eq!(ListMarker::Ordered("3".to_string()).to_source(), "3.");
    }

    #[test]
    fn tree_serializes_to_json() {
        let block = Block::Image(Image {
            content: None,
            href: "https://x".to_string(),
        });
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"Image":{"content":null,"href":"https://x"}}"#);
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
