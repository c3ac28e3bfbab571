/// Line-level and inline-level recognizers for the chat markdown dialect
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?P<level>#{1,3}) (?P<content>\S.*)$").unwrap());

static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?:(?P<bullet>[*+\-])|(?P<number>\d+)\.) (?P<content>\S.*)$")
        .unwrap()
});

static BLOCKQUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?P<depth>>+)(?P<content>\s*\S.*)$").unwrap());

static CODE_FENCE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?P<lang>[^`]*)$").unwrap());

static CODE_FENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*```$").unwrap());

static MASKED_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?P<content>[^\]]*)\]\(!(?P<href>https?://[^\s()]+)\)$").unwrap()
});

// Alternatives are tried leftmost-first, in this order.
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\[(?P<content>[^\]]*)\]\((?P<href>https?://[^\s()]+)\)",
        r"|(?P<bare>https?://[^\s()]+)",
    ))
    .unwrap()
});

/// A matched header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    pub level: u8,
    pub content: &'a str,
}

/// A matched list item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemMatch<'a> {
    /// Leading whitespace, in code points.
    pub indent: usize,
    pub marker: MarkerMatch<'a>,
    pub content: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerMatch<'a> {
    Bullet(char),
    Ordered(&'a str),
}

/// A matched blockquote marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockquoteMatch<'a> {
    pub depth: usize,
    pub content: &'a str,
}

/// A matched line-level masked image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch<'a> {
    pub alt: Option<&'a str>,
    pub href: &'a str,
}

/// One link-like occurrence inside a line. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub kind: LinkMatchKind<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMatchKind<'a> {
    Masked { content: &'a str, href: &'a str },
    Bare { href: &'a str },
}

/// All recognizers take a line body: the line without its terminator.
pub fn match_header(body: &str) -> Option<HeaderMatch<'_>> {
    let caps = HEADER_RE.captures(body)?;
    Some(HeaderMatch {
        // 1..=3 by construction
        level: caps.name("level")?.as_str().len() as u8,
        content: caps.name("content")?.as_str(),
    })
}

pub fn match_list_item(body: &str) -> Option<ListItemMatch<'_>> {
    let caps = LIST_ITEM_RE.captures(body)?;
    let marker = match (caps.name("bullet"), caps.name("number")) {
        (Some(bullet), _) => MarkerMatch::Bullet(bullet.as_str().chars().next()?),
        (None, Some(number)) => MarkerMatch::Ordered(number.as_str()),
        (None, None) => return None,
    };
    Some(ListItemMatch {
        indent: caps.name("indent")?.as_str().chars().count(),
        marker,
        content: caps.name("content")?.as_str(),
    })
}

pub fn match_blockquote(body: &str) -> Option<BlockquoteMatch<'_>> {
    let caps = BLOCKQUOTE_RE.captures(body)?;
    Some(BlockquoteMatch {
        depth: caps.name("depth")?.as_str().len(),
        content: caps.name("content")?.as_str(),
    })
}

/// Returns the language tag of a fence opener. An empty tag is `Some(None)`.
pub fn match_code_fence_start(body: &str) -> Option<Option<&str>> {
    let caps = CODE_FENCE_START_RE.captures(body)?;
    let lang = caps.name("lang").map(|m| m.as_str().trim());
    Some(lang.filter(|lang| !lang.is_empty()))
}

pub fn is_code_fence_end(body: &str) -> bool {
    CODE_FENCE_END_RE.is_match(body)
}

pub fn match_masked_image(body: &str) -> Option<ImageMatch<'_>> {
    let caps = MASKED_IMAGE_RE.captures(body)?;
    Some(ImageMatch {
        alt: caps
            .name("content")
            .map(|m| m.as_str())
            .filter(|alt| !alt.is_empty()),
        href: caps.name("href")?.as_str(),
    })
}

/// Leftmost-first, non-overlapping link occurrences in `text`.
pub fn find_links(text: &str) -> impl Iterator<Item = LinkMatch<'_>> {
    LINK_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let kind = if let (Some(content), Some(href)) = (caps.name("content"), caps.name("href")) {
            LinkMatchKind::Masked {
                content: content.as_str(),
                href: href.as_str(),
            }
        } else {
            LinkMatchKind::Bare {
                href: caps.name("bare")?.as_str(),
            }
        };
        Some(LinkMatch {
            start: whole.start(),
            end: whole.end(),
            kind,
        })
    })
}
