use cordmark::{Limits, ParseOptions, Parser, normalize, render};

fn parser() -> Parser {
    Parser::with_options(ParseOptions::default().with_limits(Limits {
        max_inline_steps: 200_000,
        ..Limits::default()
    }))
}

/// Any input either parses or hits a resource limit, and its canonical form
/// survives a second pass unchanged. An italic rendered as `_` next to another
/// underscore may re-tokenize once; the output of that pass is then final.
#[test_fuzz::test_fuzz]
fn parse_is_total(markdown: String) {
    let parser = parser();
    let Ok(blocks) = parser.parse(&markdown) else {
        return;
    };
    let canonical = render(&blocks);
    let Ok(again) = parser.parse(&canonical) else {
        return;
    };
    let second = render(&again);
    if second == canonical {
        return;
    }
    assert!(
        canonical.contains("__"),
        "second pass changed {canonical:?} into {second:?}"
    );
    if let Ok(third) = parser.parse(&second) {
        assert_eq!(render(&third), second);
    }
}

#[test]
fn sample_documents() {
    parse_is_total("# HEADER\n* LIST\n*WRONGLIST\n\n>BLOCKQUOTE\nCONTINUED\n".to_string());
    parse_is_total("```py\nunterminated".to_string());
    parse_is_total("[a](https://x) [b](!https://y) https://z".to_string());
    parse_is_total("\r\n\r\n* \r\n>\n".to_string());
    parse_is_total("*1.\t***|[y](!https://w)**".to_string());
    parse_is_total("*__*`*__".to_string());
}

#[test]
fn adversarial_lines() {
    parse_is_total("*".repeat(10_000));
    parse_is_total("*_".repeat(5_000));
    parse_is_total("~~||`__".repeat(1_000));
    parse_is_total("a *b _c ~~d ||e `f ".repeat(200));
}

#[test]
fn deep_nesting_is_a_limit_error() {
    let line = format!("{}x{}", "**~~".repeat(40), "~~**".repeat(40));
    let result = parser().parse(&line);
    assert!(matches!(
        result,
        Err(cordmark::ParseError::NestingTooDeep { limit: 64, .. })
    ));
}

#[test]
fn alternating_italic_markers_are_not_nesting() {
    assert!(parser().parse(&"*_".repeat(40)).is_ok());
}

/// Deterministic 64-bit LCG, so every run checks the same documents.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as usize
    }
}

const MARKERS: [&str; 16] = [
    "*",
    "_",
    "**",
    "__",
    "~~",
    "||",
    "`",
    "```",
    "\n",
    "* ",
    "> ",
    "# ",
    "1. ",
    "[a](https://x)",
    "[b](!https://y)",
    "https://z/",
];

const FILLERS: [&str; 6] = ["a", " ", "b c", "\t", ".", ")"];

/// Markers alternate with filler text, so every document is syntax-heavy.
fn generated_documents(count: usize) -> Vec<String> {
    let mut rng = Lcg(0x5eed);
    (0..count)
        .map(|_| {
            let pieces = 1 + rng.next() % 16;
            (0..pieces)
                .map(|k| {
                    let pool: &[&str] = if k % 2 == 0 { &MARKERS } else { &FILLERS };
                    pool[rng.next() % pool.len()]
                })
                .collect::<String>()
        })
        .collect()
}

#[test]
fn generated_documents_are_stable_after_one_pass() {
    for document in generated_documents(5_000) {
        let once = normalize(&document).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(twice, once, "input {document:?}");
    }
}
