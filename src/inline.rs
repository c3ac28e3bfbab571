/// Inline tokenizer for one paragraph line
///
/// Emphasis-like spans open on a trigger token and close on the next token of
/// the same kind, so `*` and `_` both close an italic span.
/// A span that reaches the end of the line without closing is rolled back:
/// everything scanned inside it is discarded, its opening token becomes
/// literal text in the parent, and scanning resumes right after that token.
///
/// Frames live on an explicit stack rather than the call stack. The outcome of
/// a frame depends only on its opening token and start position, so frames
/// that already failed are remembered and rolled back without rescanning.
use crate::ast::{Inline, InlineContainer, InlineKind};
use crate::error::ParseError;
use crate::options::Limits;
use crate::spans::ReservedSpans;
use std::collections::HashSet;
use tracing::debug;

/// An opening/closing token and the span kind it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub token: &'static str,
    pub kind: InlineKind,
}

/// Tested in order at every position; the first match fires. Longer tokens
/// precede shorter ones sharing their first character.
pub const TRIGGERS: [Trigger; 8] = [
    Trigger {
        token: "**",
        kind: InlineKind::Bold,
    },
    Trigger {
        token: "__",
        kind: InlineKind::Underline,
    },
    Trigger {
        token: "*",
        kind: InlineKind::Italic,
    },
    Trigger {
        token: "_",
        kind: InlineKind::Italic,
    },
    Trigger {
        token: "~~",
        kind: InlineKind::Strikethrough,
    },
    Trigger {
        token: "```",
        kind: InlineKind::CodeBlock,
    },
    Trigger {
        token: "`",
        kind: InlineKind::Code,
    },
    Trigger {
        token: "||",
        kind: InlineKind::Secret,
    },
];

/// Index into [`TRIGGERS`] of the first token matching at `pos`.
fn trigger_at(chars: &[char], pos: usize) -> Option<usize> {
    TRIGGERS.iter().position(|trigger| {
        trigger
            .token
            .chars()
            .enumerate()
            .all(|(offset, ch)| chars.get(pos + offset) == Some(&ch))
    })
}

/// How a nested frame ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Closing token found; scanning continues at the given position.
    Closed(InlineContainer, usize),
    /// End of line reached first.
    Unclosed,
}

#[derive(Debug)]
struct Frame {
    trigger: usize,
    /// First position after the opening token.
    start: usize,
    node: InlineContainer,
}

fn current<'s>(stack: &'s mut [Frame], root: &'s mut InlineContainer) -> &'s mut InlineContainer {
    match stack.last_mut() {
        Some(frame) => &mut frame.node,
        None => root,
    }
}

pub struct InlineTokenizer<'a> {
    chars: Vec<char>,
    spans: &'a ReservedSpans,
    limits: Limits,
    /// 1-based, for errors and traces.
    line: usize,
    debug: bool,
}

impl<'a> InlineTokenizer<'a> {
    pub fn new(text: &str, spans: &'a ReservedSpans, limits: Limits, line: usize) -> Self {
        InlineTokenizer {
            chars: text.chars().collect(),
            spans,
            limits,
            line,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the `Inline` root container for the whole line.
    pub fn tokenize(&self) -> Result<InlineContainer, ParseError> {
        let mut root = InlineContainer::new(InlineKind::Inline);
        let mut stack: Vec<Frame> = Vec::new();
        let mut failed: HashSet<(usize, usize)> = HashSet::new();
        let mut pos = 0;
        let mut steps = 0usize;

        loop {
            steps += 1;
            if steps > self.limits.max_inline_steps {
                return Err(ParseError::StepBudgetExceeded {
                    line: self.line,
                    limit: self.limits.max_inline_steps,
                });
            }

            if pos >= self.chars.len() {
                let Some(frame) = stack.pop() else {
                    return Ok(root);
                };
                pos = self.settle(
                    frame.trigger,
                    frame.start,
                    FrameOutcome::Unclosed,
                    current(&mut stack, &mut root),
                    &mut failed,
                );
                continue;
            }

            if let Some(span) = self.spans.starting_at(pos) {
                current(&mut stack, &mut root)
                    .children
                    .push(span.leaf.clone());
                pos = span.end;
                continue;
            }

            if let Some(index) = trigger_at(&self.chars, pos) {
                let token = TRIGGERS[index].token;
                let next = pos + token.len();

                let closes = stack
                    .last()
                    .is_some_and(|frame| TRIGGERS[frame.trigger].kind == TRIGGERS[index].kind);
                if closes {
                    // Depth counts closed spans only; rolled-back frames never
                    // reach the tree.
                    if stack.len() > self.limits.max_nesting_depth {
                        return Err(ParseError::NestingTooDeep {
                            line: self.line,
                            column: pos + 1,
                            limit: self.limits.max_nesting_depth,
                        });
                    }
                    if let Some(frame) = stack.pop() {
                        pos = self.settle(
                            frame.trigger,
                            frame.start,
                            FrameOutcome::Closed(frame.node, next),
                            current(&mut stack, &mut root),
                            &mut failed,
                        );
                    }
                    continue;
                }

                if failed.contains(&(index, next)) {
                    current(&mut stack, &mut root).push_text(token);
                    pos = next;
                    continue;
                }

                if self.debug {
                    debug!(line = self.line, column = pos + 1, token, "open inline span");
                }
                stack.push(Frame {
                    trigger: index,
                    start: next,
                    node: InlineContainer::new(TRIGGERS[index].kind),
                });
                pos = next;
                continue;
            }

            current(&mut stack, &mut root).push_char(self.chars[pos]);
            pos += 1;
        }
    }

    /// Attaches a finished frame to its parent and returns where to resume.
    fn settle(
        &self,
        trigger: usize,
        start: usize,
        outcome: FrameOutcome,
        parent: &mut InlineContainer,
        failed: &mut HashSet<(usize, usize)>,
    ) -> usize {
        let token = TRIGGERS[trigger].token;
        match outcome {
            FrameOutcome::Closed(node, next) => {
                if self.debug {
                    debug!(line = self.line, column = next - token.len() + 1, token, "close inline span");
                }
                parent.children.push(Inline::Container(node));
                next
            }
            FrameOutcome::Unclosed => {
                if self.debug {
                    debug!(line = self.line, column = start - token.len() + 1, token, "roll back unclosed span");
                }
                failed.insert((trigger, start));
                parent.push_text(token);
                start
            }
        }
    }
}
