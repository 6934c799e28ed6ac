//! Line classification.
//!
//! Each grammar is an ordered [`RuleSet`]: the first rule whose predicate
//! accepts a line decides its [`BlockKind`]. Blank lines are recognized
//! before any rule runs and lines no rule accepts become paragraphs.

use std::sync::LazyLock;

use regex::Regex;

use super::inline::format_inline;
use crate::model::{BlockKind, SourceFormat, TextRun};

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("valid numbered item pattern"));

static NUMBERED_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s[A-Z]").expect("valid numbered section pattern"));

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s").expect("valid bullet pattern"));

static TITLE_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-5]\.").expect("valid title prefix pattern"));

const DASHES: [char; 2] = ['–', '—'];

/// One line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Zero-based line index
    pub index: usize,

    /// Line text without the line terminator
    pub raw: &'a str,

    /// Line text with surrounding whitespace removed
    pub trimmed: &'a str,
}

impl<'a> RawLine<'a> {
    /// Create a raw line, dropping a trailing carriage return.
    pub fn new(index: usize, raw: &'a str) -> Self {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        Self {
            index,
            raw,
            trimmed: raw.trim(),
        }
    }

    /// Check if the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// Check if the untrimmed line starts with whitespace.
    pub fn is_indented(&self) -> bool {
        self.raw.starts_with(char::is_whitespace)
    }
}

/// Resumable position in a text being split into lines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineCursor {
    offset: Option<usize>,
    index: usize,
}

impl LineCursor {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            offset: (!text.is_empty()).then_some(0),
            index: 0,
        }
    }

    /// Take the next line of `text`. The same text must be passed on every call.
    pub(crate) fn next_line<'t>(&mut self, text: &'t str) -> Option<RawLine<'t>> {
        let start = self.offset?;
        let rest = text.get(start..)?;
        let line = match rest.find('\n') {
            Some(end) => {
                self.offset = Some(start + end + 1);
                &rest[..end]
            }
            None => {
                self.offset = None;
                rest
            }
        };

        let raw = RawLine::new(self.index, line);
        self.index += 1;
        Some(raw)
    }
}

/// Split text into lines on `\n`.
///
/// A trailing newline yields a final empty line. Empty text yields no lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = RawLine<'_>> {
    let mut cursor = LineCursor::new(text);
    std::iter::from_fn(move || cursor.next_line(text))
}

/// A line with its kind and inline-formatted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Assigned kind
    pub kind: BlockKind,

    /// Payload with sigils removed
    pub content: Vec<TextRun>,

    /// Zero-based index of the source line
    pub source_line: usize,
}

impl ClassifiedLine {
    /// Get the payload text without emphasis.
    pub fn text(&self) -> String {
        crate::model::plain_text(&self.content)
    }
}

/// When a rule may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// On every line
    Always,
    /// Only until a title has been assigned in the document
    UntilTitleFound,
}

/// One classification rule.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Kind assigned when the rule fires
    pub kind: BlockKind,

    /// Document state required for the rule to be considered
    pub gate: Gate,

    /// Predicate over the line
    pub matches: fn(&RawLine<'_>) -> bool,

    /// Extracts the payload from the trimmed line
    pub payload: fn(&str) -> &str,
}

impl Rule {
    /// Create a rule that is always considered.
    pub fn new(
        kind: BlockKind,
        matches: fn(&RawLine<'_>) -> bool,
        payload: fn(&str) -> &str,
    ) -> Self {
        Self {
            kind,
            gate: Gate::Always,
            matches,
            payload,
        }
    }

    /// Restrict the rule with a gate.
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    fn is_open(&self, state: &ClassifierState) -> bool {
        match self.gate {
            Gate::Always => true,
            Gate::UntilTitleFound => !state.title_found,
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// An ordered rule table for one grammar.
#[derive(Debug, Clone)]
pub struct RuleSet {
    format: SourceFormat,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set from rules in priority order.
    pub fn new(format: SourceFormat, rules: Vec<Rule>) -> Self {
        Self { format, rules }
    }

    /// Explicit `#`, `##`, `###` and `- ` sigils.
    ///
    /// With `ordered_lists`, `1. ` lines become numbered items.
    pub fn markdown(ordered_lists: bool) -> Self {
        let mut rules = vec![
            Rule::new(BlockKind::Title, |l| l.trimmed.starts_with("# "), |t| {
                t[2..].trim_start()
            }),
            Rule::new(
                BlockKind::SectionHeader,
                |l| l.trimmed.starts_with("## "),
                |t| t[3..].trim_start(),
            ),
            Rule::new(
                BlockKind::SubsectionHeader,
                |l| l.trimmed.starts_with("### "),
                |t| t[4..].trim_start(),
            ),
            Rule::new(
                BlockKind::BulletItem,
                |l| l.trimmed.starts_with("- "),
                |t| t[2..].trim_start(),
            ),
        ];
        if ordered_lists {
            rules.push(Rule::new(
                BlockKind::NumberedItem,
                |l| NUMBERED_ITEM.is_match(l.trimmed),
                strip_number,
            ));
        }
        Self::new(SourceFormat::Markdown, rules)
    }

    /// Heuristic structure detection for text without sigils.
    pub fn plain_text() -> Self {
        Self::new(
            SourceFormat::PlainText,
            vec![
                Rule::new(BlockKind::NumberedItem, is_numbered_item, strip_number),
                Rule::new(BlockKind::BulletItem, is_bullet_item, strip_bullet),
                Rule::new(BlockKind::Title, is_title, whole_line).gated(Gate::UntilTitleFound),
                Rule::new(BlockKind::SectionHeader, is_section_header, whole_line),
                Rule::new(BlockKind::SubsectionHeader, is_subsection_header, whole_line),
            ],
        )
    }

    /// Rule set for a source format with default options.
    pub fn for_format(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Markdown => Self::markdown(true),
            SourceFormat::PlainText => Self::plain_text(),
        }
    }

    /// Append a rule at the lowest priority.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Grammar the rules implement.
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Per-document classification state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Set once a line has been classified as a title. Never reset.
    pub title_found: bool,
}

/// Assigns a [`BlockKind`] to each line of one document.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: RuleSet,
    state: ClassifierState,
}

impl LineClassifier {
    /// Create a classifier over a rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            state: ClassifierState::default(),
        }
    }

    /// Markdown classifier.
    pub fn markdown(ordered_lists: bool) -> Self {
        Self::new(RuleSet::markdown(ordered_lists))
    }

    /// Heuristic plain-text classifier.
    pub fn plain_text() -> Self {
        Self::new(RuleSet::plain_text())
    }

    /// Classifier for a source format with default options.
    pub fn for_format(format: SourceFormat) -> Self {
        Self::new(RuleSet::for_format(format))
    }

    /// Grammar in use.
    pub fn format(&self) -> SourceFormat {
        self.rules.format()
    }

    /// Current document state.
    pub fn state(&self) -> ClassifierState {
        self.state
    }

    /// Classify the next line of the document.
    pub fn classify(&mut self, line: &RawLine<'_>) -> ClassifiedLine {
        if line.is_blank() {
            log::trace!("line {}: blank", line.index);
            return ClassifiedLine {
                kind: BlockKind::Blank,
                content: Vec::new(),
                source_line: line.index,
            };
        }

        let matched = self
            .rules
            .rules()
            .iter()
            .find(|rule| rule.is_open(&self.state) && (rule.matches)(line));

        let (kind, payload) = match matched {
            Some(rule) => (rule.kind, (rule.payload)(line.trimmed)),
            None => (BlockKind::Paragraph, line.trimmed),
        };

        if kind == BlockKind::Title {
            self.state.title_found = true;
        }
        log::trace!("line {}: {:?}", line.index, kind);

        ClassifiedLine {
            kind,
            content: format_inline(payload),
            source_line: line.index,
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| !c.is_lowercase())
}

fn contains_any(text: &str, chars: &[char]) -> bool {
    text.contains(chars)
}

fn is_numbered_section(text: &str) -> bool {
    NUMBERED_SECTION.is_match(text) && !text.ends_with('.') && !text.contains(':')
}

fn is_numbered_item(line: &RawLine<'_>) -> bool {
    let t = line.trimmed;
    NUMBERED_ITEM.is_match(t)
        && !is_numbered_section(t)
        && (char_len(t) > 20 || t.contains(':') || t.ends_with('.'))
}

fn is_bullet_item(line: &RawLine<'_>) -> bool {
    if BULLET.is_match(line.trimmed) {
        return true;
    }
    line.raw.starts_with("  ") && char_len(line.raw.trim_end()) > 10 && !line.raw.contains(':')
}

fn is_title(line: &RawLine<'_>) -> bool {
    let t = line.trimmed;
    let len = char_len(t);
    len > 5
        && len < 100
        && starts_uppercase(t)
        && !contains_any(t, &['.', ',', ':'])
        && !line.is_indented()
        && !TITLE_NUMBER_PREFIX.is_match(t)
        && (contains_any(t, &DASHES) || word_count(t) <= 10)
}

fn is_section_header(line: &RawLine<'_>) -> bool {
    let t = line.trimmed;
    if is_numbered_section(t) {
        return true;
    }
    let len = char_len(t);
    len > 5
        && len < 100
        && starts_uppercase(t)
        && !contains_any(t, &['.', ',', ':', '•', '-', '*'])
        && word_count(t) >= 2
        && !line.is_indented()
        && !contains_any(t, &DASHES)
}

fn is_subsection_header(line: &RawLine<'_>) -> bool {
    let t = line.trimmed;
    let len = char_len(t);
    len > 5
        && len < 80
        && starts_uppercase(t)
        && !contains_any(t, &['.', ','])
        && !NUMBERED_ITEM.is_match(t)
        && word_count(t) <= 8
        && !contains_any(t, &['–', '—', '•', '-', '*'])
        && !line.is_indented()
}

fn whole_line(text: &str) -> &str {
    text
}

fn strip_number(text: &str) -> &str {
    match NUMBERED_ITEM.find(text) {
        Some(m) => text[m.end()..].trim_start(),
        None => text,
    }
}

fn strip_bullet(text: &str) -> &str {
    match BULLET.find(text) {
        Some(m) => text[m.end()..].trim_start(),
        None => text,
    }
}
