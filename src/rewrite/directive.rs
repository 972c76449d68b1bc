//! Line scanner for metadata directives.
//!
//! A directive is a single-line comment of the form
//! `<marker> @<key> <value>`, e.g. `// @name   My Script`. Everything else
//! is a plain line. Scanning borrows from the input; only rewritten values
//! are allocated.

use std::borrow::Cow;

/// One line of a scanned script, line terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Directive(Directive<'a>),
    Plain(&'a str),
}

/// A `<marker> @<key> <value>` line split into its parts.
///
/// `head` is the verbatim text up to the first character of the value
/// (indent, marker, `@key` and the separating whitespace), so a rewritten
/// line keeps the author's alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    head: &'a str,
    key: &'a str,
    value: Cow<'a, str>,
    tail: &'a str,
    ending: &'a str,
}

impl<'a> Directive<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, keeping head, trailing whitespace and terminator.
    pub fn with_value(mut self, value: impl Into<Cow<'a, str>>) -> Self {
        self.value = value.into();
        self
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(self.head);
        out.push_str(&self.value);
        out.push_str(self.tail);
        out.push_str(self.ending);
    }
}

impl Line<'_> {
    fn write_to(&self, out: &mut String) {
        match self {
            Line::Directive(d) => d.write_to(out),
            Line::Plain(text) => out.push_str(text),
        }
    }
}

/// Split `content` into lines and classify each one.
///
/// Concatenating the result with [`serialize`] reproduces `content` exactly.
pub fn scan<'a>(content: &'a str, marker: &str) -> Vec<Line<'a>> {
    content
        .split_inclusive('\n')
        .map(|raw| {
            let (body, ending) = split_ending(raw);
            match parse_directive(body, ending, marker) {
                Some(directive) => Line::Directive(directive),
                None => Line::Plain(raw),
            }
        })
        .collect()
}

/// Re-assemble scanned lines into text.
pub fn serialize(lines: &[Line<'_>]) -> String {
    let capacity = lines
        .iter()
        .map(|line| match line {
            Line::Directive(d) => d.head.len() + d.value.len() + d.tail.len() + d.ending.len(),
            Line::Plain(text) => text.len(),
        })
        .sum();
    let mut out = String::with_capacity(capacity);
    for line in lines {
        line.write_to(&mut out);
    }
    out
}

fn split_ending(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, &raw[body.len()..])
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, &raw[body.len()..])
    } else {
        (raw, "")
    }
}

fn parse_directive<'a>(body: &'a str, ending: &'a str, marker: &str) -> Option<Directive<'a>> {
    if marker.is_empty() {
        return None;
    }
    let rest = body.trim_start().strip_prefix(marker)?;
    let rest = rest.trim_start().strip_prefix('@')?;

    // A key must be followed by whitespace; `// @grant` alone is not a directive.
    let key_len = rest.find(char::is_whitespace)?;
    if key_len == 0 {
        return None;
    }
    let key = &rest[..key_len];

    let value_part = rest[key_len..].trim_start();
    let value_start = body.len() - value_part.len();
    let value = value_part.trim_end();

    Some(Directive {
        head: &body[..value_start],
        key,
        value: Cow::Borrowed(value),
        tail: &value_part[value.len()..],
        ending,
    })
}
