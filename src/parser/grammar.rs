//! Parser for a single Gradle dependency coordinate expression.
//!
//! Accepted language, applied after tree decoration has been stripped:
//!
//! ```text
//! coordinate   := group ":" artifact ":" version-expr trailer? ws* EOF
//! version-expr := declared ( ws? "->" ws? replacement )?
//! declared     := "{" ( "strictly" ws? )? version "}"? | version
//! trailer      := ws? "(" ( "*" | "c" ) ")"
//! ```
//!
//! `group`, `artifact`, and `version` are non-empty runs of word characters,
//! dots, and hyphens. The version after `->` is the one Gradle resolved to.
//! The trailer — `(*)` for an already-expanded subtree, `(c)` for a
//! constraint — is accepted and discarded. Anything outside this language
//! yields `None`; callers skip such lines rather than failing.

use crate::models::DependencyRecord;

/// Parse one dependency expression into a [`DependencyRecord`].
pub fn parse_dependency(expr: &str) -> Option<DependencyRecord> {
    CoordinateParser::new(expr).parse()
}

/// Cursor over the expression bytes, one method per grammar rule.
///
/// Splitting happens on the first two colons (group, then artifact), never
/// from the right, so exotic trailing notation cannot shift the name split.
struct CoordinateParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> CoordinateParser<'a> {
    fn new(expr: &'a str) -> Self {
        Self {
            input: expr.as_bytes(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Option<DependencyRecord> {
        let group = self.word()?;
        self.expect(b':')?;
        let artifact = self.word()?;
        self.expect(b':')?;
        let (declared, replacement) = self.version_expr()?;

        self.trailer();
        self.skip_ws();
        if self.pos != self.input.len() {
            return None;
        }

        Some(DependencyRecord {
            group_id: group,
            artifact_id: artifact,
            resolved_version: replacement.unwrap_or_else(|| declared.clone()),
            declared_version: declared,
        })
    }

    /// `declared ( ws? "->" ws? replacement )?`
    fn version_expr(&mut self) -> Option<(String, Option<String>)> {
        let braced = self.eat(b'{');
        if braced && self.eat_keyword("strictly") {
            self.skip_ws();
        }
        let declared = self.word()?;
        if braced {
            self.eat(b'}');
        }
        Some((declared, self.arrow_version()))
    }

    /// `( ws? "->" ws? version )?` — the conflict-resolution replacement.
    fn arrow_version(&mut self) -> Option<String> {
        let mark = self.pos;
        self.skip_ws();
        if self.eat(b'-') && self.eat(b'>') {
            self.skip_ws();
            if let Some(version) = self.word() {
                return Some(version);
            }
        }
        self.pos = mark;
        None
    }

    /// `ws? "(" ( "*" | "c" ) ")"` — matched and discarded.
    fn trailer(&mut self) {
        let mark = self.pos;
        self.skip_ws();
        if self.eat(b'(') && (self.eat(b'*') || self.eat(b'c')) && self.eat(b')') {
            return;
        }
        self.pos = mark;
    }

    /// Non-empty run of word characters, dots, and hyphens. A `-` that opens
    /// a `->` arrow is a boundary, not part of the word.
    fn word(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(&c) = self.input.get(self.pos) {
            if c == b'-' && self.input.get(self.pos + 1) == Some(&b'>') {
                break;
            }
            if c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b'-') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return None;
        }
        std::str::from_utf8(&self.input[start..self.pos])
            .ok()
            .map(str::to_string)
    }

    fn skip_ws(&mut self) {
        while matches!(self.input.get(self.pos), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, c: u8) -> bool {
        if self.input.get(self.pos) == Some(&c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: u8) -> Option<()> {
        if self.eat(c) {
            Some(())
        } else {
            None
        }
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.input[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }
}
