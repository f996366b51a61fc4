use crate::{board::Color, notation::NotatedMove};

/// One move of a game record, with the variations branching from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub number: u32,
    pub color: Color,
    pub notated: NotatedMove,
    pub is_main_line: bool,
    /// Alternative continuations rooted at this move, without the copy of
    /// this move that seeds each of them.
    pub variations: Vec<Vec<MoveRecord>>,
}

impl MoveRecord {
    pub(super) fn new(notated: NotatedMove, is_main_line: bool) -> Self {
        Self {
            number: notated.number,
            color: notated.color,
            notated,
            is_main_line,
            variations: Vec::new(),
        }
    }
}

/// Builds PGN-style movetext such as `1. e4 e5 2. Nf3 (2. Nc3 Nf6) 2... Nc6`.
#[derive(Debug, Default)]
pub(super) struct Movetext {
    text: String,
    needs_number: bool,
}

impl Movetext {
    pub fn push(&mut self, notated: &NotatedMove) {
        let starts_line = self.text.is_empty() || self.text.ends_with('(');
        if !starts_line {
            self.text.push(' ');
        }

        if notated.color.is_white() || self.needs_number || starts_line {
            self.text.push_str(&notated.number_prefix());
            self.text.push(' ');
        }
        self.text.push_str(&notated.san.to_string());

        self.needs_number = false;
    }

    /// Writes a parenthesised side line. Empty lines are skipped.
    pub fn push_variation<'a>(&mut self, line: impl IntoIterator<Item = &'a NotatedMove>) {
        let mut line = line.into_iter().peekable();
        if line.peek().is_none() {
            return;
        }

        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push('(');
        for notated in line {
            self.push(notated);
        }
        self.text.push(')');

        self.needs_number = true;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
