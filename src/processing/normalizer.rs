//! Text normalization and block segmentation

use crate::error::{RankerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A paragraph-like span of normalized resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    /// Position of the block in document order.
    pub index: usize,
}

impl TextBlock {
    pub fn char_length(&self) -> usize {
        self.text.chars().count()
    }

    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}

fn inline_whitespace() -> &'static Regex {
    static INLINE_WHITESPACE: OnceLock<Regex> = OnceLock::new();
    INLINE_WHITESPACE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("Invalid whitespace regex"))
}

/// Clean raw resume text and split it into blocks on blank lines.
///
/// Fails with [`RankerError::EmptyInput`] when the text is empty or nothing
/// survives normalization.
pub fn normalize(raw: &str) -> Result<Vec<TextBlock>> {
    if raw.is_empty() {
        return Err(RankerError::EmptyInput("resume text is empty".to_string()));
    }

    let cleaned = clean_text(raw);

    let mut blocks = Vec::new();
    let mut lines: Vec<&str> = Vec::new();

    for line in cleaned.lines() {
        let line = line.trim();
        if line.is_empty() {
            push_block(&mut blocks, &mut lines);
        } else {
            lines.push(line);
        }
    }
    push_block(&mut blocks, &mut lines);

    if blocks.is_empty() {
        return Err(RankerError::EmptyInput(
            "resume text contains no readable content".to_string(),
        ));
    }

    log::debug!("Normalized resume into {} blocks", blocks.len());
    Ok(blocks)
}

fn push_block(blocks: &mut Vec<TextBlock>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    let text = lines.join("\n").trim().to_string();
    lines.clear();
    if !text.is_empty() {
        let index = blocks.len();
        blocks.push(TextBlock { text, index });
    }
}

/// Unify line endings, map typographic characters and collapse inline whitespace.
pub fn clean_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let mapped: String = unified.chars().map(normalize_char).collect();
    inline_whitespace().replace_all(&mapped, " ").into_owned()
}

fn normalize_char(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2013}' | '\u{2014}' => '-',
        '\u{2026}' => '.',
        '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{25E6}' => '-',
        '\u{00A0}' => ' ',
        '\n' | '\t' => c,
        c if c.is_control() => ' ',
        _ => c,
    }
}
