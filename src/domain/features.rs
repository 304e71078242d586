// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use serde::Serialize;

use super::MediaType;

/// Structural signals extracted once from a post's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextFeatures {
    /// Character count (Unicode scalar values, not bytes)
    pub length: usize,
    /// Non-whitespace characters
    pub char_count: usize,
    pub letter_count: usize,
    pub upper_count: usize,
    /// Uppercase share of alphabetic characters, 0.0 when there are none
    pub caps_ratio: f64,
    pub has_question: bool,
    pub question_count: usize,
    pub newline_count: usize,
    pub whitespace_ratio: f64,
    /// Longest run of a repeated `!` or `?`
    pub max_punctuation_run: usize,
    pub urls: Vec<String>,
    pub url_count: usize,
    pub mentions: Vec<String>,
    pub mention_count: usize,
    pub hashtags: Vec<String>,
    pub hashtag_count: usize,
    pub media_type: MediaType,
}
