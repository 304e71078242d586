// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::{MediaType, TextFeatures};

/// Question mark variants: ASCII, fullwidth, inverted, Arabic, Greek, Armenian.
pub const QUESTION_MARKS: &[char] = &['?', '\u{FF1F}', '\u{00BF}', '\u{061F}', '\u{037E}', '\u{055E}'];

// `http(s)://...` or a bare `domain.tld/...`
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)https?://[^\s<>"']+|\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}/[^\s<>"']*"#,
    )
    .unwrap()
});

// Sigil must not follow a word character, so `me@host` and `a#b` don't count
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w@#])([@#])(\w+)").unwrap());

const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"'];

pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Derive all structural signals from `text`. Never fails; empty text
    /// yields zero counts and zero ratios.
    pub fn extract(text: &str, media_type: MediaType) -> TextFeatures {
        let mut length = 0;
        let mut char_count = 0;
        let mut letter_count = 0;
        let mut upper_count = 0;
        let mut whitespace_count = 0;
        let mut newline_count = 0;
        let mut question_count = 0;

        for c in text.chars() {
            length += 1;
            if c.is_whitespace() {
                whitespace_count += 1;
                if c == '\n' {
                    newline_count += 1;
                }
                continue;
            }
            char_count += 1;
            if c.is_alphabetic() {
                letter_count += 1;
                if c.is_uppercase() {
                    upper_count += 1;
                }
            }
            if QUESTION_MARKS.contains(&c) {
                question_count += 1;
            }
        }

        let (urls, spans) = Self::find_urls(text);
        let stripped = Self::blank_spans(text, &spans);
        let (mentions, hashtags) = Self::find_tags(&stripped);

        let features = TextFeatures {
            length,
            char_count,
            letter_count,
            upper_count,
            caps_ratio: ratio(upper_count, letter_count),
            has_question: question_count > 0,
            question_count,
            newline_count,
            whitespace_ratio: ratio(whitespace_count, length),
            max_punctuation_run: Self::max_punctuation_run(text),
            url_count: urls.len(),
            urls,
            mention_count: mentions.len(),
            mentions,
            hashtag_count: hashtags.len(),
            hashtags,
            media_type,
        };

        trace!(
            length = features.length,
            caps_ratio = features.caps_ratio,
            urls = features.url_count,
            hashtags = features.hashtag_count,
            "features extracted"
        );

        features
    }

    /// URLs in text order, with trailing sentence punctuation removed,
    /// plus their byte spans in `text`.
    fn find_urls(text: &str) -> (Vec<String>, Vec<(usize, usize)>) {
        let mut urls = Vec::new();
        let mut spans = Vec::new();

        for m in URL_REGEX.find_iter(text) {
            let trimmed = m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
            if trimmed.is_empty() {
                continue;
            }
            urls.push(trimmed.to_string());
            spans.push((m.start(), m.start() + trimmed.len()));
        }

        (urls, spans)
    }

    fn blank_spans(text: &str, spans: &[(usize, usize)]) -> String {
        if spans.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for &(start, end) in spans {
            out.push_str(&text[cursor..start]);
            out.push(' ');
            cursor = end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    fn find_tags(text: &str) -> (Vec<String>, Vec<String>) {
        let mut mentions = Vec::new();
        let mut hashtags = Vec::new();

        for caps in TAG_REGEX.captures_iter(text) {
            let (Some(sigil), Some(name)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let token = format!("{}{}", sigil.as_str(), name.as_str());
            if sigil.as_str() == "@" {
                mentions.push(token);
            } else {
                hashtags.push(token);
            }
        }

        (mentions, hashtags)
    }

    fn max_punctuation_run(text: &str) -> usize {
        // Mixed runs like `?!?!` count as one run
        let mut best = 0;
        let mut run = 0;

        for c in text.chars() {
            if matches!(c, '!' | '?') {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }

        best
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
