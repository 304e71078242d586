// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use libfuzzer_sys::fuzz_target;
use postcheck::{AnalyzeOptions, MediaType, analyze};

const MEDIA: [MediaType; 4] = [
    MediaType::None,
    MediaType::Gif,
    MediaType::Image,
    MediaType::Video,
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let options = AnalyzeOptions {
        simulate_oon: selector & 0x80 != 0,
    };
    let analysis = analyze(text, MEDIA[usize::from(selector & 0x03)], &options);

    assert!(analysis.overall_score() <= 100);
    for flag in &analysis.findings.triggered_flags {
        assert!(analysis.breakdown.has_penalty(flag.as_str()));
    }
    let _ = analysis.report().render(postcheck::services::reporter::ExportFormat::Toml);
});
