// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use postcheck::Error;
use postcheck::app::{parse_batch, read_post_lines};
use postcheck::domain::MediaType;

// ─── Media type parsing ──────────────────────────────────────────────────────

#[test]
fn parses_media_types_case_insensitively() {
    assert_eq!("video".parse::<MediaType>().unwrap(), MediaType::Video);
    assert_eq!(" Image ".parse::<MediaType>().unwrap(), MediaType::Image);
    assert_eq!("GIF".parse::<MediaType>().unwrap(), MediaType::Gif);
    assert_eq!("none".parse::<MediaType>().unwrap(), MediaType::None);
}

#[test]
fn empty_media_type_is_rejected() {
    for raw in ["", "   "] {
        assert!(matches!(
            raw.parse::<MediaType>(),
            Err(Error::InvalidMediaType { .. })
        ));
    }
}

#[test]
fn rejects_unknown_media_type() {
    let err = "banana".parse::<MediaType>().unwrap_err();
    assert!(matches!(err, Error::InvalidMediaType { ref value } if value == "banana"));
    assert_eq!(err.to_string(), "Invalid media type 'banana'");
}

#[test]
fn media_type_round_trips_through_display() {
    for name in MediaType::ALL {
        let media: MediaType = name.parse().unwrap();
        assert_eq!(media.to_string(), *name);
    }
}

// ─── Batch input ─────────────────────────────────────────────────────────────

#[test]
fn parses_json_lines() {
    let input = r#"{"text": "first post", "media": "image"}

{"text": "second post"}
{"text": "third", "media": null}
"#;
    let posts = parse_batch(input).unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].text, "first post");
    assert_eq!(posts[0].media, MediaType::Image);
    assert_eq!(posts[1].media, MediaType::None);
    assert_eq!(posts[2].media, MediaType::None);
}

#[test]
fn empty_batch_input_is_fine() {
    assert!(parse_batch("").unwrap().is_empty());
    assert!(parse_batch("\n  \n").unwrap().is_empty());
}

#[test]
fn malformed_line_reports_line_number() {
    let input = "{\"text\": \"ok\"}\n\nnot json\n";
    match parse_batch(input) {
        Err(Error::Batch { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected batch error, got {other:?}"),
    }
}

#[test]
fn missing_text_is_an_error() {
    assert!(matches!(
        parse_batch(r#"{"media": "video"}"#),
        Err(Error::Batch { line: 1, .. })
    ));
}

#[test]
fn bad_media_in_batch_is_rejected() {
    assert!(matches!(
        parse_batch(r#"{"text": "hi", "media": "hologram"}"#),
        Err(Error::InvalidMediaType { .. })
    ));
}

// ─── Interactive lines ───────────────────────────────────────────────────────

fn lines(raw: &[&str]) -> Vec<Result<String, std::io::Error>> {
    raw.iter().map(|l| Ok(l.to_string())).collect()
}

#[test]
fn prompt_lines_join_until_blank() {
    let post = read_post_lines(lines(&["first line", "second line", "", "ignored"])).unwrap();
    assert_eq!(post, "first line\nsecond line");
}

#[test]
fn whitespace_only_line_ends_the_post() {
    let post = read_post_lines(lines(&["only", "   "])).unwrap();
    assert_eq!(post, "only");
}

#[test]
fn immediate_blank_line_gives_empty_post() {
    assert_eq!(read_post_lines(lines(&[""])).unwrap(), "");
    assert_eq!(read_post_lines(lines(&[])).unwrap(), "");
}

#[test]
fn prompt_errors_propagate() {
    let input = vec![
        Ok("partial".to_string()),
        Err(std::io::Error::other("closed")),
    ];
    assert!(read_post_lines(input).is_err());
}

#[test]
fn multi_line_prompt_reaches_newline_penalty() {
    let raw: Vec<String> = (0..12).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = raw.iter().map(String::as_str).collect();
    let post = read_post_lines(lines(&refs)).unwrap();
    let analysis = postcheck::analyze(&post, MediaType::None, &postcheck::AnalyzeOptions::default());
    assert_eq!(analysis.features.newline_count, 11);
    assert!(analysis.breakdown.has_penalty("EXCESSIVE_NEWLINES"));
}
