//! Parsing of raw generation output into headline and ad copy.
//!
//! The generation service is asked for `Headline:` / `Ad copy:` labels but
//! is not guaranteed to comply, so extraction is an ordered ladder of
//! strategies with a fixed placeholder at the bottom. [`parse_generated`] is
//! total: same input, same output, and neither field ever comes back empty.

use regex::Regex;

/// Headline used when no labeled headline is found and the first sentence is
/// too short to stand in for one.
pub const DEFAULT_HEADLINE: &str = "Default Headline";

/// Ad copy used when the generation output is entirely blank.
pub const DEFAULT_AD_COPY: &str = "Default ad copy";

/// Headline and ad copy extracted from one generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdText {
    pub headline: String,
    pub ad_copy: String,
}

/// Extracts headline and ad copy from raw generation output.
///
/// Headline ladder: labeled `Headline:` line, else the first sentence when
/// it is longer than five characters, else [`DEFAULT_HEADLINE`]. Ad copy
/// ladder: everything after an `Ad copy:` label, else the raw text verbatim,
/// else [`DEFAULT_AD_COPY`] when even that is blank.
#[must_use]
pub fn parse_generated(raw: &str) -> AdText {
    let headline = headline_from_label(raw)
        .or_else(|| headline_from_first_sentence(raw))
        .unwrap_or_else(|| DEFAULT_HEADLINE.to_string());

    let ad_copy = copy_from_label(raw).unwrap_or_else(|| {
        if raw.trim().is_empty() {
            DEFAULT_AD_COPY.to_string()
        } else {
            raw.to_string()
        }
    });

    AdText { headline, ad_copy }
}

/// Takes the rest of the line after a literal `Headline:` label, with any
/// surrounding quotes stripped. `None` when there is no label or the labeled
/// text is blank.
fn headline_from_label(raw: &str) -> Option<String> {
    let label = Regex::new(r"Headline:[ \t]*(.*?)(?:\n|$)").expect("valid headline label regex");
    let captured = label.captures(raw)?.get(1)?.as_str();
    let headline = strip_quotes(captured.trim());
    if headline.is_empty() {
        None
    } else {
        Some(headline.to_string())
    }
}

/// Takes the text before the first period as the headline, provided it is
/// longer than five characters. Short fragments make meaningless headlines
/// and fall through to the placeholder.
fn headline_from_first_sentence(raw: &str) -> Option<String> {
    let first = raw.split('.').next().unwrap_or_default();
    if first.chars().count() <= 5 {
        return None;
    }
    let trimmed = first.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Takes everything after a literal `Ad copy:` label, newlines included.
/// `None` when there is no label or nothing follows it.
fn copy_from_label(raw: &str) -> Option<String> {
    let label = Regex::new(r"(?s)Ad copy:\s*(.*)").expect("valid ad copy label regex");
    let captured = label.captures(raw)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}

/// Strips one matching pair of straight or curly double quotes.
fn strip_quotes(text: &str) -> &str {
    let stripped = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            text.strip_prefix('\u{201c}')
                .and_then(|rest| rest.strip_suffix('\u{201d}'))
        });
    stripped.map_or(text, str::trim)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_headline_and_copy_are_extracted() {
        let result = parse_generated("Headline: \"Great Deal\"\nAd copy: Buy now.");
        assert_eq!(result.headline, "Great Deal");
        assert_eq!(result.ad_copy, "Buy now.");
    }

    #[test]
    fn unlabeled_text_falls_back_to_first_sentence_and_full_text() {
        let raw = "Amazing shoes for everyone. They are comfortable.";
        let result = parse_generated(raw);
        assert_eq!(result.headline, "Amazing shoes for everyone");
        assert_eq!(result.ad_copy, raw);
    }

    #[test]
    fn curly_quoted_headline_is_stripped() {
        let result = parse_generated("Headline: \u{201c}Step Into Comfort\u{201d}\nAd copy: Walk farther.");
        assert_eq!(result.headline, "Step Into Comfort");
    }

    #[test]
    fn unquoted_labeled_headline_is_taken_as_is() {
        let result = parse_generated("Headline: Step Into Comfort\nAd copy: Walk farther.");
        assert_eq!(result.headline, "Step Into Comfort");
    }

    #[test]
    fn multiline_ad_copy_is_kept_whole() {
        let raw = "Headline: Two Lines\nAd copy: First paragraph.\n\nSecond paragraph.";
        let result = parse_generated(raw);
        assert_eq!(result.ad_copy, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn short_first_sentence_falls_back_to_placeholder_headline() {
        let result = parse_generated("Hi. everyone should buy this");
        assert_eq!(result.headline, DEFAULT_HEADLINE);
        assert_eq!(result.ad_copy, "Hi. everyone should buy this");
    }

    #[test]
    fn blank_input_produces_both_placeholders() {
        let result = parse_generated("   \n  ");
        assert_eq!(result.headline, DEFAULT_HEADLINE);
        assert_eq!(result.ad_copy, DEFAULT_AD_COPY);
    }

    #[test]
    fn label_alone_on_its_line_yields_no_labeled_headline() {
        assert_eq!(headline_from_label("Headline:\nThe real text follows."), None);
        assert_eq!(headline_from_label("Headline:   "), None);
    }

    #[test]
    fn first_sentence_strategy_requires_more_than_five_chars() {
        assert_eq!(headline_from_first_sentence("Hi. there"), None);
        assert_eq!(
            headline_from_first_sentence("Amazing shoes. etc"),
            Some("Amazing shoes".to_string())
        );
    }

    #[test]
    fn label_matching_is_case_sensitive() {
        let raw = "HEADLINE: shouty\nAD COPY: ignored labels here. Yes really.";
        let result = parse_generated(raw);
        assert_eq!(result.headline, "HEADLINE: shouty\nAD COPY: ignored labels here");
        assert_eq!(result.ad_copy, raw);
    }

    #[test]
    fn parse_is_deterministic() {
        let raw = "Headline: Stable\nAd copy: Same every time.";
        assert_eq!(parse_generated(raw), parse_generated(raw));
    }

    #[test]
    fn never_returns_empty_fields_for_any_input() {
        for raw in ["", ".", "a.", "     .", "      .", "no labels at all", "Ad copy:   "] {
            let result = parse_generated(raw);
            assert!(
                !result.headline.is_empty(),
                "empty headline for input {raw:?}"
            );
            assert!(!result.ad_copy.is_empty(), "empty ad copy for input {raw:?}");
        }
    }
}
