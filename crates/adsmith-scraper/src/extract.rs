//! Product-fact extraction from page HTML.
//!
//! Each field follows a priority chain, first non-empty wins: name from
//! `og:title` then `<title>`; description from `og:description` then the
//! standard description meta tag. Image sources are collected in document
//! order, skipping inline data URIs and resolving relative URLs against the
//! page's own URL.

use regex::Regex;

use crate::types::ProductFacts;

/// Extracts product facts from rendered page HTML.
///
/// `page_url` is the URL the HTML was fetched from; relative image sources
/// are resolved against it. Extraction never fails: fields the page does not
/// provide come back empty and the caller decides whether that is terminal.
#[must_use]
pub fn product_facts(html: &str, page_url: &str) -> ProductFacts {
    let name = {
        let og = extract_og_meta(html, "og:title");
        if og.is_empty() {
            extract_title(html)
        } else {
            og
        }
    };

    let description = {
        let og = extract_og_meta(html, "og:description");
        if og.is_empty() {
            extract_meta_description(html)
        } else {
            og
        }
    };

    let images = extract_image_sources(html, page_url);

    ProductFacts {
        name,
        description,
        images,
    }
}

fn extract_og_meta(html: &str, property: &str) -> String {
    let re = Regex::new(&format!(
        r#"(?is)<meta[^>]+property\s*=\s*[\"']{property}[\"'][^>]+content\s*=\s*[\"'](.*?)[\"'][^>]*>"#
    ))
    .expect("valid og meta regex");

    if let Some(cap) = re.captures(html) {
        return clean_text(cap.get(1).map_or("", |m| m.as_str()));
    }

    // Attribute order is not guaranteed; retry with content before property.
    let re_swapped = Regex::new(&format!(
        r#"(?is)<meta[^>]+content\s*=\s*[\"'](.*?)[\"'][^>]+property\s*=\s*[\"']{property}[\"'][^>]*>"#
    ))
    .expect("valid og meta fallback regex");

    re_swapped
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .unwrap_or_default()
}

fn extract_title(html: &str) -> String {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex");
    let Some(cap) = re.captures(html) else {
        return String::new();
    };
    clean_text(cap.get(1).map_or("", |m| m.as_str()))
}

fn extract_meta_description(html: &str) -> String {
    let re = Regex::new(
        r#"(?is)<meta[^>]+name\s*=\s*[\"']description[\"'][^>]+content\s*=\s*[\"'](.*?)[\"'][^>]*>"#,
    )
    .expect("valid meta description regex");

    if let Some(cap) = re.captures(html) {
        return clean_text(cap.get(1).map_or("", |m| m.as_str()));
    }

    let re_swapped = Regex::new(
        r#"(?is)<meta[^>]+content\s*=\s*[\"'](.*?)[\"'][^>]+name\s*=\s*[\"']description[\"'][^>]*>"#,
    )
    .expect("valid meta description fallback regex");

    re_swapped
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .unwrap_or_default()
}

fn extract_image_sources(html: &str, page_url: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)<img[^>]+src\s*=\s*[\"']([^\"']+)[\"']"#)
        .expect("valid img src regex");
    let base = reqwest::Url::parse(page_url).ok();

    re.captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
        .filter_map(|src| resolve_image_url(&src, base.as_ref()))
        .collect()
}

/// Absolute http(s) sources pass through; everything else (relative paths,
/// protocol-relative `//host/...`) resolves against the page URL. Sources
/// that cannot be resolved are dropped rather than stored broken.
fn resolve_image_url(src: &str, base: Option<&reqwest::Url>) -> Option<String> {
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }
    base.and_then(|b| b.join(src).ok()).map(|u| u.to_string())
}

fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let no_tags = tags.replace_all(input, " ");
    no_tags
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
