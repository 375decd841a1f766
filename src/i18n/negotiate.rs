//! Request language negotiation.
//!
//! Precedence: explicit `locale` parameter, then the `NEXT_LOCALE` cookie,
//! then `Accept-Language`, then the configured default.

use crate::i18n::Language;
use anyhow::{Context, Result};

/// Cookie the web front-end stores the chosen locale in.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Resolve the language for a request.
///
/// Only the explicit parameter is allowed to fail: a caller that asks for an
/// unsupported language by name gets an error, while stale cookies and browser
/// preferences silently fall through to the next source.
pub fn negotiate(
    explicit: Option<&str>,
    cookie_header: Option<&str>,
    accept_language: Option<&str>,
    default: Language,
) -> Result<Language> {
    if let Some(code) = explicit.map(str::trim).filter(|c| !c.is_empty()) {
        return Language::from_code(code)
            .with_context(|| format!("Unsupported locale '{}'", code));
    }

    let from_cookie = cookie_header
        .and_then(|header| cookie_value(header, LOCALE_COOKIE))
        .and_then(|code| Language::from_code(code).ok());
    if let Some(language) = from_cookie {
        return Ok(language);
    }

    Ok(accept_language
        .and_then(from_accept_language)
        .unwrap_or(default))
}

/// Pick the highest-weighted supported language from an `Accept-Language`
/// header. Entries are matched on their primary subtag, so `ar-EG` selects
/// Arabic. Entries with `q=0` or an unreadable `q` are refused.
pub fn from_accept_language(header: &str) -> Option<Language> {
    let mut ranges: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = match pieces.find_map(|p| p.trim().strip_prefix("q=")) {
                Some(q) => q.trim().parse::<f32>().ok()?,
                None => 1.0,
            };
            Some((tag.to_lowercase(), quality))
        })
        .filter(|(_, q)| *q > 0.0)
        .collect();

    // Stable sort keeps header order among equal weights
    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranges.iter().find_map(|(tag, _)| {
        let primary = tag.split('-').next().unwrap_or(tag.as_str());
        Language::from_code(primary).ok()
    })
}

/// Extract a cookie value from a `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}
