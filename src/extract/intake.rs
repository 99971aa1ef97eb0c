// src/extract/intake.rs
// =============================================================================
// One-time input intake.
//
// People often paste the video link itself into the description box. Before
// the text reaches the extractor we look at it once: if the whole input is a
// single short http(s) URL, it is offered back as the "video URL" field.
// The description text is returned untouched either way, so the pasted URL
// still gets checked like any other link.
// =============================================================================

// Anything this long is a description, not a pasted link
const MAX_PASTED_URL_LEN: usize = 400;

/// Splits raw input into `(video_url, description)`.
///
/// `video_url` is `Some` only when the trimmed input starts with `http://`
/// or `https://` (any case), fits on one line, and is shorter than 400
/// characters.
pub fn split_pasted_url(raw: &str) -> (Option<String>, String) {
    let candidate = raw.trim();

    let looks_like_url = super::urls::has_scheme(candidate)
        && candidate.lines().count() == 1
        && candidate.chars().count() < MAX_PASTED_URL_LEN;

    let video_url = looks_like_url.then(|| candidate.to_string());

    (video_url, raw.to_string())
}
