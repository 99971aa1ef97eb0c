// src/extract/mod.rs
// =============================================================================
// This module turns pasted text into the list of URLs we are going to check.
//
// Submodules:
// - urls: the regex-and-normalize pass over free text
// - intake: the one-time "did they paste the video link itself?" step
// =============================================================================

mod intake;
mod urls;

pub use intake::split_pasted_url;
pub use urls::extract_urls;
