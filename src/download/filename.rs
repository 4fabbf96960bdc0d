//! Local filename derivation from URLs.
//!
//! The terminal path segment names the file on disk, taken verbatim. Query
//! and fragment never contribute, and the WHATWG parser has already resolved
//! dot segments and guaranteed segments contain no separators.

use url::Url;

/// Returns the terminal path segment of `url`, or `None` when the path ends
/// in a slash or the URL has no segmented path at all.
#[must_use]
pub(crate) fn filename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    Some(last.to_string())
}
