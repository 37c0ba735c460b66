//! Share links that reopen an article in the web front end.
//!
//! A share link is the front end's base URL with the original article URL
//! in the `url` query parameter.

use url::Url;

use crate::{Result, UnlockedError};

/// Query parameter carrying the article URL.
pub const SHARE_PARAM: &str = "url";

/// Front end that share links point at unless configured otherwise.
pub const DEFAULT_SHARE_BASE: &str = "https://medium-unlocked.streamlit.app";

/// Builds a share link for `input_url` on the front end at `base`.
///
/// # Example
///
/// ```rust
/// use unlocked_core::{share_link, url_from_share_link};
///
/// let link = share_link("https://unlocked.example", "https://medium.com/@a/b?x=1").unwrap();
/// assert_eq!(url_from_share_link(&link).as_deref(), Some("https://medium.com/@a/b?x=1"));
/// ```
pub fn share_link(base: &str, input_url: &str) -> Result<String> {
    let mut link = Url::parse(base).map_err(|e| UnlockedError::InvalidUrl(format!("{}: {}", base, e)))?;
    link.query_pairs_mut().append_pair(SHARE_PARAM, input_url.trim());
    Ok(link.into())
}

/// Recovers the article URL from a share link, if it carries one.
pub fn url_from_share_link(link: &str) -> Option<String> {
    let link = Url::parse(link).ok()?;
    link.query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
