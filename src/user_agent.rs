//! User-Agent strings for requests to the results site.
//!
//! The results site serves a bot-check page to clients that do not look like
//! a browser, so the default is a desktop browser string.

/// Browser User-Agent sent by default.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
