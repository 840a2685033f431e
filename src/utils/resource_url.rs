//! Canonical resource URLs for hyperlinked representations.
//!
//! Users and groups reference each other by URL instead of raw identifiers.
//! [`ResourceLinks`] derives the URL from an identifier at serialization time
//! and resolves a URL back to an identifier on input.

/// Builds and parses `{base}/general/{users|groups}/{id}/` URLs.
#[derive(Debug, Clone)]
pub struct ResourceLinks {
    base_url: String,
}

const USERS_PATH: &str = "/general/users/";
const GROUPS_PATH: &str = "/general/groups/";

impl ResourceLinks {
    /// Creates a link builder rooted at `base_url` (trailing slashes ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn user(&self, id: i64) -> String {
        format!("{}{}{}/", self.base_url, USERS_PATH, id)
    }

    pub fn group(&self, id: i64) -> String {
        format!("{}{}{}/", self.base_url, GROUPS_PATH, id)
    }

    /// Resolves a group URL to its identifier.
    ///
    /// Accepts the absolute URL produced by [`Self::group`] or the bare path
    /// `/general/groups/{id}/`, with or without the trailing slash.
    pub fn parse_group(&self, url: &str) -> Option<i64> {
        self.parse(url, GROUPS_PATH)
    }

    fn parse(&self, url: &str, collection: &str) -> Option<i64> {
        let path = url.strip_prefix(self.base_url.as_str()).unwrap_or(url);
        let id = path.strip_prefix(collection)?;
        let id = id.strip_suffix('/').unwrap_or(id);

        id.parse::<i64>().ok().filter(|id| *id > 0)
    }
}
