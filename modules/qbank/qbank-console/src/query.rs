//! List filters mirrored in the URL query string.

use url::form_urlencoded;

/// Value of the status filter that disables it.
pub const STATUS_ALL: &str = "all";

/// The filters a list view restores from, and writes back to, its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub status: String,
    /// 0-based.
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: STATUS_ALL.to_owned(),
            page: 0,
        }
    }
}

impl ListQuery {
    /// Parse `?search=..&status=..&page=..`; the leading `?` is optional.
    /// Missing or malformed values fall back to the defaults.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => parsed.search = value.into_owned(),
                "status" if !value.is_empty() => parsed.status = value.into_owned(),
                "page" => parsed.page = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        parsed
    }

    /// Render the non-default filters, with a leading `?`, or an empty string
    /// when every filter is at its default.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        if self.status != STATUS_ALL {
            serializer.append_pair("status", &self.status);
        }
        if self.page > 0 {
            serializer.append_pair("page", &self.page.to_string());
        }
        let encoded = serializer.finish();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }
}
