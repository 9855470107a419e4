use std::fmt;

/// Sort direction understood by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters shared by the paginated list endpoints.
///
/// `page` is 1-based, as the backend expects. Unset fields are omitted from
/// the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub user_id: Option<i64>,
    pub include_stats: bool,
    /// Endpoint-specific parameters appended verbatim.
    pub extra: Vec<(String, String)>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the search text; blank text is treated as no search.
    #[must_use]
    pub fn search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_owned());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn include_stats(mut self) -> Self {
        self.include_stats = true;
        self
    }

    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Render as query pairs using the backend's camelCase keys.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: String| pairs.push((key.to_owned(), value));

        if let Some(role) = &self.role {
            push("role", role.clone());
        }
        if let Some(page) = self.page {
            push("page", page.to_string());
        }
        if let Some(limit) = self.limit {
            push("limit", limit.to_string());
        }
        if let Some(search) = &self.search {
            push("search", search.clone());
        }
        if let Some(status) = &self.status {
            push("status", status.clone());
        }
        if let Some(sort_by) = &self.sort_by {
            push("sortBy", sort_by.clone());
        }
        if let Some(order) = self.sort_order {
            push("sortOrder", order.as_str().to_owned());
        }
        if let Some(user_id) = self.user_id {
            push("userId", user_id.to_string());
        }
        if self.include_stats {
            push("includeStats", "true".to_owned());
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}
