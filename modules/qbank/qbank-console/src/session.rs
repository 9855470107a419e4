use std::collections::HashSet;

/// Permission identifiers checked by the views.
pub mod permissions {
    pub const COMPANY_VIEW: &str = "company_view";
    pub const COMPANY_CREATE: &str = "company_create";
    pub const COMPANY_EDIT: &str = "company_edit";
    pub const COMPANY_DELETE: &str = "company_delete";
}

/// The signed-in user as the views see it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub score: i64,
    permissions: HashSet<String>,
}

impl CurrentUser {
    #[must_use]
    pub fn new<I, S>(user_id: i64, score: i64, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            score,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
