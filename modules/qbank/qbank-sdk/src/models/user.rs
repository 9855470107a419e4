use serde::{Deserialize, Serialize};

/// A console user. Companies are users carrying the `company` role, so the
/// company-specific columns are simply empty for everybody else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(alias = "user_id")]
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,

    // Company profile
    pub company_name: Option<String>,
    pub gst_number: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_description: Option<String>,

    // Address
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,

    pub roles: Vec<RoleRef>,
    pub is_active: bool,
    pub score: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A role reference inside a user record.
///
/// Some routes embed full role objects, others only the ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Id(i64),
    Object {
        #[serde(default)]
        role_id: Option<i64>,
        #[serde(default)]
        id: Option<i64>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RoleRef {
    /// The referenced role id: `role_id` wins over `id` for embedded objects.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Object { role_id, id, .. } => role_id.or(*id),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Object { name, .. } => name.as_deref(),
        }
    }
}

impl User {
    /// Ids of every role assigned to the user, whatever shape they came in.
    #[must_use]
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().filter_map(RoleRef::id).collect()
    }

    /// `first last`, skipping missing parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Display name for a company row: company name, else the contact name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.company_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => self.full_name(),
        }
    }
}

/// Aggregates served by `/users/company/{id}/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyStats {
    pub total_employees: u64,
    pub total_questions: u64,
    pub active_employees: u64,
}
