use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrCode {
    pub id: i64,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub id: i64,
    pub user_id: Option<i64>,
    pub amount: f64,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub reference: Option<String>,
    pub created_at: Option<String>,
}
