//! Users, retailers and the references dues and transactions hold to them.

use super::wire;
use serde::{Deserialize, Serialize};

/// Role of the signed-in user. Decides which dashboard page is shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Supplier,
    Retailer,
    Admin,
}

/// The authenticated user, as returned by `/auth/login/` and persisted in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub email: String,
    #[serde(alias = "user_type")]
    pub role: Role,
    #[serde(default)]
    pub business_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub user: Identity,
    /// Present when the backend issues token auth; session-only backends omit it.
    #[serde(default)]
    pub token: Option<String>,
}

/// A retailer that a supplier can raise dues against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retailer {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub business_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Reference from a due or transaction to one of its parties.
///
/// List endpoints send the bare primary key (with `*_name` siblings on the parent record),
/// detail views may nest the party instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Detailed {
        #[serde(deserialize_with = "wire::id")]
        id: String,
        business_name: String,
        #[serde(default)]
        phone: Option<String>,
    },
    Id(#[serde(deserialize_with = "wire::id")] String),
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            PartyRef::Detailed { id, .. } => id,
            PartyRef::Id(id) => id,
        }
    }

    pub fn business_name(&self) -> Option<&str> {
        match self {
            PartyRef::Detailed { business_name, .. } => Some(business_name),
            PartyRef::Id(_) => None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            PartyRef::Detailed { phone, .. } => phone.as_deref(),
            PartyRef::Id(_) => None,
        }
    }
}
