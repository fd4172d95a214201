//! Client (person or company represented by the office)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::iso;

/// Individual (CPF) or company (CNPJ)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    #[default]
    Individual,
    Company,
}

impl ClientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Individual => "individual",
            ClientKind::Company => "company",
        }
    }
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    #[serde(rename = "type", default)]
    pub kind: ClientKind,
    /// Individuals only
    #[serde(
        with = "iso::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<DateTime<Utc>>,
    /// Companies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
    /// CPF or CNPJ
    #[serde(default)]
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub folders_count: u32,
    #[serde(default)]
    pub active_folders_count: u32,
    #[serde(default)]
    pub metadata: ClientMetadata,
    #[serde(with = "iso", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn is_company(&self) -> bool {
        self.metadata.kind == ClientKind::Company
    }
}
