//! User and role model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::iso;

/// User role slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Lawyer,
    Paralegal,
    Secretary,
    Client,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Lawyer,
        UserRole::Paralegal,
        UserRole::Secretary,
        UserRole::Client,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Lawyer => "lawyer",
            UserRole::Paralegal => "paralegal",
            UserRole::Secretary => "secretary",
            UserRole::Client => "client",
        }
    }

    /// Catalog entry for this role
    pub fn role(&self) -> Role {
        let (id, name, description) = match self {
            UserRole::Admin => (1, "Administrador", "Acesso total ao sistema"),
            UserRole::Lawyer => (2, "Advogado", "Gerencia processos e clientes"),
            UserRole::Paralegal => (3, "Paralegal", "Auxilia nos processos jurídicos"),
            UserRole::Secretary => (4, "Secretário(a)", "Gerencia agenda e documentos"),
            UserRole::Client => (5, "Cliente", "Acesso aos seus processos"),
        };
        let catalog_date = role_catalog_date();
        Role {
            id,
            name: name.to_string(),
            slug: *self,
            description: Some(description.to_string()),
            created_at: catalog_date,
            updated_at: catalog_date,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "lawyer" => Ok(UserRole::Lawyer),
            "paralegal" => Ok(UserRole::Paralegal),
            "secretary" => Ok(UserRole::Secretary),
            "client" => Ok(UserRole::Client),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// 2025-01-01T00:00:00Z
fn role_catalog_date() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default()
}

/// Role attached to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: u32,
    pub name: String,
    pub slug: UserRole,
    pub description: Option<String>,
    #[serde(with = "iso", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Verification and preference data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub email_verified: bool,
    #[serde(with = "iso::option", default)]
    pub email_verified_at: Option<DateTime<Utc>>,
    #[serde(
        with = "iso::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preferences: BTreeMap<String, serde_json::Value>,
}

/// System user (lawyer, paralegal, admin, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Bar registration, lawyers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oab_number: Option<String>,
    #[serde(default)]
    pub metadata: UserMetadata,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(with = "iso", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Slug of the first role, if any
    pub fn primary_role(&self) -> Option<UserRole> {
        self.roles.first().map(|role| role.slug)
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.iter().any(|r| r.slug == role)
    }
}

/// Tokens handed out by the login endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login response: the user record plus its tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    pub user: User,
    pub auth: AuthTokens,
}

/// Login request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Forgot-password request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// Reset-password request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
}

/// Refresh-token response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshedToken {
    pub token: String,
}
