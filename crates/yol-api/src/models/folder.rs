//! Folder (legal case) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{iso, Client, User};

/// Folder lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderStatus {
    Active,
    Completed,
    Pending,
    Cancelled,
    Archived,
}

impl FolderStatus {
    pub const ALL: [FolderStatus; 5] = [
        FolderStatus::Active,
        FolderStatus::Completed,
        FolderStatus::Pending,
        FolderStatus::Cancelled,
        FolderStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderStatus::Active => "active",
            FolderStatus::Completed => "completed",
            FolderStatus::Pending => "pending",
            FolderStatus::Cancelled => "cancelled",
            FolderStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for FolderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FolderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FolderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid folder status: {}", s))
    }
}

/// Practice area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderArea {
    CivilLitigation,
    Labor,
    Tax,
    Criminal,
    Administrative,
    Consumer,
    Family,
    Corporate,
    Environmental,
    IntellectualProperty,
    RealEstate,
    International,
}

impl FolderArea {
    pub const ALL: [FolderArea; 12] = [
        FolderArea::CivilLitigation,
        FolderArea::Labor,
        FolderArea::Tax,
        FolderArea::Criminal,
        FolderArea::Administrative,
        FolderArea::Consumer,
        FolderArea::Family,
        FolderArea::Corporate,
        FolderArea::Environmental,
        FolderArea::IntellectualProperty,
        FolderArea::RealEstate,
        FolderArea::International,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderArea::CivilLitigation => "civil_litigation",
            FolderArea::Labor => "labor",
            FolderArea::Tax => "tax",
            FolderArea::Criminal => "criminal",
            FolderArea::Administrative => "administrative",
            FolderArea::Consumer => "consumer",
            FolderArea::Family => "family",
            FolderArea::Corporate => "corporate",
            FolderArea::Environmental => "environmental",
            FolderArea::IntellectualProperty => "intellectual_property",
            FolderArea::RealEstate => "real_estate",
            FolderArea::International => "international",
        }
    }

    /// Portuguese label shown in the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            FolderArea::CivilLitigation => "Cível Contencioso",
            FolderArea::Labor => "Trabalhista",
            FolderArea::Tax => "Tributário",
            FolderArea::Criminal => "Criminal",
            FolderArea::Administrative => "Administrativo",
            FolderArea::Consumer => "Consumidor",
            FolderArea::Family => "Família",
            FolderArea::Corporate => "Empresarial",
            FolderArea::Environmental => "Ambiental",
            FolderArea::IntellectualProperty => "Propriedade Intelectual",
            FolderArea::RealEstate => "Imobiliário",
            FolderArea::International => "Internacional",
        }
    }

    /// Pie-chart colour
    pub fn color(&self) -> &'static str {
        match self {
            FolderArea::CivilLitigation => "#14B8A6",
            FolderArea::Criminal => "#F43F5E",
            FolderArea::Labor => "#8B5CF6",
            FolderArea::Administrative => "#F59E0B",
            FolderArea::Consumer => "#3B82F6",
            FolderArea::Environmental => "#10B981",
            FolderArea::Corporate => "#6366F1",
            FolderArea::Tax => "#EC4899",
            FolderArea::Family => "#84CC16",
            FolderArea::IntellectualProperty => "#A855F7",
            FolderArea::RealEstate => "#EAB308",
            FolderArea::International => "#06B6D4",
        }
    }
}

impl std::fmt::Display for FolderArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FolderArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FolderArea::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| format!("Invalid folder area: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskLevel>,
    #[serde(
        with = "iso::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_movement: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Folder entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: u64,
    /// Office folder number, e.g. `1234/2025`
    pub code: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: FolderStatus,
    pub area: FolderArea,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    /// Judicial case number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opposing_party: Option<String>,
    /// Claim value in BRL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    pub client: Client,
    pub responsible_lawyer: User,
    #[serde(default)]
    pub team_members: Vec<User>,
    #[serde(default)]
    pub documents_count: u32,
    #[serde(default)]
    pub tasks_count: u32,
    #[serde(default)]
    pub hearings_count: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub metadata: FolderMetadata,
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso")]
    pub updated_at: DateTime<Utc>,
}

/// Row of the favorites widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFolder {
    pub id: u64,
    /// Responsible lawyer's name
    pub name: String,
    /// Document count
    pub count: u32,
}

/// Count and share of folders in one status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub status: FolderStatus,
    pub count: u64,
    pub percentage: f64,
}

/// Count and share of folders in one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBreakdown {
    pub area: FolderArea,
    pub count: u64,
    pub percentage: f64,
}

/// `GET /folders/stats` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderStats {
    pub total: u64,
    pub by_status: Vec<StatusBreakdown>,
    pub by_area: Vec<AreaBreakdown>,
    pub favorites: u64,
    pub recent: Vec<Folder>,
}
