//! Dashboard and widget payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{iso, AreaBreakdown, FolderStatus, PriorityCount, StatusBreakdown, TaskPriority};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderSummary {
    pub total: u64,
    pub active: u64,
    pub completed: u64,
    pub new_this_month: u64,
    pub by_area: Vec<AreaBreakdown>,
    pub by_status: Vec<StatusBreakdown>,
    pub monthly_evolution: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: u64,
    pub pending: u64,
    pub completed_today: u64,
    pub overdue: u64,
    pub by_priority: Vec<PriorityCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HearingSummary {
    pub upcoming: u64,
    pub this_week: u64,
    pub this_month: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub total: u64,
    pub active: u64,
    pub new_this_month: u64,
}

/// `GET /dashboard/stats` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub folders: FolderSummary,
    pub tasks: TaskSummary,
    pub hearings: HearingSummary,
    pub clients: ClientSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFolderCard {
    pub id: u64,
    pub code: String,
    pub title: String,
    pub client_name: String,
    pub status: FolderStatus,
    pub documents_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentTask {
    pub id: u64,
    pub title: String,
    #[serde(with = "iso")]
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub assigned_to_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub user_name: String,
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBirthday {
    pub id: u64,
    pub name: String,
    #[serde(with = "iso")]
    pub birthday: DateTime<Utc>,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteClient {
    pub id: u64,
    pub name: String,
    pub folder_count: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthValue {
    pub month: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFolders {
    pub active: u64,
    pub new_this_month: u64,
    pub history: Vec<MonthValue>,
}

/// Pie-chart slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCounter {
    pub label: String,
    pub value: u64,
    pub color: String,
    pub percentage: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPoint {
    pub month: String,
    pub value: u64,
    pub new: u64,
    pub percentage: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineCategory {
    pub label: String,
    pub percentage: u64,
    pub total: u64,
    pub completed: u64,
    pub color: String,
    #[serde(with = "iso")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayPerson {
    pub avatar: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_field_casing() {
        let active = ActiveFolders {
            active: 3,
            new_this_month: 1,
            history: vec![],
        };
        let value = serde_json::to_value(&active).unwrap();
        assert_eq!(value["newThisMonth"], 1);

        let favorite = FavoriteClient {
            id: 1,
            name: "João Silva".to_string(),
            folder_count: 4,
            color: "#008980".to_string(),
        };
        let value = serde_json::to_value(&favorite).unwrap();
        assert_eq!(value["folderCount"], 4);
    }
}
