//! Dashboard aggregates and chart widgets
//!
//! Everything here is recomputed from the store on every call. The
//! `*_at` functions take `now` explicitly and do the actual work.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use url::form_urlencoded;

use super::folder_service::{area_breakdown, status_breakdown};
use super::task_service::priority_counts;
use super::{count_where, percentage};
use crate::error::ApiResult;
use crate::models::{
    Activity, ActivityCounter, ActiveFolders, AreaSlice, BirthdayPerson, Client, ClientBirthday,
    ClientKind, ClientSummary, DashboardStats, DeadlineCategory, FavoriteClient,
    FavoriteFolderCard, Folder, FolderArea, FolderStatus, FolderSummary, HearingSummary,
    MonthValue, MonthlyCount, RequestPoint, Task, TaskStatus, TaskSummary, UrgentTask,
};
use crate::store::MockStore;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const FAVORITE_FOLDERS_COUNT: usize = 5;
const URGENT_TASKS_COUNT: usize = 10;
const RECENT_ACTIVITY_COUNT: usize = 10;
const BIRTHDAYS_COUNT: usize = 5;
const FAVORITE_CLIENTS_COUNT: usize = 6;
const HISTORY_MONTHS: u32 = 6;

const CLIENT_COLORS: [&str; 6] = ["#008980", "#2FAC68", "#F6C000", "#5A5DFF", "#FF5A5D", "#FF8A00"];

const ACTIVITY_TYPES: [(&str, &str); 5] = [
    ("folder_created", "New folder created"),
    ("task_completed", "Task completed"),
    ("document_uploaded", "Document uploaded"),
    ("hearing_scheduled", "Hearing scheduled"),
    ("client_added", "New client added"),
];

fn month_label(month: u32) -> &'static str {
    MONTH_LABELS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default()
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

fn rounded_percentage(count: u64, total: u64) -> u64 {
    percentage(count, total).round() as u64
}

fn widget_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

/// Whole years between `birthday` and `now`
pub fn age_at(birthday: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
    let mut age = now.year() - birthday.year();
    if (now.month(), now.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    age
}

/// Random month series from January up to the current month
fn monthly_evolution<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<MonthlyCount> {
    (0..now.month())
        .map(|index| MonthlyCount {
            month: month_label(index + 1).to_string(),
            count: rng.random_range(0..20) + 10 + u64::from(index) * 2,
        })
        .collect()
}

pub fn stats_at<R: Rng + ?Sized>(
    folders: &[Folder],
    tasks: &[Task],
    clients: &[Client],
    now: DateTime<Utc>,
    rng: &mut R,
) -> DashboardStats {
    let this_month = start_of_month(now);
    let today = super::task_service::start_of_day(now);

    DashboardStats {
        folders: FolderSummary {
            total: folders.len() as u64,
            active: count_where(folders, |f| f.status == FolderStatus::Active),
            completed: count_where(folders, |f| f.status == FolderStatus::Completed),
            new_this_month: count_where(folders, |f| f.created_at >= this_month),
            by_area: area_breakdown(folders),
            by_status: status_breakdown(folders),
            monthly_evolution: monthly_evolution(rng, now),
        },
        tasks: TaskSummary {
            total: tasks.len() as u64,
            pending: count_where(tasks, |t| t.status == TaskStatus::Pending),
            completed_today: count_where(tasks, |t| {
                t.is_completed() && t.completed_at.is_some_and(|at| at >= today)
            }),
            overdue: count_where(tasks, |t| t.is_overdue(now)),
            by_priority: priority_counts(tasks),
        },
        hearings: HearingSummary {
            upcoming: 15,
            this_week: 3,
            this_month: 8,
        },
        clients: ClientSummary {
            total: clients.len() as u64,
            active: count_where(clients, |c| c.active_folders_count > 0),
            new_this_month: count_where(clients, |c| c.created_at >= this_month),
        },
    }
}

pub fn favorite_folders(folders: &[Folder]) -> Vec<FavoriteFolderCard> {
    folders
        .iter()
        .filter(|folder| folder.is_favorite)
        .take(FAVORITE_FOLDERS_COUNT)
        .map(|folder| FavoriteFolderCard {
            id: folder.id,
            code: folder.code.clone(),
            title: folder.title.clone(),
            client_name: folder.client.name.clone(),
            status: folder.status,
            documents_count: folder.documents_count,
        })
        .collect()
}

/// Open high/urgent tasks, soonest first
pub fn urgent_tasks(tasks: &[Task]) -> Vec<UrgentTask> {
    let mut urgent: Vec<&Task> = tasks
        .iter()
        .filter(|task| !task.is_completed() && task.priority.is_pressing())
        .collect();
    urgent.sort_by_key(|task| task.due_date);
    urgent
        .into_iter()
        .take(URGENT_TASKS_COUNT)
        .map(|task| UrgentTask {
            id: task.id,
            title: task.title.clone(),
            due_date: task.due_date,
            priority: task.priority,
            assigned_to_name: task.assigned_to.full_name.clone(),
            folder_code: task.folder.as_ref().map(|folder| folder.code.clone()),
        })
        .collect()
}

pub fn recent_activity_at<R: Rng + ?Sized>(
    folders: &[Folder],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Activity> {
    (0..RECENT_ACTIVITY_COUNT)
        .map(|i| {
            let id = i as u64 + 1;
            let created_at = now - Duration::hours(i as i64);
            match (ACTIVITY_TYPES.choose(rng), folders.choose(rng)) {
                (Some((kind, message)), Some(folder)) => Activity {
                    id,
                    kind: kind.to_string(),
                    message: format!("{}: {}", message, folder.code),
                    user_name: folder.responsible_lawyer.full_name.clone(),
                    created_at,
                },
                _ => Activity {
                    id,
                    kind: "system".to_string(),
                    message: "System activity".to_string(),
                    user_name: "System".to_string(),
                    created_at,
                },
            }
        })
        .collect()
}

/// Individual clients with a birthday this month
pub fn client_birthdays_at(clients: &[Client], now: DateTime<Utc>) -> Vec<ClientBirthday> {
    clients
        .iter()
        .filter(|client| client.metadata.kind == ClientKind::Individual)
        .filter_map(|client| {
            let birthday = client.metadata.birthday?;
            (birthday.month() == now.month()).then(|| ClientBirthday {
                id: client.id,
                name: client.name.clone(),
                birthday,
                age: age_at(birthday, now),
            })
        })
        .take(BIRTHDAYS_COUNT)
        .collect()
}

/// Clients with the most folders, coloured from the sidebar palette
pub fn favorite_clients(folders: &[Folder]) -> Vec<FavoriteClient> {
    let mut order: Vec<u64> = Vec::new();
    let mut counts: HashMap<u64, (String, u64)> = HashMap::new();
    for folder in folders {
        let entry = counts.entry(folder.client.id).or_insert_with(|| {
            order.push(folder.client.id);
            (folder.client.name.clone(), 0)
        });
        entry.1 += 1;
    }

    let mut ranked: Vec<(u64, String, u64)> = order
        .into_iter()
        .filter_map(|id| counts.remove(&id).map(|(name, count)| (id, name, count)))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2));

    ranked
        .into_iter()
        .take(FAVORITE_CLIENTS_COUNT)
        .zip(CLIENT_COLORS)
        .map(|((id, name, folder_count), color)| FavoriteClient {
            id,
            name,
            folder_count,
            color: color.to_string(),
        })
        .collect()
}

pub fn active_folders_at(folders: &[Folder], now: DateTime<Utc>) -> ActiveFolders {
    let this_month = start_of_month(now);
    let history = (0..HISTORY_MONTHS)
        .rev()
        .map(|back| {
            let month = now.checked_sub_months(Months::new(back)).unwrap_or(now);
            MonthValue {
                month: month_label(month.month()).to_string(),
                value: count_where(folders, |f| {
                    f.created_at.year() == month.year() && f.created_at.month() == month.month()
                }),
            }
        })
        .collect();

    ActiveFolders {
        active: count_where(folders, |f| f.status == FolderStatus::Active),
        new_this_month: count_where(folders, |f| f.created_at >= this_month),
        history,
    }
}

/// Rounded share per practice area, empty areas dropped
pub fn area_division(folders: &[Folder]) -> Vec<AreaSlice> {
    let total = folders.len() as u64;
    FolderArea::ALL
        .into_iter()
        .map(|area| AreaSlice {
            name: area.display_name().to_string(),
            value: rounded_percentage(count_where(folders, |f| f.area == area), total),
            color: area.color().to_string(),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

pub fn folder_activity_at(folders: &[Folder], now: DateTime<Utc>) -> Vec<ActivityCounter> {
    let total = folders.len() as u64;
    let one_week_ago = now - Duration::weeks(1);
    let one_month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);

    let counters = [
        (
            "Novas esta semana",
            "bg-cyan-500",
            count_where(folders, |f| f.created_at >= one_week_ago),
        ),
        (
            "Novas este mês",
            "bg-purple-500",
            count_where(folders, |f| f.created_at >= one_month_ago),
        ),
        (
            "Concluídas este mês",
            "bg-emerald-500",
            count_where(folders, |f| {
                f.status == FolderStatus::Completed && f.updated_at >= one_month_ago
            }),
        ),
        (
            "Total ativo",
            "bg-blue-500",
            count_where(folders, |f| f.status == FolderStatus::Active),
        ),
    ];

    counters
        .into_iter()
        .map(|(label, color, value)| ActivityCounter {
            label: label.to_string(),
            value,
            color: color.to_string(),
            percentage: rounded_percentage(value, total),
        })
        .collect()
}

/// Growing monthly request series up to the current month
pub fn requests_at<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Vec<RequestPoint> {
    (0..now.month())
        .map(|index| {
            let base = 10.0 + f64::from(index) * 1.5 + rng.random::<f64>() * 4.0;
            let new = rng.random_range(0..5) + 3;
            RequestPoint {
                month: month_label(index + 1).to_string(),
                value: base.round() as u64,
                new,
                percentage: rounded_percentage(new, 20),
            }
        })
        .collect()
}

pub fn hearings_at(now: DateTime<Utc>) -> Vec<DeadlineCategory> {
    [
        ("Audiências", 75, 12, 9, "#14B8A6", 5),
        ("Prazos processuais", 60, 20, 12, "#F43F5E", 10),
        ("Prazos administrativos", 90, 10, 9, "#8B5CF6", 15),
    ]
    .into_iter()
    .map(|(label, percentage, total, completed, color, days)| DeadlineCategory {
        label: label.to_string(),
        percentage,
        total,
        completed,
        color: color.to_string(),
        date: now + Duration::days(days),
    })
    .collect()
}

/// Random cartoon avatar from avataaars.io
fn cartoon_avatar<R: Rng + ?Sized>(rng: &mut R) -> String {
    const HAIR: &[&str] = &["Black", "Blonde", "Brown", "BrownDark", "Auburn"];
    let options: [(&str, &[&str]); 12] = [
        ("avatarStyle", &["Circle", "Transparent"]),
        (
            "topType",
            &[
                "ShortHairShortCurly",
                "ShortHairShortFlat",
                "ShortHairShortWaved",
                "LongHairStraight",
                "LongHairCurly",
                "LongHairBob",
            ],
        ),
        ("accessoriesType", &["Prescription01", "Prescription02", "Wayfarers", "Blank"]),
        ("hairColor", HAIR),
        ("facialHairType", &["Blank", "BeardLight", "BeardMedium", "MoustacheMagnum"]),
        ("facialHairColor", HAIR),
        ("clotheType", &["BlazerShirt", "BlazerSweater", "CollarSweater", "GraphicShirt", "Hoodie"]),
        ("clotheColor", &["Black", "Blue01", "Gray01", "Heather", "PastelBlue", "PastelGreen", "Red", "White"]),
        ("graphicType", &["Skull"]),
        ("eyeType", &["Default", "Happy", "Wink", "Surprised", "Hearts", "EyeRoll"]),
        ("mouthType", &["Default", "Smile", "Twinkle", "Serious", "Sad", "Concerned"]),
        ("skinColor", &["Tanned", "Yellow", "Pale", "Light", "Brown", "DarkBrown", "Black"]),
    ];

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, values) in options {
        query.append_pair(key, values.choose(rng).copied().unwrap_or_default());
    }
    format!("https://avataaars.io/?{}", query.finish())
}

pub fn birthday_people<R: Rng + ?Sized>(rng: &mut R) -> Vec<BirthdayPerson> {
    [
        ("Maria Silva", "maria.silva@benicio.com.br"),
        ("João Santos", "joao.santos@benicio.com.br"),
        ("Ana Costa", "ana.costa@benicio.com.br"),
        ("Pedro Oliveira", "pedro.oliveira@benicio.com.br"),
    ]
    .into_iter()
    .map(|(name, email)| BirthdayPerson {
        avatar: cartoon_avatar(rng),
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect()
}

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    pub async fn stats(&self, store: &MockStore) -> ApiResult<DashboardStats> {
        let folders = store.folders.read().await;
        let tasks = store.tasks.read().await;
        let clients = store.clients.read().await;
        Ok(stats_at(
            folders.all(),
            tasks.all(),
            clients.all(),
            Utc::now(),
            &mut widget_rng(),
        ))
    }

    pub async fn favorite_folders(&self, store: &MockStore) -> ApiResult<Vec<FavoriteFolderCard>> {
        Ok(favorite_folders(store.folders.read().await.all()))
    }

    pub async fn urgent_tasks(&self, store: &MockStore) -> ApiResult<Vec<UrgentTask>> {
        Ok(urgent_tasks(store.tasks.read().await.all()))
    }

    pub async fn recent_activity(&self, store: &MockStore) -> ApiResult<Vec<Activity>> {
        let folders = store.folders.read().await;
        Ok(recent_activity_at(folders.all(), Utc::now(), &mut widget_rng()))
    }

    pub async fn birthdays(&self, store: &MockStore) -> ApiResult<Vec<ClientBirthday>> {
        Ok(client_birthdays_at(store.clients.read().await.all(), Utc::now()))
    }

    pub async fn favorite_clients(&self, store: &MockStore) -> ApiResult<Vec<FavoriteClient>> {
        Ok(favorite_clients(store.folders.read().await.all()))
    }

    pub async fn active_folders(&self, store: &MockStore) -> ApiResult<ActiveFolders> {
        Ok(active_folders_at(store.folders.read().await.all(), Utc::now()))
    }

    pub async fn area_division(&self, store: &MockStore) -> ApiResult<Vec<AreaSlice>> {
        Ok(area_division(store.folders.read().await.all()))
    }

    pub async fn folder_activity(&self, store: &MockStore) -> ApiResult<Vec<ActivityCounter>> {
        Ok(folder_activity_at(store.folders.read().await.all(), Utc::now()))
    }

    pub fn requests(&self) -> Vec<RequestPoint> {
        requests_at(Utc::now(), &mut widget_rng())
    }

    pub fn hearings(&self) -> Vec<DeadlineCategory> {
        hearings_at(Utc::now())
    }

    pub fn birthday_people(&self) -> Vec<BirthdayPerson> {
        birthday_people(&mut widget_rng())
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
