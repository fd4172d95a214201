//! Task service

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::count_where;
use super::merge::{build_record, merge_record, timestamp};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    PaginatedResponse, PriorityCount, Task, TaskDashboard, TaskPriority, TaskStatus,
};
use crate::query::{
    apply_filters, apply_sorting, contains_ci, paginate, parse_id, parse_instant, FilterSet,
    ListParams,
};
use crate::store::MockStore;

const RESOURCE: &str = "Task";
const DEFAULT_SORT: &str = "due_date";

/// Predicates behind `GET /tasks` query filters
pub fn task_filters() -> FilterSet<Task> {
    FilterSet::<Task>::new()
        .with("search", |task, value| {
            contains_ci(&task.title, value)
                || task
                    .description
                    .as_deref()
                    .is_some_and(|description| contains_ci(description, value))
        })
        .with("status", |task, value| task.status.as_str() == value)
        .with("priority", |task, value| task.priority.as_str() == value)
        .with("assigned_to", |task, value| {
            parse_id(value) == Some(task.assigned_to.id)
        })
        .with("folder_id", |task, value| {
            task.folder
                .as_ref()
                .is_some_and(|folder| parse_id(value) == Some(folder.id))
        })
        .with("due_date_from", |task, value| {
            parse_instant(value).is_some_and(|from| task.due_date >= from)
        })
        .with("due_date_to", |task, value| {
            parse_instant(value).is_some_and(|to| task.due_date <= to)
        })
        .with("overdue", |task, value| {
            value != "true" || task.is_overdue(Utc::now())
        })
}

/// Start of the UTC day containing `now`
pub(crate) fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

pub(crate) fn priority_counts(tasks: &[Task]) -> Vec<PriorityCount> {
    TaskPriority::ALL
        .into_iter()
        .map(|priority| PriorityCount {
            priority,
            count: count_where(tasks, |t| t.priority == priority),
        })
        .collect()
}

/// Task service
pub struct TaskService;

impl TaskService {
    pub fn new() -> Self {
        Self
    }

    /// Filter, sort (by due date unless asked otherwise) and paginate tasks
    pub async fn list(
        &self,
        store: &MockStore,
        params: &ListParams,
        base_url: &str,
    ) -> ApiResult<PaginatedResponse<Task>> {
        let params = params.clone().with_default_sort(DEFAULT_SORT);
        let snapshot = store.tasks.read().await.snapshot();
        let filtered = apply_filters(snapshot, &params.filters, &task_filters());
        let sorted = apply_sorting(filtered, params.sort_by.as_deref(), params.order);
        debug!(matched = sorted.len(), page = params.page, "Listed tasks");
        Ok(paginate(sorted, params.page, params.per_page, base_url))
    }

    pub async fn get(&self, store: &MockStore, id: u64) -> ApiResult<Task> {
        store
            .tasks
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(RESOURCE))
    }

    /// New tasks always start out pending
    pub async fn create(&self, store: &MockStore, body: Value) -> ApiResult<Task> {
        let now = Utc::now();
        let mut tasks = store.tasks.write().await;

        let mut synthesized = Map::new();
        synthesized.insert("id".into(), json!(tasks.next_id()));
        synthesized.insert("status".into(), json!(TaskStatus::Pending));
        synthesized.insert("created_at".into(), timestamp(now));
        synthesized.insert("updated_at".into(), timestamp(now));

        let task: Task = build_record(body, synthesized)?;
        tasks.insert(task.clone());
        debug!(task_id = task.id, "Created task");
        Ok(task)
    }

    /// Shallow merge; moving to `completed` stamps `completed_at` once
    pub async fn update(&self, store: &MockStore, id: u64, body: Value) -> ApiResult<Task> {
        let now = Utc::now();
        let mut tasks = store.tasks.write().await;
        let current = tasks.find(id).ok_or_else(|| ApiError::not_found(RESOURCE))?;

        let mut body = body;
        let completes = body.get("status").and_then(Value::as_str) == Some(TaskStatus::Completed.as_str());
        if completes && current.completed_at.is_none() {
            if let Some(map) = body.as_object_mut() {
                map.insert("completed_at".into(), timestamp(now));
            }
        }

        let updated: Task = merge_record(current, body, id, now)?;
        tasks.replace(updated.clone());
        debug!(task_id = id, status = %updated.status, "Updated task");
        Ok(updated)
    }

    pub async fn complete(&self, store: &MockStore, id: u64) -> ApiResult<Task> {
        let now = Utc::now();
        let mut tasks = store.tasks.write().await;
        let task = tasks
            .find_mut(id)
            .ok_or_else(|| ApiError::not_found(RESOURCE))?;
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
        task.updated_at = now;
        debug!(task_id = id, "Completed task");
        Ok(task.clone())
    }

    pub async fn delete(&self, store: &MockStore, id: u64) -> ApiResult<()> {
        if store.tasks.write().await.remove(id).is_none() {
            return Err(ApiError::not_found(RESOURCE));
        }
        debug!(task_id = id, "Deleted task");
        Ok(())
    }

    pub async fn dashboard(&self, store: &MockStore) -> ApiResult<TaskDashboard> {
        let tasks = store.tasks.read().await;
        Ok(task_dashboard(tasks.all(), Utc::now()))
    }
}

impl Default for TaskService {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn task_dashboard(tasks: &[Task], now: DateTime<Utc>) -> TaskDashboard {
    let today = start_of_day(now);
    let tomorrow = today + Duration::days(1);

    TaskDashboard {
        total: tasks.len() as u64,
        pending: count_where(tasks, |t| t.status == TaskStatus::Pending),
        in_progress: count_where(tasks, |t| t.status == TaskStatus::InProgress),
        completed: count_where(tasks, Task::is_completed),
        completed_today: count_where(tasks, |t| {
            t.is_completed() && t.completed_at.is_some_and(|at| at >= today)
        }),
        overdue: count_where(tasks, |t| t.is_overdue(now)),
        due_today: count_where(tasks, |t| {
            !t.is_completed() && t.due_date >= today && t.due_date < tomorrow
        }),
        by_priority: priority_counts(tasks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;

    fn store() -> MockStore {
        MockStore::generate(&MockConfig {
            folders: 10,
            tasks: 40,
            users: 6,
            clients: 5,
            seed: Some(3),
            ..MockConfig::default()
        })
    }

    #[tokio::test]
    async fn test_list_defaults_to_due_date() {
        let store = store();
        let params = ListParams::from_query(Some("per_page=40"));
        let page = TaskService::new().list(&store, &params, "/api/tasks").await.unwrap();
        assert_eq!(page.data.len(), 40);
        assert!(page.data.windows(2).all(|w| w[0].due_date <= w[1].due_date));
    }

    #[tokio::test]
    async fn test_overdue_filter() {
        let store = store();
        let params = ListParams::from_query(Some("overdue=true&per_page=100"));
        let page = TaskService::new().list(&store, &params, "/api/tasks").await.unwrap();
        let now = Utc::now();
        assert!(page.data.iter().all(|t| t.is_overdue(now)));

        let params = ListParams::from_query(Some("overdue=false&per_page=100"));
        let page = TaskService::new().list(&store, &params, "/api/tasks").await.unwrap();
        assert_eq!(page.meta.total, 40);
    }

    #[tokio::test]
    async fn test_create_forces_pending() {
        let store = store();
        let service = TaskService::new();
        let template = service.get(&store, 1).await.unwrap();
        let created = service
            .create(
                &store,
                json!({
                    "title": "Protocolar petição",
                    "due_date": "2030-01-01T00:00:00.000Z",
                    "status": "completed",
                    "assigned_to": template.assigned_to,
                    "created_by": template.created_by
                }),
            )
            .await
            .unwrap();
        assert_eq!(created.id, 41);
        assert_eq!(created.status, TaskStatus::Pending);
        assert_eq!(created.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn test_update_to_completed_stamps_once() {
        let store = store();
        let service = TaskService::new();
        let open_id = store
            .tasks
            .read()
            .await
            .all()
            .iter()
            .find(|t| t.completed_at.is_none())
            .map(|t| t.id)
            .unwrap();

        let updated = service
            .update(&store, open_id, json!({"status": "completed"}))
            .await
            .unwrap();
        let stamped = updated.completed_at.unwrap();

        let again = service
            .update(&store, open_id, json!({"status": "completed"}))
            .await
            .unwrap();
        assert_eq!(again.completed_at, Some(stamped));
    }

    #[tokio::test]
    async fn test_complete_and_delete() {
        let store = store();
        let service = TaskService::new();
        let task = service.complete(&store, 5).await.unwrap();
        assert!(task.is_completed());
        assert!(task.completed_at.is_some());
        service.delete(&store, 5).await.unwrap();
        assert!(matches!(
            service.complete(&store, 5).await,
            Err(ApiError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let store = store();
        let dashboard = TaskService::new().dashboard(&store).await.unwrap();
        assert_eq!(dashboard.total, 40);
        assert!(dashboard.pending + dashboard.in_progress + dashboard.completed <= dashboard.total);
        assert!(dashboard.due_today <= dashboard.total - dashboard.completed);
        assert_eq!(dashboard.by_priority.iter().map(|p| p.count).sum::<u64>(), 40);
    }
}
