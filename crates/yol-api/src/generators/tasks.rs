//! Task records

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use super::names;
use crate::models::{
    ChecklistItem, Folder, Task, TaskMetadata, TaskPriority, TaskStatus, User,
};

/// (title, estimated hours)
const TEMPLATES: &[(&str, f32)] = &[
    ("Elaborar petição inicial", 4.0),
    ("Revisar contrato", 2.0),
    ("Preparar defesa", 6.0),
    ("Analisar documentos", 3.0),
    ("Protocolar recurso", 2.0),
    ("Agendar reunião com cliente", 1.0),
    ("Elaborar parecer jurídico", 4.0),
    ("Acompanhar prazo processual", 1.0),
    ("Digitalizar documentos", 2.0),
    ("Preparar apresentação para audiência", 3.0),
    ("Contactar testemunhas", 2.0),
    ("Solicitar certidões", 1.0),
    ("Elaborar contrato de honorários", 1.0),
    ("Revisar cálculos", 2.0),
    ("Preparar quesitos para perícia", 3.0),
];

const CHECKLIST: &[&str] = &[
    "Verificar documentação",
    "Conferir prazos",
    "Validar informações",
    "Revisar texto",
    "Aprovar com supervisor",
    "Protocolar no sistema",
];

const EXTRA_TAGS: &[&str] = &["prazo", "cliente", "tribunal", "interno"];

fn tags<R: Rng + ?Sized>(rng: &mut R, priority: TaskPriority, status: TaskStatus) -> Vec<String> {
    let mut tags = Vec::new();
    if priority.is_pressing() {
        tags.push("importante".to_string());
    }
    if status == TaskStatus::Pending {
        tags.push("pendente".to_string());
    }
    if rng.random_bool(0.3) {
        let extra = rng.random_range(1..=2);
        tags.extend(EXTRA_TAGS.choose_multiple(rng, extra).map(|t| t.to_string()));
    }
    tags
}

/// Actual hours for a finished task: 0.5x to 1.5x the estimate, in half hours
fn actual_hours<R: Rng + ?Sized>(rng: &mut R, estimate: f32) -> f32 {
    let min = (estimate * 0.5 * 2.0).ceil() as u32;
    let max = (estimate * 1.5 * 2.0).floor() as u32;
    rng.random_range(min..=max.max(min)) as f32 / 2.0
}

fn uuid_from<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Task assigned within `users`, attached to one of `folders` 80% of the time
pub fn generate_task<R: Rng + ?Sized>(
    rng: &mut R,
    id: u64,
    folders: &[Folder],
    users: &[User],
    now: DateTime<Utc>,
) -> Option<Task> {
    let (title, estimate) = *TEMPLATES.choose(rng)?;
    let status = *TaskStatus::ALL.choose(rng)?;
    let priority = *TaskPriority::ALL.choose(rng)?;
    let assigned_to = users.choose(rng)?.clone();
    let created_by = users.choose(rng)?.clone();

    let created_at = names::past(rng, now, 365);
    let horizon = names::future(rng, now, 365);
    let due_date = names::between(rng, created_at, horizon);
    let is_completed = status == TaskStatus::Completed;
    let completed_at = is_completed.then(|| names::between(rng, created_at, now));
    let updated_at = names::between(rng, created_at, now);

    let folder = if rng.random_bool(0.8) {
        folders.choose(rng).cloned()
    } else {
        None
    };
    let description = rng.random_bool(0.7).then(|| names::paragraph(rng));

    let checklist_len = rng.random_range(0..=4);
    let checklist = CHECKLIST
        .choose_multiple(rng, checklist_len)
        .copied()
        .collect::<Vec<_>>()
        .into_iter()
        .map(|text| ChecklistItem {
            id: uuid_from(rng).to_string(),
            text: text.to_string(),
            completed: is_completed || rng.random_bool(0.3),
        })
        .collect();

    Some(Task {
        id,
        title: title.to_string(),
        description,
        due_date,
        status,
        priority,
        folder,
        assigned_to,
        created_by,
        completed_at,
        metadata: TaskMetadata {
            estimated_hours: Some(estimate),
            actual_hours: is_completed.then(|| actual_hours(rng, estimate)),
            tags: tags(rng, priority, status),
            checklist,
        },
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_actual_hours_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            let hours = actual_hours(&mut rng, 3.0);
            assert!((1.5..=4.5).contains(&hours));
            assert_eq!((hours * 2.0).fract(), 0.0);
        }
    }

    #[test]
    fn test_completed_tasks_are_stamped() {
        let mut rng = StdRng::seed_from_u64(8);
        let now = Utc::now();
        let people = crate::generators::users::generate_users(&mut rng, 4, now);
        for id in 1..=60 {
            let task = generate_task(&mut rng, id, &[], &people, now).unwrap();
            assert!(task.folder.is_none());
            assert_eq!(task.completed_at.is_some(), task.is_completed());
            assert_eq!(task.metadata.actual_hours.is_some(), task.is_completed());
            if task.is_completed() {
                assert!(task.metadata.checklist.iter().all(|item| item.completed));
            }
            if task.status == TaskStatus::Pending {
                assert!(task.metadata.tags.contains(&"pendente".to_string()));
            }
        }
    }

    #[test]
    fn test_requires_users() {
        let mut rng = StdRng::seed_from_u64(8);
        assert!(generate_task(&mut rng, 1, &[], &[], Utc::now()).is_none());
    }
}
