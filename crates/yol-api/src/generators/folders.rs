//! Folder records

use chrono::{DateTime, Datelike, Utc};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::names;
use crate::models::{Client, Folder, FolderArea, FolderMetadata, FolderStatus, RiskLevel, User};

const COURTS: &[&str] = &[
    "1ª Vara Cível de São Paulo",
    "2ª Vara Cível de São Paulo",
    "3ª Vara do Trabalho de São Paulo",
    "1ª Vara Criminal de São Paulo",
    "Tribunal de Justiça de São Paulo",
    "Tribunal Regional do Trabalho - 2ª Região",
    "Juizado Especial Cível Central",
    "4ª Vara da Fazenda Pública",
    "1ª Vara de Família e Sucessões",
];

const EXTRA_TAGS: &[&str] = &[
    "urgente",
    "prioridade",
    "aguardando",
    "recurso",
    "sentença",
    "acordo",
    "perícia",
    "audiência marcada",
];

/// Typical actions filed in each practice area
fn actions(area: FolderArea) -> &'static [&'static str] {
    match area {
        FolderArea::CivilLitigation => &["Ação de Indenização", "Ação de Cobrança", "Execução de Título"],
        FolderArea::Labor => &["Reclamação Trabalhista", "Ação Trabalhista", "Dissídio Individual"],
        FolderArea::Tax => &["Execução Fiscal", "Mandado de Segurança", "Ação Anulatória"],
        FolderArea::Criminal => &["Ação Penal", "Habeas Corpus", "Defesa Criminal"],
        FolderArea::Administrative => &["Mandado de Segurança", "Ação Popular", "Impugnação"],
        FolderArea::Consumer => &["Ação de Indenização", "Revisional de Contrato", "Ação de Cobrança"],
        FolderArea::Family => &["Divórcio", "Guarda", "Alimentos", "Inventário"],
        FolderArea::Corporate => &["Dissolução de Sociedade", "Recuperação Judicial", "Alteração Contratual"],
        FolderArea::Environmental => &["Ação Civil Pública", "Licenciamento Ambiental", "Compensação Ambiental"],
        FolderArea::IntellectualProperty => &["Registro de Marca", "Ação de Contrafação", "Licenciamento de Patente"],
        FolderArea::RealEstate => &["Ação de Usucapião", "Ação de Despejo", "Registro Imobiliário"],
        FolderArea::International => &["Arbitragem Internacional", "Contrato Internacional", "Homologação de Sentença"],
    }
}

pub fn folder_title<R: Rng + ?Sized>(rng: &mut R, area: FolderArea, client_name: &str) -> String {
    let action = actions(area).choose(rng).copied().unwrap_or("Processo");
    format!("{} - {}", action, client_name)
}

fn tags<R: Rng + ?Sized>(rng: &mut R, area: FolderArea) -> Vec<String> {
    let extra = rng.random_range(0..=3);
    let mut tags = vec![area.display_name().to_string()];
    tags.extend(
        EXTRA_TAGS
            .choose_multiple(rng, extra)
            .map(|tag| tag.to_string()),
    );
    tags
}

/// Folder owned by one of `clients` and led by one of `lawyers`
///
/// `team_pool` supplies the one to four team members. Every pool must be
/// non-empty.
pub fn generate_folder<R: Rng + ?Sized>(
    rng: &mut R,
    id: u64,
    clients: &[Client],
    lawyers: &[User],
    team_pool: &[User],
    now: DateTime<Utc>,
) -> Option<Folder> {
    let area = *FolderArea::ALL.choose(rng)?;
    let status = *FolderStatus::ALL.choose(rng)?;
    let client = clients.choose(rng)?.clone();
    let responsible_lawyer = lawyers.choose(rng)?.clone();

    let team_size = rng.random_range(1..=4).min(team_pool.len());
    let mut team_members: Vec<User> = team_pool.choose_multiple(rng, team_size).cloned().collect();
    team_members.shuffle(rng);

    let created_at = names::past(rng, now, 2 * 365);
    let updated_at = names::between(rng, created_at, now);
    let risk = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    Some(Folder {
        id,
        code: format!("{}/{}", rng.random_range(1000..=9999), now.year()),
        title: folder_title(rng, area, &client.name),
        description: Some(names::paragraph(rng)),
        status,
        area,
        court: Some(names::pick(rng, COURTS).to_string()),
        case_number: Some(names::replace_symbols(rng, "####.##.#.######-#")),
        opposing_party: Some(names::company_name(rng)),
        value: Some(rng.random_range(5_000..=5_000_000)),
        client,
        responsible_lawyer,
        team_members,
        documents_count: rng.random_range(5..=100),
        tasks_count: rng.random_range(0..=20),
        hearings_count: rng.random_range(0..=5),
        is_favorite: rng.random_bool(0.2),
        metadata: FolderMetadata {
            risk_assessment: risk.choose(rng).copied(),
            next_deadline: Some(names::future(rng, now, 365)),
            last_movement: Some(names::sentence(rng)),
            tags: tags(rng, area),
        },
        created_at,
        updated_at,
    })
}
