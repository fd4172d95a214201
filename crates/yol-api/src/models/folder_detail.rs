//! Consultation view of a folder

use serde::{Deserialize, Serialize};

use super::{Folder, FolderStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderParty {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    /// `Autor`, `Réu` or `Terceiro`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderResponsible {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub upload_date: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMovement {
    pub date: String,
    pub description: String,
    pub responsible: String,
}

/// Flattened, display-ready folder used by the consultation screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDetail {
    // Identification
    pub id: String,
    pub client_number: String,
    pub status: String,
    pub date: String,
    pub time: String,

    // Process
    pub process_number: String,
    pub cnj_number: String,
    pub instance: String,
    pub nature: String,
    pub action_type: String,
    pub phase: String,
    pub electronic: String,
    pub client_code: String,
    pub folder: String,
    pub default_billing_case: String,
    pub totus: bool,
    pub migrated: bool,

    // Court
    pub organ: String,
    pub distribution: String,
    pub entry_date: String,
    pub internal_code: String,
    pub search_type: String,
    pub code: String,
    pub judge: String,

    // Location and responsibles
    pub area: String,
    pub sub_area: String,
    pub core: String,
    pub district: String,
    pub court: String,
    pub court_division: String,
    pub partner: String,
    pub coordinator: String,
    pub lawyer: String,

    // Parties
    pub plaintiff: FolderParty,
    pub defendant: FolderParty,

    pub observation: String,
    pub object_detail: String,
    pub last_movement: String,

    // Values
    pub case_value: u64,
    pub conviction_value: u64,
    pub costs: u64,
    pub fees: u64,

    pub distribution_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hearing: Option<String>,

    pub responsible: FolderResponsible,
    pub documents: Vec<FolderDocument>,
    pub movements: Vec<FolderMovement>,
}

/// Portuguese status label used by the consultation screen
pub fn status_label(status: FolderStatus) -> &'static str {
    match status {
        FolderStatus::Active => "Ativo",
        FolderStatus::Pending => "Suspenso",
        FolderStatus::Completed | FolderStatus::Cancelled => "Encerrado",
        FolderStatus::Archived => "Arquivado",
    }
}

impl From<&Folder> for FolderDetail {
    fn from(folder: &Folder) -> Self {
        let created_date = folder.created_at.format("%d/%m/%Y").to_string();
        let created_time = folder.created_at.format("%H:%M").to_string();
        let last_movement = folder.metadata.last_movement.clone().unwrap_or_default();
        let lawyer = &folder.responsible_lawyer;
        let (plaintiff_cpf, plaintiff_cnpj) = if folder.client.is_company() {
            (None, Some(folder.client.document.clone()))
        } else {
            (Some(folder.client.document.clone()), None)
        };

        Self {
            id: folder.id.to_string(),
            client_number: folder.client.id.to_string(),
            status: status_label(folder.status).to_string(),
            date: created_date.clone(),
            time: created_time,

            process_number: folder.case_number.clone().unwrap_or_default(),
            cnj_number: folder.code.clone(),
            instance: "Primeira Instância".to_string(),
            nature: "Cível".to_string(),
            action_type: "Ordinária".to_string(),
            phase: "Conhecimento".to_string(),
            electronic: "Sim".to_string(),
            client_code: folder.client.id.to_string(),
            folder: folder.code.clone(),
            default_billing_case: "Sim".to_string(),
            totus: false,
            migrated: false,

            organ: "TJSP".to_string(),
            distribution: "Sorteio".to_string(),
            entry_date: created_date.clone(),
            internal_code: folder.code.clone(),
            search_type: "Padrão".to_string(),
            code: folder.code.clone(),
            judge: "Dr. João Silva".to_string(),

            area: folder.area.display_name().to_string(),
            sub_area: "Contratos".to_string(),
            core: "Equipe 1".to_string(),
            district: "São Paulo".to_string(),
            court: folder
                .court
                .clone()
                .unwrap_or_else(|| "Foro Central Cível".to_string()),
            court_division: "1ª Vara Cível".to_string(),
            partner: "Dr. João".to_string(),
            coordinator: "Dra. Maria".to_string(),
            lawyer: lawyer.full_name.clone(),

            plaintiff: FolderParty {
                name: folder.client.name.clone(),
                cpf: plaintiff_cpf,
                cnpj: plaintiff_cnpj,
                kind: "Autor".to_string(),
            },
            defendant: FolderParty {
                name: folder
                    .opposing_party
                    .clone()
                    .unwrap_or_else(|| "Empresa XYZ".to_string()),
                cpf: None,
                cnpj: Some("12.345.678/0001-90".to_string()),
                kind: "Réu".to_string(),
            },

            observation: folder.description.clone().unwrap_or_default(),
            object_detail: last_movement.clone(),
            last_movement,

            case_value: folder.value.unwrap_or(0),
            conviction_value: 0,
            costs: 0,
            fees: 0,

            distribution_date: created_date,
            next_hearing: folder.metadata.next_deadline.as_ref().map(super::iso::format),

            responsible: FolderResponsible {
                name: lawyer.full_name.clone(),
                email: lawyer.email.clone(),
                avatar: lawyer.avatar_url.clone(),
                position: Some("Advogado".to_string()),
            },
            documents: Vec::new(),
            movements: Vec::new(),
        }
    }
}
