// src/models/profile.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::clock;
use crate::models::auth::User;

// Os tipos de giấy tờ que um hồ sơ pode conter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    License,
    Registration,
    Insurance,
    Other,
}

impl DocumentType {
    // Rótulo de exibição, em vietnamita como na aplicação original.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::License => "Giấy phép lái xe",
            DocumentType::Registration => "Đăng ký xe (Cà vẹt)",
            DocumentType::Insurance => "Bảo hiểm xe",
            DocumentType::Other => "Giấy tờ khác",
        }
    }
}

// Um giấy tờ escaneado. Imutável depois de anexado ao hồ sơ:
// só pode ser removido por inteiro, nunca editado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub doc_type: DocumentType,

    pub type_name: String,

    // Imagens codificadas como texto opaco (base64 vindo do coletor de
    // imagens). O núcleo nunca inspeciona o conteúdo.
    pub image_front: String,
    pub image_back: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

// Rascunho de um giấy tờ antes de entrar na lista. As duas faces são
// obrigatórias (mesma regra da tela de coleta).
#[derive(Debug, Validate)]
pub struct DocumentDraft {
    pub doc_type: DocumentType,

    #[validate(length(min = 1, message = "A frente do giấy tờ é obrigatória."))]
    pub image_front: String,

    #[validate(length(min = 1, message = "O verso do giấy tờ é obrigatório."))]
    pub image_back: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Collecting,
    Completed,
}

// O hồ sơ de um cidadão: CCCD + lista de giấy tờ coletados.
//
// Invariantes que o resto do núcleo sustenta:
// - viewed_by identifica no máximo UM usuário por vez (lock de visualização);
// - is_approved é monotônico (false -> true, nunca volta);
// - is_approved implica status == Completed e approved_at preenchido;
// - collector_id é gravado na criação e nunca reatribuído;
// - hồ sơ aprovado não aceita mais adição/remoção de giấy tờ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub phone_number: String,

    // As duas faces do CCCD, exigidas na criação e imutáveis depois.
    pub cccd_front: String,
    pub cccd_back: String,

    // Ordem de inserção preservada; ids únicos dentro do hồ sơ.
    pub documents: Vec<DocumentItem>,

    pub status: ProfileStatus,

    pub collector_id: Uuid,
    pub collector_name: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub is_approved: bool,

    // Marca que o hồ sơ aprovado também foi enviado ao sistema externo.
    // Rastreada só localmente; o sucesso do upload não é pré-condição.
    #[serde(default)]
    pub is_pushed_to_external: bool,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub approved_at: Option<DateTime<Utc>>,

    // --- Campos transientes de lock ---
    // Presentes somente enquanto alguém está com o hồ sơ aberto.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_by: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_by_name: Option<String>,
}

impl Profile {
    pub fn new(phone_number: String, cccd_front: String, cccd_back: String, collector: &User) -> Self {
        let now = clock::now_millis();
        Self {
            id: Uuid::new_v4(),
            phone_number,
            cccd_front,
            cccd_back,
            documents: Vec::new(),
            status: ProfileStatus::Collecting,
            collector_id: collector.id,
            collector_name: collector.full_name.clone(),
            created_at: now,
            updated_at: now,
            is_approved: false,
            is_pushed_to_external: false,
            approved_at: None,
            viewed_by: None,
            viewed_by_name: None,
        }
    }
}

// Dados para criar um hồ sơ novo.
#[derive(Debug, Validate)]
pub struct CreateProfilePayload {
    #[validate(length(min = 1, message = "O número de telefone é obrigatório."))]
    pub phone_number: String,

    #[validate(length(min = 1, message = "A frente do CCCD é obrigatória."))]
    pub cccd_front: String,

    #[validate(length(min = 1, message = "O verso do CCCD é obrigatório."))]
    pub cccd_back: String,
}
