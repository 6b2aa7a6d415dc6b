// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// O papel do usuário no sistema. Admin ignora as checagens de propriedade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

// Representa um usuário vindo do armazenamento local.
// ATENÇÃO: a senha é guardada e comparada em texto puro — é o modelo da
// aplicação original (lista local de contas, sem autenticação real).
// Nunca logar este campo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    // Địa bàn — o território do cán bộ (ex.: "Quận 1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    // Quyền duyệt hồ sơ — só é consultado quando a política de aprovação
    // restringe quem pode aprovar (ver services::permission).
    #[serde(default)]
    pub can_approve: bool,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// Dados para cadastro de um novo cán bộ (sempre role = staff;
// contas admin são semeadas no bootstrap, nunca criadas por aqui).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStaffPayload {
    #[validate(length(min = 1, message = "O nome completo é obrigatório."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "O nome de usuário é obrigatório."))]
    pub username: String,

    pub phone_number: Option<String>,

    #[validate(length(min = 1, message = "A área (địa bàn) é obrigatória."))]
    pub area: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}
