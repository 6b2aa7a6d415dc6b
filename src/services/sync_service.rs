// src/services/sync_service.rs

use std::rc::Rc;

use uuid::Uuid;

use crate::{common::error::AppError, models::profile::Profile, store::ProfileStore};

// O que o colaborador externo devolve depois de receber o hồ sơ.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub success: bool,
    pub message: Option<String>,
}

// O contrato do envio externo (na aplicação original, o Google Drive).
// Recebe o hồ sơ completo; o núcleo não sabe nem quer saber o que
// acontece do outro lado.
pub trait ExternalUploader {
    fn upload(&self, profile: &Profile) -> UploadOutcome;
}

// Encaminha um hồ sơ ao sistema externo e repassa o resultado. Falha de
// upload é reportada ao usuário e MAIS NADA: nenhum estado local é
// desfeito, e o sinalizador is_pushed_to_external (gravado na
// aprovação) não depende do sucesso daqui.
#[derive(Clone)]
pub struct SyncService {
    profile_store: ProfileStore,
    uploader: Rc<dyn ExternalUploader>,
}

impl SyncService {
    pub fn new(profile_store: ProfileStore, uploader: Rc<dyn ExternalUploader>) -> Self {
        Self {
            profile_store,
            uploader,
        }
    }

    pub fn upload_profile(&self, profile_id: Uuid) -> Result<UploadOutcome, AppError> {
        let profile = self
            .profile_store
            .get(profile_id)
            .ok_or(AppError::ProfileNotFound)?;

        let outcome = self.uploader.upload(&profile);
        if outcome.success {
            tracing::info!(profile_id = %profile_id, "Hồ sơ enviado ao sistema externo");
        } else {
            tracing::warn!(
                profile_id = %profile_id,
                message = outcome.message.as_deref().unwrap_or("sem detalhe"),
                "Falha no envio externo"
            );
        }
        Ok(outcome)
    }
}
