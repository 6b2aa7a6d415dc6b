// src/services/profile_service.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock, error::AppError},
    models::{
        auth::User,
        profile::{CreateProfilePayload, DocumentDraft, DocumentItem, Profile, ProfileStatus},
    },
    services::permission::{self, ApprovalPolicy},
    store::ProfileStore,
};

// O que fazer com o sinalizador "đã đẩy" quando alguém chama approve de
// novo num hồ sơ já aprovado. A aplicação original era ambígua nesse
// ponto; aqui é escolha de configuração.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushFlagPolicy {
    // O valor da primeira aprovação é definitivo.
    #[default]
    SetOnce,
    // Re-aprovações podem reescrever o sinalizador.
    Overwrite,
}

// Resultado da criação: o hồ sơ mais o aviso de telefone repetido, que
// o chamador exibe sem bloquear nada.
#[derive(Debug, Clone)]
pub struct CreatedProfile {
    pub profile: Profile,
    pub duplicate_phone: bool,
}

// O controlador de ciclo de vida: Collecting -> Completed -> aprovado.
// Toda mutação de hồ sơ passa por aqui antes de voltar ao store.
//
// As checagens de permissão de edição/remoção são responsabilidade do
// chamador (via services::permission) — este serviço garante apenas as
// regras de estado: hồ sơ aprovado é terminal e congelado.
#[derive(Clone)]
pub struct ProfileService {
    profile_store: ProfileStore,
    approval_policy: ApprovalPolicy,
    push_flag_policy: PushFlagPolicy,
}

impl ProfileService {
    pub fn new(
        profile_store: ProfileStore,
        approval_policy: ApprovalPolicy,
        push_flag_policy: PushFlagPolicy,
    ) -> Self {
        Self {
            profile_store,
            approval_policy,
            push_flag_policy,
        }
    }

    pub fn list(&self) -> Vec<Profile> {
        self.profile_store.list()
    }

    pub fn get(&self, profile_id: Uuid) -> Result<Profile, AppError> {
        self.profile_store
            .get(profile_id)
            .ok_or(AppError::ProfileNotFound)
    }

    // Telefone repetido é permitido (uma pessoa pode ter mais de um
    // hồ sơ), mas o chamador quer avisar antes de prosseguir.
    pub fn phone_already_registered(&self, phone: &str) -> bool {
        let phone = phone.trim();
        self.profile_store
            .list()
            .iter()
            .any(|p| p.phone_number.trim() == phone)
    }

    pub fn create_profile(
        &self,
        payload: CreateProfilePayload,
        collector: &User,
    ) -> Result<CreatedProfile, AppError> {
        payload.validate()?;

        let duplicate_phone = self.phone_already_registered(&payload.phone_number);
        if duplicate_phone {
            tracing::warn!(
                phone = %payload.phone_number.trim(),
                "Telefone já possui hồ sơ; criando mesmo assim"
            );
        }

        let profile = Profile::new(
            payload.phone_number.trim().to_owned(),
            payload.cccd_front,
            payload.cccd_back,
            collector,
        );
        let profile = self.profile_store.insert_front(profile)?;

        tracing::info!(profile_id = %profile.id, collector = %collector.full_name, "Hồ sơ criado");
        Ok(CreatedProfile {
            profile,
            duplicate_phone,
        })
    }

    // Anexa um giấy tờ novo ao fim da lista. Falha se o hồ sơ já foi
    // aprovado; quem pode chamar é decisão do chamador.
    pub fn add_document(&self, profile_id: Uuid, draft: DocumentDraft) -> Result<Profile, AppError> {
        draft.validate()?;

        self.profile_store.update_with(profile_id, |p| {
            if p.is_approved {
                return Err(AppError::AlreadyApproved);
            }

            p.documents.push(DocumentItem {
                id: Uuid::new_v4(),
                doc_type: draft.doc_type,
                type_name: draft.doc_type.display_name().to_owned(),
                image_front: draft.image_front,
                image_back: draft.image_back,
                created_at: clock::now_millis(),
            });
            p.updated_at = clock::now_millis();
            Ok(p.clone())
        })
    }

    pub fn remove_document(&self, profile_id: Uuid, doc_id: Uuid) -> Result<Profile, AppError> {
        self.profile_store.update_with(profile_id, |p| {
            if p.is_approved {
                return Err(AppError::AlreadyApproved);
            }

            let index = p
                .documents
                .iter()
                .position(|d| d.id == doc_id)
                .ok_or(AppError::DocumentNotFound)?;

            p.documents.remove(index);
            p.updated_at = clock::now_millis();
            Ok(p.clone())
        })
    }

    // Fecha a coleta. Reentrante: completar o que já está completo (ou
    // aprovado) não muda nada — nem o updated_at.
    pub fn complete(&self, profile_id: Uuid) -> Result<Profile, AppError> {
        self.profile_store.update_with(profile_id, |p| {
            if p.status != ProfileStatus::Completed {
                p.status = ProfileStatus::Completed;
                p.updated_at = clock::now_millis();
            }
            Ok(p.clone())
        })
    }

    // Aprovação: o carimbo terminal e irreversível. Força Completed como
    // efeito colateral e fixa approvedAt na PRIMEIRA chamada; chamadas
    // seguintes não mexem no approvedAt e só tocam no sinalizador de
    // push se a política for Overwrite. Não existe "desaprovar".
    pub fn approve(
        &self,
        profile_id: Uuid,
        push_flag: bool,
        approver: &User,
    ) -> Result<Profile, AppError> {
        if !permission::can_approve(approver, self.approval_policy) {
            return Err(AppError::PermissionDenied);
        }

        let push_flag_policy = self.push_flag_policy;
        let profile = self.profile_store.update_with(profile_id, move |p| {
            if p.is_approved {
                if push_flag_policy == PushFlagPolicy::Overwrite {
                    p.is_pushed_to_external = push_flag;
                }
                return Ok(p.clone());
            }

            p.is_approved = true;
            p.is_pushed_to_external = push_flag;
            p.approved_at = Some(clock::now_millis());
            p.status = ProfileStatus::Completed;
            Ok(p.clone())
        })?;

        tracing::info!(
            profile_id = %profile.id,
            pushed = profile.is_pushed_to_external,
            approver = %approver.full_name,
            "Hồ sơ aprovado"
        );
        Ok(profile)
    }
}
