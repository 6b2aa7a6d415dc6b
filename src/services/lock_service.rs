// src/services/lock_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::User, profile::Profile},
    services::permission,
    store::ProfileStore,
};

// Em que modo a sessão pediu o hồ sơ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    View,
    Edit,
}

// O que uma sessão recebe ao abrir um hồ sơ com sucesso.
#[derive(Debug, Clone)]
pub struct OpenedProfile {
    pub profile: Profile,
    pub read_only: bool,
}

// O gerente de locks: decide quem pode abrir um hồ sơ e carimba/limpa o
// marcador "sendo visto por" no registro. Um lock por hồ sơ, no máximo
// um titular por vez.
//
// Limitação conhecida e aceita: não há timeout nem heartbeat. Um cliente
// que fecha sem navegar de volta deixa o hồ sơ preso até o MESMO usuário
// (ou um operador) liberar explicitamente.
#[derive(Clone)]
pub struct LockService {
    profile_store: ProfileStore,
}

impl LockService {
    pub fn new(profile_store: ProfileStore) -> Self {
        Self { profile_store }
    }

    // Tenta carimbar o lock. O closure roda dentro do ciclo
    // ler-modificar-gravar único do store, então a checagem do
    // viewed_by observado e o carimbo são um compare-and-set: ou o
    // hồ sơ estava livre (ou já era nosso — reentrada idempotente) e o
    // lock é gravado, ou nada é mutado e o conflito sobe com o nome do
    // titular atual.
    pub fn acquire(&self, profile_id: Uuid, user: &User) -> Result<Profile, AppError> {
        self.profile_store.update_with(profile_id, |p| {
            if let Some(holder) = p.viewed_by {
                if holder != user.id {
                    return Err(AppError::ProfileLocked {
                        viewed_by_name: p.viewed_by_name.clone().unwrap_or_default(),
                    });
                }
            }
            p.viewed_by = Some(user.id);
            p.viewed_by_name = Some(user.full_name.clone());
            Ok(p.clone())
        })
    }

    // Libera o lock se — e somente se — este usuário é o titular.
    // Liberar um lock que não é seu é ignorado em silêncio: um cliente
    // com estado velho não pode derrubar o titular mais novo. Hồ sơ que
    // sumiu (id obsoleto) também é ignorado: sair da tela sempre
    // funciona, não importa o que disparou a navegação.
    pub fn release(&self, profile_id: Uuid, user: &User) {
        let result = self.profile_store.update_with(profile_id, |p| {
            if p.viewed_by == Some(user.id) {
                p.viewed_by = None;
                p.viewed_by_name = None;
            }
            Ok(())
        });

        match result {
            Ok(()) | Err(AppError::ProfileNotFound) => {}
            Err(e) => {
                // A navegação não pode falhar por causa da persistência;
                // só registramos a divergência.
                tracing::warn!("Falha ao persistir a liberação do lock: {e}");
            }
        }
    }

    // O fluxo completo de "abrir o hồ sơ P em modo M para o usuário U":
    // adquire o lock e calcula o modo efetivo. Pedir edição sem direito
    // NÃO é erro — rebaixa em silêncio para somente-leitura, mantendo o
    // acesso de visualização (contrato de UX da aplicação original).
    pub fn open(
        &self,
        profile_id: Uuid,
        mode: OpenMode,
        user: &User,
    ) -> Result<OpenedProfile, AppError> {
        let profile = self.acquire(profile_id, user)?;

        let read_only = match mode {
            OpenMode::View => true,
            OpenMode::Edit => {
                if permission::can_edit(user, &profile) {
                    false
                } else {
                    tracing::info!(
                        profile_id = %profile_id,
                        "Sem direito de edição; abrindo em modo somente-leitura"
                    );
                    true
                }
            }
        };

        Ok(OpenedProfile { profile, read_only })
    }
}
