// src/config.rs

use std::env;
use std::rc::Rc;

use crate::{
    services::{
        auth::AuthService,
        dashboard_service::DashboardService,
        lock_service::LockService,
        permission::ApprovalPolicy,
        profile_service::{ProfileService, PushFlagPolicy},
        sync_service::{ExternalUploader, SyncService},
    },
    store::{JsonFileBackend, ProfileStore, SessionStore, StorageBackend, UserStore},
};

// O estado da aplicação: as três coleções compartilhadas mais os
// serviços montados sobre elas. Clonar o AppState dá a uma nova sessão
// lógica (outro usuário na mesma "base") visão do MESMO estado — é
// assim que os testes simulam a disputa multiusuário.
#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStore,
    pub profile_store: ProfileStore,
    pub session_store: SessionStore,
    pub auth_service: AuthService,
    pub lock_service: LockService,
    pub profile_service: ProfileService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Monta o estado a partir do ambiente (.env é opcional):
    //   HOSO_DATA_DIR           diretório dos arquivos JSON (padrão ./data)
    //   HOSO_APPROVAL_POLICY    "anyone" (original) | "approvers"
    //   HOSO_PUSH_FLAG_POLICY   "set-once" (padrão) | "overwrite"
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("HOSO_DATA_DIR").unwrap_or_else(|_| "./data".to_owned());
        let approval_policy = parse_approval_policy(env::var("HOSO_APPROVAL_POLICY").ok())?;
        let push_flag_policy = parse_push_flag_policy(env::var("HOSO_PUSH_FLAG_POLICY").ok())?;

        let backend: Rc<dyn StorageBackend> = Rc::new(JsonFileBackend::new(data_dir)?);
        let state = Self::with_backend(backend, approval_policy, push_flag_policy)?;

        tracing::info!("✅ Armazenamento carregado com sucesso!");
        Ok(state)
    }

    // Mesmo grafo de dependências, backend injetado — é o caminho dos
    // testes (dublê em memória) e de qualquer host que queira outro
    // armazenamento chave-valor.
    pub fn with_backend(
        backend: Rc<dyn StorageBackend>,
        approval_policy: ApprovalPolicy,
        push_flag_policy: PushFlagPolicy,
    ) -> anyhow::Result<Self> {
        let user_store = UserStore::load(backend.clone())?;
        let profile_store = ProfileStore::load(backend.clone())?;
        let session_store = SessionStore::load(backend)?;

        // --- Monta o grafo de dependências ---
        let lock_service = LockService::new(profile_store.clone());
        let auth_service = AuthService::new(
            user_store.clone(),
            session_store.clone(),
            lock_service.clone(),
        );
        let profile_service =
            ProfileService::new(profile_store.clone(), approval_policy, push_flag_policy);
        let dashboard_service = DashboardService::new(profile_store.clone(), user_store.clone());

        // Bootstrap: garante a conta admin na primeira execução.
        auth_service.seed_admin()?;

        Ok(Self {
            user_store,
            profile_store,
            session_store,
            auth_service,
            lock_service,
            profile_service,
            dashboard_service,
        })
    }

    // O uploader é um colaborador externo, então entra por injeção em
    // vez de morar no AppState.
    pub fn sync_service(&self, uploader: Rc<dyn ExternalUploader>) -> SyncService {
        SyncService::new(self.profile_store.clone(), uploader)
    }
}

fn parse_approval_policy(raw: Option<String>) -> anyhow::Result<ApprovalPolicy> {
    match raw.as_deref() {
        None | Some("anyone") => Ok(ApprovalPolicy::Anyone),
        Some("approvers") => Ok(ApprovalPolicy::ApproversOnly),
        Some(other) => anyhow::bail!("HOSO_APPROVAL_POLICY inválida: {other}"),
    }
}

fn parse_push_flag_policy(raw: Option<String>) -> anyhow::Result<PushFlagPolicy> {
    match raw.as_deref() {
        None | Some("set-once") => Ok(PushFlagPolicy::SetOnce),
        Some("overwrite") => Ok(PushFlagPolicy::Overwrite),
        Some(other) => anyhow::bail!("HOSO_PUSH_FLAG_POLICY inválida: {other}"),
    }
}
