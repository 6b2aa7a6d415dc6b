// src/services/auth.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock, error::AppError},
    models::auth::{RegisterStaffPayload, Role, User},
    services::lock_service::LockService,
    store::{SessionStore, UserStore},
};

// Conta semeada no bootstrap quando o armazenamento está vazio.
const SEED_ADMIN_USERNAME: &str = "admin";
const SEED_ADMIN_PASSWORD: &str = "admin123";

// O serviço de identidade: autentica credenciais, cadastra cán bộ e
// cuida do marcador de sessão. Sem hashing nem token — a lista local de
// contas com senha em texto puro é o contrato da aplicação original
// (autenticação real está fora de escopo).
#[derive(Clone)]
pub struct AuthService {
    user_store: UserStore,
    session_store: SessionStore,
    lock_service: LockService,
}

impl AuthService {
    pub fn new(user_store: UserStore, session_store: SessionStore, lock_service: LockService) -> Self {
        Self {
            user_store,
            session_store,
            lock_service,
        }
    }

    // Garante a conta admin de bootstrap. Idempotente: roda a cada
    // inicialização e só cria algo quando o conjunto está vazio. Contas
    // admin nunca nascem pelo register_staff.
    pub fn seed_admin(&self) -> Result<(), AppError> {
        if !self.user_store.is_empty() {
            return Ok(());
        }

        self.user_store.insert(User {
            id: Uuid::new_v4(),
            username: SEED_ADMIN_USERNAME.to_owned(),
            password: SEED_ADMIN_PASSWORD.to_owned(),
            full_name: "Quản trị viên".to_owned(),
            role: Role::Admin,
            phone_number: None,
            area: None,
            can_approve: true,
            created_at: clock::now_millis(),
        })?;

        tracing::info!("✅ Conta admin inicial criada");
        Ok(())
    }

    // Comparação literal de strings com o que está gravado; usuário
    // inexistente e senha errada são indistinguíveis para quem tenta.
    // No sucesso, o marcador de sessão é persistido (sobrevive a reload).
    pub fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_store
            .find_by_username(username)
            .ok_or(AppError::InvalidCredentials)?;

        if user.password != password {
            return Err(AppError::InvalidCredentials);
        }

        self.session_store.set(user.clone())?;
        tracing::info!(username = %user.username, "Login efetuado");
        Ok(user)
    }

    pub fn register_staff(&self, payload: RegisterStaffPayload) -> Result<User, AppError> {
        payload.validate()?;

        if self.user_store.find_by_username(&payload.username).is_some() {
            return Err(AppError::UsernameAlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: payload.username,
            password: payload.password,
            full_name: payload.full_name,
            role: Role::Staff,
            phone_number: payload.phone_number,
            area: Some(payload.area),
            can_approve: false,
            created_at: clock::now_millis(),
        };
        self.user_store.insert(user.clone())?;

        tracing::info!(username = %user.username, "Cán bộ cadastrado");
        Ok(user)
    }

    pub fn current_user(&self) -> Option<User> {
        self.session_store.current_user()
    }

    pub fn list_users(&self) -> Vec<User> {
        self.user_store.list()
    }

    pub fn find_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_store.find_by_id(id).ok_or(AppError::UserNotFound)
    }

    // Logout: antes de apagar a sessão, solta o lock do hồ sơ que o
    // usuário estiver visualizando — senão o registro ficaria preso em
    // nome de uma sessão que não existe mais.
    pub fn logout(&self, active_profile: Option<Uuid>) -> Result<(), AppError> {
        if let (Some(profile_id), Some(user)) = (active_profile, self.current_user()) {
            self.lock_service.release(profile_id, &user);
        }
        self.session_store.clear()
    }
}
