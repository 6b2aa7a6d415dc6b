// src/store/user_store.rs

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User, store::backend::StorageBackend};

const USERS_KEY: &str = "hoso_users";

// A coleção de contas, responsável por todas as leituras e escritas da
// lista de usuários. Clonar o store compartilha a mesma lista — cada
// sessão lógica enxerga o mesmo estado, como abas sobre o mesmo
// localStorage.
#[derive(Clone)]
pub struct UserStore {
    users: Rc<RefCell<Vec<User>>>,
    backend: Rc<dyn StorageBackend>,
}

impl UserStore {
    // Carrega a coleção persistida (ou começa vazia na primeira execução).
    pub fn load(backend: Rc<dyn StorageBackend>) -> Result<Self, AppError> {
        let users = match backend.read(USERS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self {
            users: Rc::new(RefCell::new(users)),
            backend,
        })
    }

    pub fn list(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.users.borrow().is_empty()
    }

    // Busca exata, sensível a maiúsculas — igual à comparação original.
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .borrow()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.borrow().iter().find(|u| u.id == id).cloned()
    }

    // Anexa a conta e persiste imediatamente o conjunto atualizado.
    pub fn insert(&self, user: User) -> Result<(), AppError> {
        self.users.borrow_mut().push(user);
        self.persist()
    }

    fn persist(&self) -> Result<(), AppError> {
        let serialized = serde_json::to_string(&*self.users.borrow())?;
        self.backend.write(USERS_KEY, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock;
    use crate::models::auth::Role;
    use crate::store::backend::MemoryBackend;

    fn sample_user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            password: "abc123@".to_owned(),
            full_name: "Nguyễn Văn A".to_owned(),
            role: Role::Staff,
            phone_number: None,
            area: Some("Quận 1".to_owned()),
            can_approve: false,
            created_at: clock::now_millis(),
        }
    }

    #[test]
    fn insert_persists_and_survives_reload() {
        let backend: Rc<dyn StorageBackend> = Rc::new(MemoryBackend::new());
        let store = UserStore::load(backend.clone()).unwrap();
        store.insert(sample_user("canbo1")).unwrap();
        store.insert(sample_user("canbo2")).unwrap();

        let reloaded = UserStore::load(backend).unwrap();
        assert_eq!(reloaded.list(), store.list());
        assert!(reloaded.find_by_username("canbo2").is_some());
    }

    #[test]
    fn username_lookup_is_case_sensitive() {
        let store = UserStore::load(Rc::new(MemoryBackend::new())).unwrap();
        store.insert(sample_user("CanBo")).unwrap();

        assert!(store.find_by_username("CanBo").is_some());
        assert!(store.find_by_username("canbo").is_none());
    }
}
