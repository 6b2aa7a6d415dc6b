// src/store/session_store.rs

use std::cell::RefCell;
use std::rc::Rc;

use crate::{common::error::AppError, models::auth::User, store::backend::StorageBackend};

const SESSION_KEY: &str = "hoso_current_user";

// O marcador de sessão: o usuário autenticado, persistido à parte das
// coleções para sobreviver a um reload. Limpo no logout.
#[derive(Clone)]
pub struct SessionStore {
    current: Rc<RefCell<Option<User>>>,
    backend: Rc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn load(backend: Rc<dyn StorageBackend>) -> Result<Self, AppError> {
        let current = match backend.read(SESSION_KEY)? {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };
        Ok(Self {
            current: Rc::new(RefCell::new(current)),
            backend,
        })
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn set(&self, user: User) -> Result<(), AppError> {
        let serialized = serde_json::to_string(&user)?;
        self.backend.write(SESSION_KEY, &serialized)?;
        *self.current.borrow_mut() = Some(user);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.backend.remove(SESSION_KEY)?;
        *self.current.borrow_mut() = None;
        Ok(())
    }
}
