// src/store/profile_store.rs

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::{common::error::AppError, models::profile::Profile, store::backend::StorageBackend};

const PROFILES_KEY: &str = "hoso_data";

// A única fonte de verdade sobre os hồ sơ. Todas as sessões lógicas
// compartilham esta coleção (clonar o store clona o Rc, não os dados);
// como a execução é single-thread e cada operação roda inteira dentro
// de um único borrow, o ciclo ler-modificar-gravar de `update_with` é
// o compare-and-set que serializa o protocolo de lock.
#[derive(Clone)]
pub struct ProfileStore {
    profiles: Rc<RefCell<Vec<Profile>>>,
    backend: Rc<dyn StorageBackend>,
}

impl ProfileStore {
    pub fn load(backend: Rc<dyn StorageBackend>) -> Result<Self, AppError> {
        let profiles = match backend.read(PROFILES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self {
            profiles: Rc::new(RefCell::new(profiles)),
            backend,
        })
    }

    // Ordem de exibição: os mais novos primeiro (ver insert_front).
    pub fn list(&self) -> Vec<Profile> {
        self.profiles.borrow().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Profile> {
        self.profiles.borrow().iter().find(|p| p.id == id).cloned()
    }

    // Hồ sơ novo entra na frente da lista, como na tela original.
    pub fn insert_front(&self, profile: Profile) -> Result<Profile, AppError> {
        self.profiles.borrow_mut().insert(0, profile.clone());
        self.persist()?;
        Ok(profile)
    }

    // O ciclo ler-modificar-gravar único do armazenamento.
    //
    // O closure roda sobre o registro dentro de UM borrow: nenhuma outra
    // operação observa estado intermediário, então checar a pré-condição
    // e mutar dentro dele equivale a um compare-and-set. Persiste apenas
    // se o registro de fato mudou; se o closure retorna Err nada é
    // persistido.
    //
    // ATENÇÃO à lacuna herdada do modelo localStorage: quando a mutação
    // em memória deu certo mas a persistência falhou (cota), o erro sobe
    // como StorageQuotaExceeded SEM rollback — memória e disco divergem.
    pub fn update_with<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Profile) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let changed;
        let result;
        {
            let mut profiles = self.profiles.borrow_mut();
            let profile = profiles
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(AppError::ProfileNotFound)?;

            let before = profile.clone();
            result = f(profile)?;
            changed = *profile != before;
        }

        if changed {
            self.persist()?;
        }
        Ok(result)
    }

    fn persist(&self) -> Result<(), AppError> {
        let serialized = serde_json::to_string(&*self.profiles.borrow())?;
        self.backend.write(PROFILES_KEY, &serialized)
    }
}
