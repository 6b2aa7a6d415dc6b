// src/store/backend.rs

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::common::error::AppError;

// A interface injetável de persistência: um par get/put síncrono por
// chave, sem transação nativa — exatamente o contrato do localStorage
// que o armazenamento original oferecia. Todas as coleções dependem
// desta trait, nunca de globais, para os testes trocarem por dublês
// em memória.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, AppError>;
    fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

// Backend de produção: um arquivo JSON por chave dentro de um diretório
// de dados. Escrita é criar-ou-truncar; disco cheio vira
// StorageQuotaExceeded para o chamador exibir o aviso.
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::write(self.path_for(key), value).map_err(|e| match e.kind() {
            ErrorKind::StorageFull | ErrorKind::QuotaExceeded => AppError::StorageQuotaExceeded,
            _ => e.into(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// Dublê em memória para os testes. A cota opcional (em bytes por valor
// escrito) permite simular o esgotamento do armazenamento do navegador.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(AppError::StorageQuotaExceeded);
            }
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_roundtrip_and_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();

        assert!(backend.read("hoso_data").unwrap().is_none());

        backend.write("hoso_data", "[]").unwrap();
        assert_eq!(backend.read("hoso_data").unwrap().as_deref(), Some("[]"));

        backend.remove("hoso_data").unwrap();
        assert!(backend.read("hoso_data").unwrap().is_none());
        // Remover de novo continua sendo no-op.
        backend.remove("hoso_data").unwrap();
    }

    #[test]
    fn memory_backend_quota_is_enforced() {
        let backend = MemoryBackend::with_quota(4);
        backend.write("k", "ok").unwrap();

        let err = backend.write("k", "grande demais").unwrap_err();
        assert!(matches!(err, AppError::StorageQuotaExceeded));

        // O valor anterior permanece intacto.
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("ok"));
    }
}
