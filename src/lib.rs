// src/lib.rs
//
// O núcleo do sistema de coleta de hồ sơ: ciclo de vida do hồ sơ,
// protocolo de lock de visualizador único, avaliação de permissões e a
// camada de armazenamento compartilhado que simula a "base de dados"
// multiusuário. A UI interativa fica fora deste crate e chama os
// serviços daqui.

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod models;
pub mod services;
pub mod store;

// Importações principais
pub use common::error::AppError;
pub use config::AppState;
