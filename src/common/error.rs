// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Nenhuma variante é fatal: toda operação que falha é reportada ao
// usuário que agiu e a UI volta a um estado seguro (a lista).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    // Conflito de lock: o hồ sơ já está aberto por outra pessoa.
    // Carrega o nome de exibição do titular para a mensagem ao usuário.
    #[error("Hồ sơ em uso por {viewed_by_name}")]
    ProfileLocked { viewed_by_name: String },

    #[error("Sem permissão para esta ação")]
    PermissionDenied,

    // Hồ sơ aprovado é terminal: nenhuma mutação de giấy tờ passa.
    #[error("Hồ sơ já aprovado")]
    AlreadyApproved,

    // Id obsoleto — o hồ sơ sumiu do armazenamento por trás da sessão.
    #[error("Hồ sơ não encontrado")]
    ProfileNotFound,

    #[error("Giấy tờ não encontrado")]
    DocumentNotFound,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // A escrita no armazenamento falhou por falta de espaço. A operação
    // NÃO sofre rollback: o estado em memória e o persistido podem
    // divergir (lacuna documentada, herdada do modelo localStorage).
    #[error("Armazenamento cheio — os dados em memória não foram persistidos")]
    StorageQuotaExceeded,

    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Erro de serialização")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}
