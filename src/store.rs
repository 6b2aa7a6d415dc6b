pub mod backend;
pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub mod user_store;
pub use user_store::UserStore;
pub mod profile_store;
pub use profile_store::ProfileStore;
pub mod session_store;
pub use session_store::SessionStore;
