// src/common/clock.rs

use chrono::{DateTime, Utc};

// Agora, truncado para milissegundos — a resolução em que os carimbos
// são persistidos (epoch millis, como no armazenamento original). Sem o
// truncamento, o round-trip das coleções perderia os nanossegundos e
// deixaria de ser comparável campo a campo.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
