use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for sports table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sport {
    pub name: String,
    pub display_name: String,
}
