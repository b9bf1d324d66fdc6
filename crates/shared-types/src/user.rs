use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in account, as issued by the hosted auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "authenticated".to_string()
}
