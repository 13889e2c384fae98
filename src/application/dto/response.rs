//! Response DTOs
//!
//! Data structures for API response bodies. Entities without secrets are
//! returned as they are; these types cover the rest.

use serde::Serialize;

use crate::domain::{Role, Tourist};
use crate::infrastructure::simulation::ServerLink;

/// Tourist response (never carries the password hash)
#[derive(Debug, Serialize)]
pub struct TouristResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub active: bool,
    pub registered_at: String,
}

impl From<Tourist> for TouristResponse {
    fn from(tourist: Tourist) -> Self {
        Self {
            id: tourist.id,
            full_name: tourist.full_name(),
            username: tourist.username,
            email: tourist.email,
            phone: tourist.phone,
            active: tourist.active,
            registered_at: tourist.registered_at.to_rfc3339(),
        }
    }
}

/// Roles currently held by an account
#[derive(Debug, Serialize)]
pub struct AccountRolesResponse {
    pub username: String,
    pub roles: Vec<Role>,
}

/// State of one simulated server link
#[derive(Debug, Serialize)]
pub struct ServerStatusResponse {
    pub server: &'static str,
    pub connected: bool,
}

impl From<&ServerLink> for ServerStatusResponse {
    fn from(link: &ServerLink) -> Self {
        Self {
            server: link.name(),
            connected: link.is_connected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_tourist_response_hides_hash() {
        let tourist = Tourist {
            id: 3,
            username: "mario_rossi".into(),
            email: "mario@example.com".into(),
            first_name: "Mario".into(),
            last_name: "Rossi".into(),
            phone: None,
            password_hash: "$argon2id$secret".into(),
            active: true,
            registered_at: Utc::now(),
        };
        let json = serde_json::to_value(TouristResponse::from(tourist)).unwrap();
        assert_eq!(json["full_name"], "Mario Rossi");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("phone").is_none());
    }
}
