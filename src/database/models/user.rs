use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

pub const STATUS_ACTIVE: &str = "Ativo";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never sent to clients
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub role: String,
    pub status: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Unknown role strings in the table are treated as the least privileged role
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Operador)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Operador,
    Supervisor,
    Administrador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operador => "Operador",
            Role::Supervisor => "Supervisor",
            Role::Administrador => "Administrador",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Operador
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Operador" => Ok(Role::Operador),
            "Supervisor" => Ok(Role::Supervisor),
            "Administrador" => Ok(Role::Administrador),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// Fields accepted when creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    pub status: Option<String>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> User {
        User {
            id: 7,
            name: "Maria Silva".into(),
            email: "maria@ascel.com".into(),
            password: Some("$2b$04$hash".into()),
            role: "Supervisor".into(),
            status: STATUS_ACTIVE.into(),
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "maria@ascel.com");
    }

    #[test]
    fn role_parsing_falls_back_to_operador() {
        let mut user = sample();
        assert_eq!(user.role(), Role::Supervisor);
        user.role = "Root".into();
        assert_eq!(user.role(), Role::Operador);
    }

    #[test]
    fn new_user_defaults_role() {
        let new_user: NewUser = serde_json::from_value(json!({
            "name": "Paulo",
            "email": "paulo@ascel.com",
            "password": "secret-123"
        }))
        .unwrap();
        assert_eq!(new_user.role, Role::Operador);
        assert!(new_user.status.is_none());
    }

    #[test]
    fn unknown_role_is_rejected_in_payloads() {
        let parsed: Result<UserUpdate, _> = serde_json::from_value(json!({ "role": "Root" }));
        assert!(parsed.is_err());
    }
}
