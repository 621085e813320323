use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Roles a signed-in user can hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Leader,
    Member,
}

impl Role {
    pub fn all() -> Vec<Role> {
        vec![Role::Admin, Role::Leader, Role::Member]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Leader => "leader",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller, decoded from a verified session token.
///
/// Lives for a single request; it is never written back anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionPrincipal {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_as_str() {
        for role in Role::all() {
            let value = serde_json::to_value(role).unwrap();
            assert_eq!(value, role.as_str());
            assert_eq!(serde_json::from_value::<Role>(value).unwrap(), role);
        }
        assert!(serde_json::from_value::<Role>(serde_json::json!("pastor")).is_err());
    }

    #[test]
    fn test_principal_serializes_camel_case() {
        let principal = SessionPrincipal {
            user_id: "u-1".to_string(),
            email: "leader@example.org".to_string(),
            role: Role::Leader,
        };
        let value = serde_json::to_value(&principal).unwrap();
        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["role"], "leader");
    }
}
