use super::error::AuthError;
use super::Claims;

pub const READ_ACTORS: &str = "read:actors";
pub const CREATE_ACTORS: &str = "create:actors";
pub const UPDATE_ACTORS: &str = "update:actors";
pub const DELETE_ACTORS: &str = "delete:actors";

pub const READ_MOVIES: &str = "read:movies";
pub const CREATE_MOVIES: &str = "create:movies";
pub const UPDATE_MOVIES: &str = "update:movies";
pub const DELETE_MOVIES: &str = "delete:movies";

/// Succeeds when `permission` is empty or listed in the token's
/// `permissions` claim.
pub fn check_permission(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    if permission.is_empty() {
        return Ok(());
    }

    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsMissing)?;

    if granted.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(permission.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(permissions: serde_json::Value) -> Claims {
        let mut payload = json!({
            "iss": "https://casting.example.com/",
            "aud": "casting-info",
            "exp": 9999999999i64,
        });
        if !permissions.is_null() {
            payload["permissions"] = permissions;
        }
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn grants_listed_permission() {
        let claims = claims(json!([READ_ACTORS, READ_MOVIES]));
        assert!(check_permission(READ_ACTORS, &claims).is_ok());
        assert!(check_permission(READ_MOVIES, &claims).is_ok());
    }

    #[test]
    fn denies_unlisted_permission() {
        let claims = claims(json!([READ_ACTORS]));
        assert!(matches!(
            check_permission(DELETE_ACTORS, &claims),
            Err(AuthError::PermissionDenied(p)) if p == DELETE_ACTORS
        ));
    }

    #[test]
    fn missing_permissions_claim() {
        let claims = claims(serde_json::Value::Null);
        assert!(matches!(
            check_permission(READ_ACTORS, &claims),
            Err(AuthError::PermissionsMissing)
        ));
    }

    #[test]
    fn empty_requirement_always_passes() {
        assert!(check_permission("", &claims(serde_json::Value::Null)).is_ok());
        assert!(check_permission("", &claims(json!([]))).is_ok());
    }
}
