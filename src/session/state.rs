// ============================================================================
// SESSION STATE - quién está conectado
// ============================================================================
// `Authenticated` siempre lleva un usuario: "autenticado sin usuario" no se
// puede representar.
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::UserSummary;
use crate::utils::SESSION_STORAGE_VERSION;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserSummary),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserSummary> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// Forma persistida: `{ "state": { "isAuthenticated", "user" }, "version" }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub state: PersistedState,
    #[serde(default)]
    pub version: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub is_authenticated: bool,
    pub user: Option<UserSummary>,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            state: PersistedState {
                is_authenticated: session.is_authenticated(),
                user: session.user().cloned(),
            },
            version: SESSION_STORAGE_VERSION,
        }
    }
}

impl PersistedSession {
    /// Banderas incoherentes (autenticado sin usuario o al revés) se tratan
    /// como sesión cerrada
    pub fn into_session(self) -> Session {
        match (self.state.is_authenticated, self.state.user) {
            (true, Some(user)) => Session::Authenticated(user),
            (true, None) => {
                log::warn!("⚠️ Sesión persistida autenticada sin usuario, se descarta");
                Session::Anonymous
            }
            (false, Some(_)) => {
                log::warn!("⚠️ Sesión persistida con usuario pero no autenticada, se descarta");
                Session::Anonymous
            }
            (false, None) => Session::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user() -> UserSummary {
        UserSummary {
            id: "1".into(),
            name: "Root".into(),
            email: "root@shop.com".into(),
            role: Role::SuperAdmin,
        }
    }

    #[test]
    fn persisted_shape_matches_storage_contract() {
        let json = serde_json::to_value(PersistedSession::from(&Session::Authenticated(user()))).unwrap();
        assert_eq!(json["state"]["isAuthenticated"], true);
        assert_eq!(json["state"]["user"]["role"], "super-admin");
        assert_eq!(json["version"], 0);
    }

    #[test]
    fn inconsistent_flags_resolve_to_anonymous() {
        let blob = PersistedSession {
            state: PersistedState { is_authenticated: true, user: None },
            version: 0,
        };
        assert_eq!(blob.into_session(), Session::Anonymous);

        let blob = PersistedSession {
            state: PersistedState { is_authenticated: false, user: Some(user()) },
            version: 0,
        };
        assert_eq!(blob.into_session(), Session::Anonymous);
    }
}
