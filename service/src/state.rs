use std::{fs, io, path::Path};

use abi::{Property, Session, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Error;

/// Session and selected property, passed explicitly to whoever needs them.
///
/// Nothing is persisted implicitly: call [`AppState::load`] on startup and
/// [`AppState::save`] after a change worth keeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub auth: AuthState,
    #[serde(default)]
    pub selected_property: Option<Property>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl AppState {
    /// A missing file is a fresh start, not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("load state from {}", path.display());
                Ok(serde_json::from_str(&content)?)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // write then rename so a crash never leaves half a file behind
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        info!("state saved to {}", path.display());
        Ok(())
    }

    pub fn set_auth(&mut self, session: Session) {
        self.auth = AuthState {
            user: Some(session.user),
            token: Some(session.token),
        };
    }

    /// Drops the session. The selected property is kept.
    pub fn logout(&mut self) {
        self.auth = AuthState::default();
    }

    pub fn select_property(&mut self, property: Option<Property>) {
        self.selected_property = property;
    }

    pub fn selected_property_id(&self) -> Option<&str> {
        self.selected_property.as_ref().map(|p| p.id.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.token.as_deref()
    }
}
