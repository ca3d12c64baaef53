//! Signed-in user and tokens, plus where they are kept between runs.

use std::{fs, path::PathBuf, sync::Mutex};

use serde::{Deserialize, Serialize};
use tradeledger_core::{errors::Error, users::User, Result};

const CURRENT_VERSION: u32 = 1;

/// Credentials of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Persistence for the current [`Session`].
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Session>;

    fn save(&self, session: &Session) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Keeps the session for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        let guard = self
            .session
            .lock()
            .map_err(|_| Error::Session("Session lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| Error::Session("Session lock poisoned".into()))?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&Session::default())
    }
}

/// Keeps the session in a versioned JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    session: Session,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load_locked(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let raw = fs::read(&self.path)?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Session::default());
        }

        let file: SessionFile = serde_json::from_slice(&raw)
            .map_err(|e| Error::Session(format!("Failed to read session file: {e}")))?;
        if file.version > CURRENT_VERSION {
            return Err(Error::Session(format!(
                "Session file version {} is newer than supported version {}",
                file.version, CURRENT_VERSION
            )));
        }
        Ok(file.session)
    }

    fn persist_locked(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = SessionFile {
            version: CURRENT_VERSION,
            session: session.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::Session(format!("Failed to encode session: {e}")))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Session("Session store lock poisoned".into()))?;
        self.load_locked()
    }

    fn save(&self, session: &Session) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Session("Session store lock poisoned".into()))?;
        self.persist_locked(session)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Session("Session store lock poisoned".into()))?;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
