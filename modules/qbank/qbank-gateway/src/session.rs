use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

/// The bearer credential of the signed-in session.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    value: String,
}

impl BearerToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The raw token, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

/// Intentionally does not display the token.
impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}

/// Errors from persisting the credential.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable storage for the session credential.
pub trait CredentialStore: Send + Sync {
    /// The stored credential, if any.
    fn load(&self) -> Option<BearerToken>;

    /// Replace the stored credential.
    ///
    /// # Errors
    /// Returns `CredentialError::Storage` if the credential cannot be persisted.
    fn save(&self, token: &BearerToken) -> Result<(), CredentialError>;

    /// Forget the stored credential.
    ///
    /// # Errors
    /// Returns `CredentialError::Storage` if the persisted copy cannot be removed.
    fn clear(&self) -> Result<(), CredentialError>;
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<BearerToken>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<BearerToken> {
        self.token.read().clone()
    }

    fn save(&self, token: &BearerToken) -> Result<(), CredentialError> {
        *self.token.write() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.token.write() = None;
        Ok(())
    }
}

/// Store backed by a single file holding the raw token.
///
/// The file is read once on open and kept in memory; writes go to both.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    cached: RwLock<Option<BearerToken>>,
}

impl FileCredentialStore {
    /// Open the store, picking up a token left by a previous run.
    ///
    /// # Errors
    /// Returns `CredentialError::Storage` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CredentialError> {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => {
                let raw = raw.trim();
                (!raw.is_empty()).then(|| BearerToken::new(raw))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(CredentialError::Storage { path, source }),
        };
        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<BearerToken> {
        self.cached.read().clone()
    }

    fn save(&self, token: &BearerToken) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }
        write_private(&self.path, token.expose()).map_err(|e| self.storage_error(e))?;
        *self.cached.write() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.cached.write() = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_error(err)),
        }
    }
}

/// Write `contents` readable by the owner only.
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // the open mode only applies to new files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}

/// Session context handed to the gateway.
///
/// The credential is read at call time, so a login or logout is picked up by
/// the very next request.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// A session that lives only in memory, starting signed out.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    #[must_use]
    pub fn credential(&self) -> Option<BearerToken> {
        self.store.load()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.load().is_some()
    }

    /// Store a new credential.
    ///
    /// # Errors
    /// Propagates the store's `CredentialError`.
    pub fn set_credential(&self, token: BearerToken) -> Result<(), CredentialError> {
        self.store.save(&token)?;
        info!("session credential stored");
        Ok(())
    }

    /// Drop the credential.
    ///
    /// # Errors
    /// Propagates the store's `CredentialError`.
    pub fn clear_credential(&self) -> Result<(), CredentialError> {
        self.store.clear()?;
        info!("session credential cleared");
        Ok(())
    }

    /// Clear the credential, logging instead of failing.
    pub(crate) fn expire(&self) {
        if let Err(err) = self.clear_credential() {
            warn!(error = %err, "failed to clear expired credential");
        }
    }
}
