use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use dentbook_core::{Session, SessionStore, SessionStoreError, SessionToken, User};
use serde::Deserialize;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

/// The file holds a bearer token; only the owner may read it.
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Session persisted as a JSON document `{ "user": ..., "token": "..." }`.
///
/// Writes go to a sibling temp file, created owner-only, that is then renamed
/// over the target, so a reader sees either the old pair or the new pair.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// On-disk shape. Either entry may be missing in a hand-edited or partially
/// cleared file; that reads as no session.
#[derive(Deserialize)]
struct StoredSession {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    token: Option<String>,
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    #[tracing::instrument(name = "FileSessionStore::get", skip(self))]
    async fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_str(&contents)
            .map_err(|e| SessionStoreError::Corrupted(e.to_string()))?;

        Ok(match (stored.user, stored.token.and_then(SessionToken::parse)) {
            (Some(user), Some(token)) => Some(Session::new(user, token)),
            _ => None,
        })
    }

    #[tracing::instrument(name = "FileSessionStore::set", skip_all)]
    async fn set(&self, session: Session) -> Result<(), SessionStoreError> {
        let contents = serde_json::to_vec_pretty(&session)
            .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        }

        let temp_path = self.temp_path();
        write_private(&temp_path, &contents)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "FileSessionStore::clear", skip(self))]
    async fn clear(&self) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::Io(e.to_string())),
        }
    }
}

/// Write `contents` to a fresh file at `path`. A leftover file from an
/// interrupted write is removed first so its permissions are not inherited.
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(SESSION_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}
