use crate::error::ReaderError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{info, warn};

pub const USAGE_GUIDE_NAME: &str = "Usage Guidelines.txt";

const USAGE_GUIDE: &str = "\
Welcome to EZ-Read

A lightweight reader for plain TXT files.

Basic usage
  + Import TXT files with the plus button.
  + Tap a file to start reading.
  + Tap the trash icon to delete a file.

Reading tools
  Tap the center of the screen to show the tools.
  Aa changes the font size (A- / A+) and the background color.

Settings
  Protect the app with a startup password.
  Lock the app on exit (needs the startup password).
  Keep the screen on while reading.

Your reading settings and the page you reached in every file are saved
automatically, so you resume where you left off.
";

/// Folder of imported `.txt` files.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
    usage_guide: bool,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            usage_guide: true,
        }
    }

    pub fn with_usage_guide(mut self, enabled: bool) -> Self {
        self.usage_guide = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the folder, and on first run the usage guide.
    pub async fn ensure_ready(&self) -> Result<(), ReaderError> {
        fs::create_dir_all(&self.root).await?;
        if !self.usage_guide {
            return Ok(());
        }
        let guide = self.root.join(USAGE_GUIDE_NAME);
        if !fs::try_exists(&guide).await? {
            fs::write(&guide, USAGE_GUIDE).await?;
            info!(path = %guide.display(), "usage guide written");
        }
        Ok(())
    }

    /// Names of the `.txt` files in the library, sorted.
    pub async fn list_files(&self) -> Result<Vec<String>, ReaderError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_txt_file(&path) {
                continue;
            }
            match entry.file_type().await {
                Ok(ft) if ft.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to stat library entry");
                    continue;
                }
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Resolve a bare file name inside the library.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, ReaderError> {
        validate_file_name(name)?;
        Ok(self.root.join(name))
    }

    pub async fn file_exists(&self, name: &str) -> Result<bool, ReaderError> {
        let path = self.path_of(name)?;
        Ok(fs::try_exists(&path).await?)
    }

    /// Copy `source` into the library as `suggested_name`.
    ///
    /// Refuses to overwrite an existing file. A failed copy leaves no partial
    /// file behind.
    pub async fn import_file<R>(
        &self,
        source: &mut R,
        suggested_name: &str,
    ) -> Result<PathBuf, ReaderError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = self.path_of(suggested_name)?;
        if !is_txt_file(&path) {
            return Err(ReaderError::validation("Only .txt files can be imported."));
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ReaderError::AlreadyImported(suggested_name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let copied = match copy_and_sync(source, &mut file).await {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                if let Err(rm) = fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %rm, "failed to remove partial import");
                }
                return Err(e.into());
            }
        };

        info!(file = %suggested_name, bytes = copied, "file imported");
        Ok(path)
    }

    /// Remove a file. Its reading progress row is left in place.
    pub async fn delete_file(&self, name: &str) -> Result<(), ReaderError> {
        let path = self.path_of(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(file = %name, "file deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReaderError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

async fn copy_and_sync<R>(source: &mut R, file: &mut fs::File) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let n = tokio::io::copy(source, file).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(n)
}

fn is_txt_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        == Some(true)
}

fn validate_file_name(name: &str) -> Result<(), ReaderError> {
    if name.trim().is_empty() {
        return Err(ReaderError::validation("File name cannot be empty."));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(ReaderError::validation(format!(
            "Invalid file name: {name}"
        )));
    }
    Ok(())
}
