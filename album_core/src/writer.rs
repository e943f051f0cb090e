use crate::{error::VaultError, notify::Notifier, vault::Vault};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created(String),
    /// A note was already at the path; it was opened and left untouched.
    AlreadyExists(String),
}

impl WriteOutcome {
    pub fn path(&self) -> &str {
        match self {
            WriteOutcome::Created(path) | WriteOutcome::AlreadyExists(path) => path,
        }
    }
}

/// `<folder>/<file_name>`, or just the file name when `folder` is blank.
pub fn note_path(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        file_name.to_owned()
    } else {
        format!("{folder}/{file_name}")
    }
}

/// Persists a rendered note. An existing note at the same path is opened
/// instead and never overwritten.
pub fn write_note(
    vault: &dyn Vault,
    notifier: &dyn Notifier,
    folder: &str,
    file_name: &str,
    content: &str,
) -> Result<WriteOutcome, VaultError> {
    let path = note_path(folder, file_name);

    let result = create_or_open(vault, notifier, folder, &path, file_name, content);
    if let Err(err) = &result {
        tracing::error!(error = %err, path = %path, "error creating album note");
        notifier.notice("Error creating album note.");
    }
    result
}

fn create_or_open(
    vault: &dyn Vault,
    notifier: &dyn Notifier,
    folder: &str,
    path: &str,
    file_name: &str,
    content: &str,
) -> Result<WriteOutcome, VaultError> {
    if !folder.trim_matches('/').is_empty() && !vault.folder_exists(folder) {
        vault.create_folder(folder)?;
    }

    if vault.file_exists(path) {
        notifier.notice(&format!("File {file_name} already exists!"));
        vault.open(path)?;
        return Ok(WriteOutcome::AlreadyExists(path.to_owned()));
    }

    vault.create(path, content)?;
    vault.open(path)?;
    notifier.notice(&format!("Created {file_name}"));
    Ok(WriteOutcome::Created(path.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{notify::NoticeLog, vault::FsVault};

    #[test]
    fn joins_folder_and_name() {
        assert_eq!(note_path("Albums", "a.md"), "Albums/a.md");
        assert_eq!(note_path("Music/Albums/", "a.md"), "Music/Albums/a.md");
        assert_eq!(note_path("", "a.md"), "a.md");
    }

    #[test]
    fn creates_folder_and_note() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        let notices = NoticeLog::new();

        let outcome = write_note(&vault, &notices, "Albums", "Nevermind.md", "body").unwrap();

        assert_eq!(outcome, WriteOutcome::Created("Albums/Nevermind.md".to_owned()));
        assert_eq!(
            fs::read_to_string(dir.path().join("Albums/Nevermind.md")).unwrap(),
            "body"
        );
        assert_eq!(notices.messages(), vec!["Created Nevermind.md"]);
    }

    #[test]
    fn existing_note_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Albums").join("Nevermind.md");
        fs::create_dir(dir.path().join("Albums")).unwrap();
        fs::write(&path, b"my own notes\r\n\xF0\x9F\x8E\xB8").unwrap();
        let before = fs::read(&path).unwrap();

        let vault = FsVault::new(dir.path());
        let notices = NoticeLog::new();
        let outcome = write_note(&vault, &notices, "Albums", "Nevermind.md", "new body").unwrap();

        assert_eq!(outcome, WriteOutcome::AlreadyExists("Albums/Nevermind.md".to_owned()));
        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(notices.messages(), vec!["File Nevermind.md already exists!"]);
    }

    #[test]
    fn storage_errors_are_reported_and_returned() {
        let dir = TempDir::new().unwrap();
        // a file where the folder should be
        fs::write(dir.path().join("Albums"), "").unwrap();

        let vault = FsVault::new(dir.path());
        let notices = NoticeLog::new();
        let result = write_note(&vault, &notices, "Albums", "Nevermind.md", "body");

        assert!(matches!(result, Err(VaultError::Io { .. })));
        assert_eq!(notices.messages(), vec!["Error creating album note."]);
    }
}
