use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::VaultError;

/// Storage the notes live in. Paths are vault-relative and `/`-separated.
pub trait Vault {
    fn folder_exists(&self, path: &str) -> bool;
    fn create_folder(&self, path: &str) -> Result<(), VaultError>;
    fn file_exists(&self, path: &str) -> bool;
    fn read(&self, path: &str) -> Result<String, VaultError>;
    /// Creates a new file. Fails with [`VaultError::AlreadyExists`] rather than
    /// replacing an existing one.
    fn create(&self, path: &str, content: &str) -> Result<(), VaultError>;
    fn open(&self, path: &str) -> Result<(), VaultError>;
}

/// A vault rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    editor: Option<String>,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> FsVault {
        FsVault {
            root: root.into(),
            editor: None,
        }
    }

    /// Opens notes with `editor` instead of printing their location.
    pub fn with_editor(mut self, editor: Option<String>) -> FsVault {
        self.editor = editor.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl Vault for FsVault {
    fn folder_exists(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn create_folder(&self, path: &str) -> Result<(), VaultError> {
        let full = self.resolve(path);
        fs::create_dir_all(&full).map_err(|e| VaultError::io(full, e))
    }

    fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|e| VaultError::io(full, e))
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.resolve(path);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => VaultError::AlreadyExists(full.clone()),
                _ => VaultError::io(&full, e),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| VaultError::io(full, e))
    }

    fn open(&self, path: &str) -> Result<(), VaultError> {
        let full = self.resolve(path);
        match &self.editor {
            Some(editor) => {
                let status = editor_command(editor, &full)
                    .status()
                    .map_err(|e| VaultError::io(&full, e))?;
                if !status.success() {
                    tracing::warn!(editor = %editor, %status, "editor exited unsuccessfully");
                }
                Ok(())
            }
            None => {
                println!("{}", full.display());
                Ok(())
            }
        }
    }
}

/// Builds the command that opens `path` in `editor`. On unix the editor string
/// is run by `sh`, so flags (`code --wait`) and quoted paths with spaces work as
/// they do for git. The call blocks until the editor exits.
#[cfg(unix)]
fn editor_command(editor: &str, path: &Path) -> Command {
    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(format!("{editor} \"$@\""))
        .arg(editor)
        .arg(path);
    command
}

#[cfg(not(unix))]
fn editor_command(editor: &str, path: &Path) -> Command {
    let mut command = Command::new(editor);
    command.arg(path);
    command
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn resolves_relative_paths() {
        let vault = FsVault::new("/vault");
        assert_eq!(vault.resolve("Albums/x.md"), PathBuf::from("/vault/Albums/x.md"));
        assert_eq!(vault.resolve("/Albums//x.md"), PathBuf::from("/vault/Albums/x.md"));
        assert_eq!(vault.resolve(""), PathBuf::from("/vault"));
    }

    #[test]
    fn create_never_replaces() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());

        assert!(!vault.folder_exists("Albums"));
        vault.create_folder("Albums").unwrap();
        assert!(vault.folder_exists("Albums"));

        vault.create("Albums/a.md", "first").unwrap();
        assert!(vault.file_exists("Albums/a.md"));
        assert!(matches!(
            vault.create("Albums/a.md", "second"),
            Err(VaultError::AlreadyExists(_))
        ));
        assert_eq!(vault.read("Albums/a.md").unwrap(), "first");
    }

    #[test]
    fn read_missing_is_an_error() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        assert!(matches!(vault.read("nope.md"), Err(VaultError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn editor_path_with_spaces_and_flags() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("My Editor");
        fs::create_dir(&bin).unwrap();
        let script = bin.join("ed");
        fs::write(
            &script,
            "#!/bin/sh\nprintf '%s|%s' \"$1\" \"$2\" > \"$(dirname \"$0\")/opened\"\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let vault = FsVault::new(dir.path()).with_editor(Some(format!("'{}' --wait", script.display())));
        vault.create("Nevermind (1991).md", "body").unwrap();
        vault.open("Nevermind (1991).md").unwrap();

        let opened = fs::read_to_string(bin.join("opened")).unwrap();
        assert_eq!(
            opened,
            format!("--wait|{}", dir.path().join("Nevermind (1991).md").display())
        );
    }

    #[test]
    fn blank_editor_is_ignored() {
        let vault = FsVault::new("/vault").with_editor(Some("  ".to_owned()));
        assert!(vault.editor.is_none());
    }
}
