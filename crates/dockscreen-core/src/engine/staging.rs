use crate::engine::error::EngineError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Extensions of pipeline scripts staged into the working directory.
const SCRIPT_EXTENSIONS: [&str; 3] = ["sh", "bash", "py"];

/// An exclusive, self-cleaning working directory for one invocation.
///
/// Every invocation acquires a fresh directory under the configured staging
/// root, with the pipeline scripts copied in and marked executable. The
/// directory is removed when the handle drops, on success and failure alike,
/// so no two invocations can ever collide on staged files or stale results.
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    /// Acquires a fresh staging directory and copies the pipeline scripts
    /// into it.
    pub fn acquire(staging_root: &Path, scripts_dir: &Path) -> Result<Self, EngineError> {
        fs::create_dir_all(staging_root).map_err(|e| EngineError::Staging {
            path: staging_root.to_path_buf(),
            source: e,
        })?;
        let dir = tempfile::Builder::new()
            .prefix("dockscreen-")
            .tempdir_in(staging_root)
            .map_err(|e| EngineError::Staging {
                path: staging_root.to_path_buf(),
                source: e,
            })?;
        debug!("Acquired staging directory {:?}.", dir.path());

        let staging = Self { dir };
        staging.stage_scripts(scripts_dir)?;
        Ok(staging)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn stage_scripts(&self, scripts_dir: &Path) -> Result<(), EngineError> {
        let staging_err = |path: &Path, source| EngineError::Staging {
            path: path.to_path_buf(),
            source,
        };

        let entries = fs::read_dir(scripts_dir).map_err(|e| staging_err(scripts_dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| staging_err(scripts_dir, e))?;
            let source = entry.path();
            let is_script = source
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext));
            if !source.is_file() || !is_script {
                continue;
            }

            let target = self.dir.path().join(entry.file_name());
            fs::copy(&source, &target).map_err(|e| staging_err(&source, e))?;
            Self::mark_executable(&target)?;
            debug!("Staged pipeline script {:?}.", target);
        }
        Ok(())
    }

    #[cfg(unix)]
    fn mark_executable(path: &Path) -> Result<(), EngineError> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| {
            EngineError::Staging {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }

    #[cfg(not(unix))]
    fn mark_executable(_path: &Path) -> Result<(), EngineError> {
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        // TempDir removes the tree on drop; this only surfaces failures.
        if let Err(e) = fs::remove_dir_all(self.dir.path()) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to clean up staging directory {:?}: {}",
                    self.dir.path(),
                    e
                );
            }
        }
    }
}
