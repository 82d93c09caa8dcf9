//! Manifest loading — the host resolves paths and hands parsed manifests to
//! modules.

use std::path::{Path, PathBuf};

use clinikit_domain::manifest::{Manifest, ManifestError};

/// Why a manifest file could not be turned into a [`Manifest`].
#[derive(Debug, thiserror::Error)]
pub enum ManifestLoadError {
    #[error("no manifest found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read manifest {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
}

/// Read and validate the manifest at `path`.
///
/// # Errors
///
/// Returns [`ManifestLoadError::NotFound`] when the file does not exist,
/// [`ManifestLoadError::Io`] for other read failures and
/// [`ManifestLoadError::Invalid`] when the content is not a valid manifest.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ManifestLoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let manifest =
        Manifest::from_json_str(&content).map_err(|source| ManifestLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), module_id = %manifest.module_id(), "manifest loaded");
    Ok(manifest)
}
