use crate::ClimaError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// Where exports go when no directory is configured: the user's download
/// directory, then their home directory, then the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub async fn ensure_dir_exists(path: &Path) -> Result<(), ClimaError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ClimaError::ExportDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating export directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| ClimaError::ExportDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ClimaError::ExportDirCreation(path.to_path_buf(), e)),
    }
}
