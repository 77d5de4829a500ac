use crate::error::RepositoryError;
use crate::repository::JsonRepository;
use std::path::Path;

/// Opens the data directory that holds the JSON collections.
///
/// Only the directory itself is checked here; individual files are allowed to
/// be missing and are read lazily by [`JsonRepository::load`].
pub fn open(data_dir: impl AsRef<Path>) -> Result<JsonRepository, RepositoryError> {
    let data_dir = data_dir.as_ref();
    if !data_dir.is_dir() {
        return Err(RepositoryError::MissingDirectory(data_dir.to_path_buf()));
    }
    tracing::debug!(dir = %data_dir.display(), "Opened data directory.");
    Ok(JsonRepository::new(data_dir))
}
