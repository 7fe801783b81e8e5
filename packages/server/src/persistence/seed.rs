//! Startup seed loading.

use std::path::Path;

use pokedex_core::{sample_records, PokemonData};
use tracing::{info, warn};

use super::PersistenceError;

/// Reads a JSON array of record-shaped objects.
///
/// Keys such as `id`, `created_at`, and `updated_at` are ignored, so a
/// snapshot file can be fed back in as a seed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// records.
pub async fn read_records(path: &Path) -> Result<Vec<PokemonData>, PersistenceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PersistenceError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| PersistenceError::json(path, e))
}

/// Loads seed records from `path`, falling back to the built-in samples on
/// any read or parse failure.
pub async fn load_seed(path: &Path) -> Vec<PokemonData> {
    match read_records(path).await {
        Ok(records) => {
            info!(path = %path.display(), count = records.len(), "Loaded seed file");
            records
        }
        Err(err) => {
            warn!(error = %err, "Seed file unavailable, using sample data");
            sample_records()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn reads_records_and_ignores_store_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 40, "num": "025", "name": "Pikachu", "type": ["Electric"],
                 "created_at": "2020-01-01T00:00:00Z"}},
                {{"num": "026", "name": "Raichu", "candy_count": null}}]"#
        )
        .unwrap();

        let records = load_seed(file.path()).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Pikachu");
        assert_eq!(records[0].types, vec!["Electric"]);
        assert_eq!(records[1].candy_count, None);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_samples() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_seed(&dir.path().join("absent.json")).await;
        assert_eq!(records, sample_records());
    }

    #[tokio::test]
    async fn malformed_file_falls_back_to_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(
            read_records(file.path()).await,
            Err(PersistenceError::Json { .. })
        ));
        assert_eq!(load_seed(file.path()).await.len(), 5);
    }
}
