use super::types::{ScorecardStore, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Load the scorecard store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file has an unsupported version, or any scorecard's total no longer
/// matches its breakdown, returns an error.
pub fn load_store(path: &Path) -> Result<ScorecardStore> {
    if !path.exists() {
        debug!(path = %path.display(), "no scorecard store yet");
        return Ok(ScorecardStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open scorecard store at {}", path.display()))?;

    let store: ScorecardStore = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load scorecard store at {}", path.display()))?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported scorecard store version: {}", store.version);
    }

    store
        .verify()
        .with_context(|| format!("Corrupt scorecard store at {}", path.display()))?;

    debug!(path = %path.display(), count = store.len(), "loaded scorecard store");
    Ok(store)
}

/// Save the scorecard store to a JSON file atomically
///
/// Uses atomic-write-file so the store is never left half written.
/// Creates the parent directory if it doesn't exist.
pub fn save_store(path: &Path, store: &ScorecardStore) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize scorecard store")?;

    file.commit().context("Failed to save scorecard store")?;

    debug!(path = %path.display(), count = store.len(), "saved scorecard store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::types::fixtures::{self, scorecard};
    use super::super::types::Scorecard;
    use super::*;
    use crate::metrics::fixtures::middling_three_outlet;
    use crate::scoring::VariantConfig;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_store(&dir.path().join("scorecards.json")).unwrap();
        assert_eq!(store.version, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("scorecards.json");

        let mut store = ScorecardStore::new();
        store.insert(scorecard("Asha", "January 2026"));
        store.insert(scorecard("Ravi", "February 2026"));

        save_store(&path, &store).unwrap();
        let loaded = load_store(&path).unwrap();

        assert_eq!(loaded, store);
        assert_eq!(loaded.next_id, 3);
    }

    #[test]
    fn test_fractional_totals_survive_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorecards.json");

        let mut request = fixtures::request("Asha", "January 2026");
        request.metrics = middling_three_outlet();
        request.metrics.audit_mistakes = vec![1, 0, 0];
        let card =
            Scorecard::from_request(request, &VariantConfig::three_outlet(), Utc::now()).unwrap();
        // (18 + 20 + 20) / 3
        assert!((card.breakdown.outlet_audit - 58.0 / 3.0).abs() < 1e-12);

        let mut store = ScorecardStore::new();
        store.insert(card);
        save_store(&path, &store).unwrap();

        let loaded = load_store(&path).unwrap();
        assert_eq!(loaded.scorecards[0].breakdown, store.scorecards[0].breakdown);
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorecards.json");
        std::fs::write(&path, r#"{ "version": 2, "next_id": 1, "scorecards": [] }"#).unwrap();

        let err = load_store(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported scorecard store version: 2"));
    }

    #[test]
    fn test_tampered_total_rejected_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorecards.json");

        let mut store = ScorecardStore::new();
        store.insert(scorecard("Asha", "January 2026"));
        store.scorecards[0].total_score = 999.0;
        save_store(&path, &store).unwrap();

        let err = load_store(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Corrupt scorecard store"));
        assert!(message.contains("Scorecard 1 has total 999"));
    }

    #[test]
    fn test_garbage_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorecards.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_store(&path).is_err());
    }
}
