use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::model::task::Task;
use crate::storage::traits::TaskStorage;

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// File-backed storage: the whole task list lives in one JSON file,
/// `~/.taskflow/tasks.json` unless a base directory is given.
///
/// Construction never fails. When no usable location exists (no home
/// directory) the backend degrades to doing nothing: loads are empty and
/// saves are skipped, so the session keeps running in memory.
#[derive(Clone)]
pub struct FileTaskStorage {
    file_path: Option<PathBuf>,
}

impl FileTaskStorage {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        let base = base_dir.or_else(|| dirs::home_dir().map(|home| home.join(".taskflow")));
        let file_path = match base {
            Some(dir) => Some(dir.join(DEFAULT_FILE_NAME)),
            None => {
                warn!("could not determine home directory, tasks will not persist");
                None
            }
        };
        FileTaskStorage { file_path }
    }

    fn read_tasks(path: &Path) -> Result<Vec<Task>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)?;
        Ok(tasks)
    }

    fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskStorage for FileTaskStorage {
    fn load(&self) -> Vec<Task> {
        let Some(path) = &self.file_path else {
            return Vec::new();
        };
        // A missing file is a normal first run, not an error.
        if !path.exists() {
            return Vec::new();
        }
        match Self::read_tasks(path) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to load tasks, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) {
        let Some(path) = &self.file_path else {
            return;
        };
        if let Err(err) = Self::write_tasks(path, tasks) {
            warn!(path = %path.display(), %err, "failed to save tasks, write skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::store::TaskStore;
    use chrono::{TimeZone, Utc};

    fn sample_tasks() -> Vec<Task> {
        let mut with_extras = Task::new(
            "Write report".to_string(),
            Some("Quarterly numbers".to_string()),
            Priority::High,
            Some(Utc.with_ymd_and_hms(2026, 9, 15, 23, 59, 59).unwrap()),
        );
        with_extras.completed = true;

        let bare = Task::new("Buy milk".to_string(), None, Priority::Low, None);

        vec![with_extras, bare]
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTaskStorage::new(Some(dir.path().to_path_buf()));

        let tasks = sample_tasks();
        storage.save(&tasks);

        let loaded = storage.load();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTaskStorage::new(Some(dir.path().join("nested")));

        storage.save(&sample_tasks());
        assert_eq!(storage.load().len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTaskStorage::new(Some(dir.path().to_path_buf()));

        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTaskStorage::new(Some(dir.path().to_path_buf()));

        fs::write(dir.path().join(DEFAULT_FILE_NAME), "not json {{{").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_bad_date_text_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTaskStorage::new(Some(dir.path().to_path_buf()));

        let record = r#"[{
            "id": "7d56fb23-93ca-46d0-a1ba-26ee11d67fa8",
            "title": "Broken",
            "completed": false,
            "priority": "medium",
            "createdAt": "yesterday-ish",
            "updatedAt": "yesterday-ish"
        }]"#;
        fs::write(dir.path().join(DEFAULT_FILE_NAME), record).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        // The base dir path runs through a regular file, so every write fails.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let storage = FileTaskStorage::new(Some(blocker.join("nested")));

        storage.save(&sample_tasks());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_store_stays_usable_without_durable_storage() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let storage = FileTaskStorage::new(Some(blocker.join("nested")));

        let mut store = TaskStore::new(storage);
        assert!(store.add("Still works", None, Priority::default(), None));
        let id = store.tasks()[0].id;
        store.toggle(&id);
        assert!(store.tasks()[0].completed);
    }

    #[test]
    fn test_wire_format_field_names() {
        let tasks = sample_tasks();
        let json = serde_json::to_string(&tasks).unwrap();

        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"endDate\""));
        assert!(json.contains("\"priority\":\"high\""));
        // Absent optionals are omitted, not serialized as null.
        assert!(!json.contains("null"));
    }
}
