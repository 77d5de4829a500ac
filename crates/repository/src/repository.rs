use crate::error::RepositoryError;
use core_types::{Dataset, Grade, Student, Subject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

pub const STUDENTS_FILE: &str = "students.json";
pub const SUBJECTS_FILE: &str = "subjects.json";
pub const GRADES_FILE: &str = "grades.json";

/// Read-only access to the JSON collections of one data directory.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    dir: PathBuf,
    strict: bool,
}

impl JsonRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), strict: false }
    }

    /// When strict, a file that cannot be decoded fails the load instead of
    /// being treated as an empty collection.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn load_students(&self) -> Result<Vec<Student>, RepositoryError> {
        self.read_collection(STUDENTS_FILE)
    }

    pub fn load_subjects(&self) -> Result<Vec<Subject>, RepositoryError> {
        self.read_collection(SUBJECTS_FILE)
    }

    pub fn load_grades(&self) -> Result<Vec<Grade>, RepositoryError> {
        self.read_collection(GRADES_FILE)
    }

    /// Loads all three collections into a fresh `Dataset`.
    pub fn load(&self) -> Result<Dataset, RepositoryError> {
        let dataset = Dataset::new(self.load_students()?, self.load_subjects()?, self.load_grades()?);
        tracing::info!(
            dir = %self.dir.display(),
            students = dataset.students.len(),
            subjects = dataset.subjects.len(),
            grades = dataset.grades.len(),
            "Dataset loaded."
        );
        Ok(dataset)
    }

    fn read_collection<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, RepositoryError> {
        let path = self.dir.join(file_name);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Collection file absent; using an empty collection.");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path).map_err(|source| RepositoryError::Io {
            path: path.clone(),
            source,
        })?;

        let decoded = serde_json::from_str::<Value>(&raw).and_then(|value| match value {
            Value::Array(_) => serde_json::from_value::<Vec<T>>(value).map(Some),
            _ => Ok(None),
        });

        match decoded {
            Ok(Some(records)) => Ok(records),
            Ok(None) => {
                tracing::warn!(path = %path.display(), "Collection file is not a JSON array; ignoring it.");
                Ok(Vec::new())
            }
            Err(source) if self.strict => Err(RepositoryError::Json { path, source }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Collection file is corrupt; ignoring it.");
                Ok(Vec::new())
            }
        }
    }
}
