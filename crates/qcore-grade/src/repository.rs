//! Read-only exercise catalog.

use rustc_hash::FxHashMap;
use serde::de::Error as _;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{GradeError, GradeResult};
use crate::exercise::Exercise;

/// Exercises loaded once at startup.
///
/// There are no mutating methods, so a repository can be shared behind an
/// `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct ExerciseRepository {
    exercises: Vec<Exercise>,
    index: FxHashMap<String, usize>,
}

impl ExerciseRepository {
    /// Build a repository, rejecting duplicate ids.
    pub fn from_exercises(exercises: Vec<Exercise>) -> GradeResult<Self> {
        let mut index = FxHashMap::default();
        for (i, exercise) in exercises.iter().enumerate() {
            if index.insert(exercise.id().to_string(), i).is_some() {
                return Err(GradeError::InvalidExercise {
                    exercise_id: exercise.id().to_string(),
                    reason: "duplicate id".into(),
                });
            }
        }
        Ok(Self { exercises, index })
    }

    /// Parse a JSON catalog: `{"exercises": [...]}` or a bare array.
    pub fn from_json_str(json: &str) -> GradeResult<Self> {
        let records = match serde_json::from_str::<Value>(json)? {
            Value::Object(mut map) => map.remove("exercises").ok_or_else(|| {
                serde_json::Error::custom("catalog object has no \"exercises\" array")
            })?,
            other => other,
        };
        Self::from_exercises(serde_json::from_value(records)?)
    }

    /// Load a JSON catalog from disk.
    pub fn from_path(path: impl AsRef<Path>) -> GradeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GradeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let repo = Self::from_json_str(&json)?;
        info!("Loaded {} exercises from {}", repo.len(), path.display());
        Ok(repo)
    }

    /// Look up an exercise.
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.index.get(id).map(|&i| &self.exercises[i])
    }

    /// Look up an exercise, failing with [`GradeError::ExerciseNotFound`].
    pub fn require(&self, id: &str) -> GradeResult<&Exercise> {
        self.get(id).ok_or_else(|| {
            debug!("Exercise '{id}' not found");
            GradeError::ExerciseNotFound(id.to_string())
        })
    }

    /// All exercises, in catalog order.
    pub fn list(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Number of exercises.
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
