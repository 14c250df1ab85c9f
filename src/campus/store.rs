use super::dataset::{Dataset, Section};
use anyhow::{Result, anyhow};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddStudentError {
    BlankName,
    Persist { path: PathBuf, message: String },
}

impl Display for AddStudentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "student name must not be blank"),
            Self::Persist { path, message } => {
                write!(f, "failed to save {}: {message}", path.display())
            }
        }
    }
}

impl Error for AddStudentError {}

/// Owns the session's dataset and snapshots it to disk after every edit.
///
/// The store is single-writer: two processes sharing one data file race
/// last-writer-wins, though each snapshot lands whole thanks to the rename.
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    data: Dataset,
}

impl RosterStore {
    /// Loads the snapshot at `path`, or seeds the built-in dataset when the
    /// file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let data = if path.is_file() {
            load_snapshot(path)?
        } else {
            Dataset::seed()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn with_dataset(path: &Path, data: Dataset) -> Self {
        Self {
            path: path.to_path_buf(),
            data,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Appends `name` to `section` and writes a full snapshot. On a failed
    /// write the append is undone so memory and disk stay in step.
    pub fn add_student(
        &mut self,
        section: Section,
        name: &str,
    ) -> std::result::Result<String, AddStudentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AddStudentError::BlankName);
        }

        self.data.roster_mut(section).push(name.to_string());
        if let Err(err) = self.save() {
            self.data.roster_mut(section).pop();
            return Err(AddStudentError::Persist {
                path: self.path.clone(),
                message: format!("{err:#}"),
            });
        }

        Ok(name.to_string())
    }

    pub fn save(&self) -> Result<()> {
        let contents = snapshot_json(&self.data)?;
        write_atomic(&self.path, &contents)
    }
}

pub fn snapshot_json(data: &Dataset) -> Result<String> {
    let mut json = serde_json::to_string_pretty(data)
        .map_err(|err| anyhow!("Failed to serialize dataset: {err}"))?;
    json.push('\n');
    Ok(json)
}

fn load_snapshot(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path).map_err(|err| {
        anyhow!(
            "Failed to load dataset {}: unable to read file: {err}",
            path.display()
        )
    })?;

    serde_json::from_str(&text)
        .map_err(|err| anyhow!("Failed to load dataset {}: {err}", path.display()))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            anyhow!(
                "Failed to create data directory {}: {err}",
                parent.display()
            )
        })?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents)
        .map_err(|err| anyhow!("Failed to write {}: {err}", temp_path.display()))?;
    fs::rename(&temp_path, path).map_err(|err| {
        let _ = fs::remove_file(&temp_path);
        anyhow!(
            "Failed to replace {} with {}: {err}",
            path.display(),
            temp_path.display()
        )
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "dataset.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
