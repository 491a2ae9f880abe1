//! Persistence of finished runs behind a small repository trait, so the
//! simulation core never owns storage state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, SimError};
use crate::sim::RunOutput;
use super::csv::{write_measurements_file, write_pose_history_file};
use super::json::{write_summary_file, RunSummary};

pub type RunId = u64;

/// Storage for completed runs.
pub trait RunStore {
    /// Persist `run`, returning its new id.
    fn save(&mut self, description: &str, run: &RunOutput) -> Result<RunId>;

    fn load_summary(&self, id: RunId) -> Result<RunSummary>;

    /// All stored runs as `(id, description)`, ascending by id.
    fn list(&self) -> Result<Vec<(RunId, String)>>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    runs: Vec<(RunSummary, RunOutput)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self, id: RunId) -> Option<&RunOutput> {
        self.index(id).map(|i| &self.runs[i].1)
    }

    fn index(&self, id: RunId) -> Option<usize> {
        let i = usize::try_from(id).ok()?.checked_sub(1)?;
        (i < self.runs.len()).then_some(i)
    }
}

impl RunStore for MemoryStore {
    fn save(&mut self, description: &str, run: &RunOutput) -> Result<RunId> {
        self.runs.push((RunSummary::from_run(description, run), run.clone()));
        Ok(self.runs.len() as RunId)
    }

    fn load_summary(&self, id: RunId) -> Result<RunSummary> {
        self.index(id)
            .map(|i| self.runs[i].0.clone())
            .ok_or(SimError::UnknownRun(id))
    }

    fn list(&self) -> Result<Vec<(RunId, String)>> {
        Ok(self
            .runs
            .iter()
            .enumerate()
            .map(|(i, (s, _))| (i as RunId + 1, s.description.clone()))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Directory store: one sub-directory per run
// ---------------------------------------------------------------------------

const SUMMARY_FILE: &str = "summary.json";
const TRAJECTORY_FILE: &str = "trajectory.csv";
const MEASUREMENTS_FILE: &str = "measurements.csv";

/// Writes `run-NNNNNN/{summary.json, trajectory.csv, measurements.csv}`
/// under a root directory. Nothing is held open between calls.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn run_dir(&self, id: RunId) -> PathBuf {
        self.root.join(format!("run-{:06}", id))
    }

    fn ids(&self) -> Result<Vec<RunId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            if let Some(id) = name
                .to_str()
                .and_then(|n| n.strip_prefix("run-"))
                .and_then(|n| n.parse().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

impl RunStore for DirectoryStore {
    fn save(&mut self, description: &str, run: &RunOutput) -> Result<RunId> {
        let id = self.ids()?.last().map_or(1, |last| last + 1);
        let dir = self.run_dir(id);
        fs::create_dir_all(&dir)?;

        write_summary_file(dir.join(SUMMARY_FILE), &RunSummary::from_run(description, run))?;
        write_pose_history_file(dir.join(TRAJECTORY_FILE), &run.pose_history)?;
        write_measurements_file(dir.join(MEASUREMENTS_FILE), &run.measurements)?;

        info!(id, dir = %dir.display(), "run stored");
        Ok(id)
    }

    fn load_summary(&self, id: RunId) -> Result<RunSummary> {
        let path = self.run_dir(id).join(SUMMARY_FILE);
        if !path.exists() {
            return Err(SimError::UnknownRun(id));
        }
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    fn list(&self) -> Result<Vec<(RunId, String)>> {
        self.ids()?
            .into_iter()
            .map(|id| Ok((id, self.load_summary(id)?.description)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scenario;
    use crate::sim::simulate;

    fn run() -> RunOutput {
        simulate(&Scenario::default()).unwrap()
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let out = run();
        let a = store.save("first", &out).unwrap();
        let b = store.save("second", &out).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.load_summary(2).unwrap().description, "second");
        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(store.run(1).unwrap().pose_history.len(), out.pose_history.len());
        assert!(matches!(store.load_summary(3), Err(SimError::UnknownRun(3))));
        assert!(store.load_summary(0).is_err());
    }

    #[test]
    fn directory_store_writes_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::open(tmp.path()).unwrap();
        let out = run();

        let id = store.save("survey", &out).unwrap();
        assert_eq!(id, 1);
        let dir = store.run_dir(id);
        assert!(dir.join(TRAJECTORY_FILE).exists());
        assert!(dir.join(MEASUREMENTS_FILE).exists());

        let trajectory = fs::read_to_string(dir.join(TRAJECTORY_FILE)).unwrap();
        assert_eq!(trajectory.lines().count(), out.pose_history.len() + 1);

        let summary = store.load_summary(id).unwrap();
        assert_eq!(summary.steps, out.pose_history.len());
        assert!(summary.final_pose.approx_eq(&out.final_pose, 1e-9));

        assert_eq!(store.save("again", &out).unwrap(), 2);
        let listed = store.list().unwrap();
        assert_eq!(listed, vec![(1, "survey".to_string()), (2, "again".to_string())]);
    }

    #[test]
    fn directory_store_unknown_id() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(tmp.path()).unwrap();
        assert!(matches!(store.load_summary(7), Err(SimError::UnknownRun(7))));
    }
}
