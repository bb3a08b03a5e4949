use crate::plan::{FetchPlan, PlanEntry};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EntryStatus<'a> {
    pub entry: &'a PlanEntry,
    pub path: PathBuf,
    pub present: bool,
}

#[derive(Debug, Clone)]
pub struct StatusReport<'a> {
    pub input_dir: PathBuf,
    pub entries: Vec<EntryStatus<'a>>,
}

impl<'a> StatusReport<'a> {
    pub fn missing(&self) -> impl Iterator<Item = &EntryStatus<'a>> {
        self.entries.iter().filter(|status| !status.present)
    }

    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|status| status.present).count()
    }

    pub fn missing_count(&self) -> usize {
        self.entries.len() - self.present_count()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|status| status.present)
    }
}

/// Checks which planned files already exist in `input_dir`. Nothing is downloaded.
pub fn inspect_input_dir<'a>(plan: &'a FetchPlan, input_dir: &Path) -> StatusReport<'a> {
    let entries = plan
        .entries
        .iter()
        .map(|entry| {
            let path = input_dir.join(&entry.output_path);
            let present = path.is_file();
            tracing::trace!(path = %path.display(), present, "Checked planned file");
            EntryStatus {
                entry,
                path,
                present,
            }
        })
        .collect();

    StatusReport {
        input_dir: input_dir.to_path_buf(),
        entries,
    }
}
