mod output_name;

use crate::error::SrcManifestError;
use crate::manifest::{BundleGroup, FileSource, Manifest, Source};
use itertools::Itertools;
pub use output_name::{is_valid_file_name, member_file_name, url_file_name};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Retrieve `url` and store it as `output_path`
    File,
    /// Retrieve the archive at `url` and keep it whole as `output_path`
    Bundle,
    /// Retrieve the archive at `url` into `archive`, extract `member` to `output_path`
    Member,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntry {
    pub kind: EntryKind,
    /// URL to retrieve; the bundle URL for members
    pub url: Url,
    /// Path inside the bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    /// File name the downloaded bundle is stored under before extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    /// File name relative to the input directory
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchPlan {
    /// Version of the plan format
    pub version: u32,
    /// SHA-256 of the manifest this plan was derived from
    pub manifest_hash: String,
    /// Retrievals in manifest order
    pub entries: Vec<PlanEntry>,
}

fn unnamed(what: &str, value: &str) -> SrcManifestError {
    SrcManifestError::PlanValidation {
        details: format!("Cannot derive an output file name from {what} {value}"),
    }
}

fn file_entry(file: &FileSource) -> Result<PlanEntry, SrcManifestError> {
    let output_path = url_file_name(&file.url).ok_or_else(|| unnamed("URL", file.url.as_str()))?;
    Ok(PlanEntry {
        kind: EntryKind::File,
        url: file.url.clone(),
        member: None,
        archive: None,
        output_path: output_path.into_owned(),
    })
}

fn bundle_entries(group: &BundleGroup) -> Result<Vec<PlanEntry>, SrcManifestError> {
    let archive = url_file_name(&group.url)
        .ok_or_else(|| unnamed("URL", group.url.as_str()))?
        .into_owned();

    if group.members.is_empty() {
        return Ok(vec![PlanEntry {
            kind: EntryKind::Bundle,
            url: group.url.clone(),
            member: None,
            archive: None,
            output_path: archive,
        }]);
    }

    group
        .members
        .iter()
        .map(|name| {
            let output_path = member_file_name(name).ok_or_else(|| unnamed("member", name))?;
            Ok::<_, SrcManifestError>(PlanEntry {
                kind: EntryKind::Member,
                url: group.url.clone(),
                member: Some(name.clone()),
                archive: Some(archive.clone()),
                output_path: output_path.to_string(),
            })
        })
        .collect()
}

impl FetchPlan {
    pub const VERSION: u32 = 1;

    pub fn from_manifest(
        manifest_hash: String,
        manifest: &Manifest,
    ) -> Result<Self, SrcManifestError> {
        let mut entries = Vec::new();
        for source in &manifest.sources {
            match source {
                Source::File(file) => entries.push(file_entry(file)?),
                Source::Bundle(group) => entries.extend(bundle_entries(group)?),
            }
        }

        let plan = Self {
            version: Self::VERSION,
            manifest_hash,
            entries,
        };
        plan.validate()?;

        tracing::debug!(entries = plan.entries.len(), "Derived fetch plan");
        Ok(plan)
    }

    /// Every output and every downloaded archive must land in its own file
    /// directly inside the input directory.
    pub fn validate(&self) -> Result<(), SrcManifestError> {
        let unsafe_names = self
            .entries
            .iter()
            .flat_map(|entry| {
                std::iter::once(entry.output_path.as_str()).chain(entry.archive.as_deref())
            })
            .filter(|name| !is_valid_file_name(name))
            .map(|name| format!("{name:?}"))
            .collect::<Vec<_>>();
        if !unsafe_names.is_empty() {
            return Err(SrcManifestError::PlanValidation {
                details: format!(
                    "Not a plain file name inside the input directory: {}",
                    unsafe_names.join(", ")
                ),
            });
        }

        // Members of one bundle share its archive.
        let archives = self
            .entries
            .iter()
            .filter_map(|entry| entry.archive.as_deref().map(|archive| (archive, &entry.url)))
            .unique()
            .map(|(archive, _)| archive);
        let duplicates = self
            .entries
            .iter()
            .map(|entry| entry.output_path.as_str())
            .chain(archives)
            .duplicates()
            .sorted()
            .collect::<Vec<_>>();

        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(SrcManifestError::PlanValidation {
                details: format!(
                    "Several sources would be stored under the same name: {}",
                    duplicates.join(", ")
                ),
            })
        }
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), SrcManifestError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| SrcManifestError::PlanSave {
                path: path.to_path_buf(),
                reason: format!("JSON serialization failed: {}", e),
            })?;
        std::fs::write(path, json).map_err(|e| SrcManifestError::PlanSave {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self, SrcManifestError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SrcManifestError::PlanLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let plan: FetchPlan =
            serde_json::from_str(&content).map_err(|e| SrcManifestError::PlanLoad {
                path: path.to_path_buf(),
                reason: format!("JSON parsing failed: {}", e),
            })?;

        if plan.version != Self::VERSION {
            return Err(SrcManifestError::PlanValidation {
                details: format!(
                    "Fetch plan version {} is not supported. Expected version {}",
                    plan.version,
                    Self::VERSION
                ),
            });
        }
        plan.validate()?;

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(input: &str) -> Result<FetchPlan, SrcManifestError> {
        let manifest: Manifest = input.parse().unwrap();
        FetchPlan::from_manifest("hash".to_string(), &manifest)
    }

    #[test]
    fn test_plan_entries_follow_manifest() {
        let plan = plan_for(
            "\
file: https://example.org/ghcn/v4.inv
bundle: https://example.org/ghcn/ghcnm.tar.gz
member: ghcnm.v4/ghcnm.tavg.qcf.dat
member: ghcnm.v4/ghcnm.tavg.qcf.inv
bundle: https://example.org/ersst/SBBX.ERSSTv5.gz
",
        )
        .unwrap();

        assert_eq!(plan.version, FetchPlan::VERSION);
        assert_eq!(plan.manifest_hash, "hash");
        assert_eq!(
            plan.entries
                .iter()
                .map(|e| (e.kind, e.output_path.as_str()))
                .collect::<Vec<_>>(),
            vec![
                (EntryKind::File, "v4.inv"),
                (EntryKind::Member, "ghcnm.tavg.qcf.dat"),
                (EntryKind::Member, "ghcnm.tavg.qcf.inv"),
                (EntryKind::Bundle, "SBBX.ERSSTv5.gz"),
            ]
        );

        let member = &plan.entries[1];
        assert_eq!(member.url.as_str(), "https://example.org/ghcn/ghcnm.tar.gz");
        assert_eq!(member.member.as_deref(), Some("ghcnm.v4/ghcnm.tavg.qcf.dat"));
        assert_eq!(member.archive.as_deref(), Some("ghcnm.tar.gz"));
    }

    #[test]
    fn test_duplicate_output_names_are_rejected() {
        let err = plan_for(
            "\
file: https://example.org/a/data.txt
bundle: https://example.org/b.tar.gz
member: inner/data.txt
",
        )
        .unwrap_err();

        match err {
            SrcManifestError::PlanValidation { details } => {
                assert!(details.contains("data.txt"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_colliding_archive_names_are_rejected() {
        let err = plan_for(
            "\
file: https://a.org/data.tar.gz
bundle: https://b.org/2023/x.tar.gz
member: first.dat
bundle: https://b.org/2024/x.tar.gz
member: second.dat
bundle: https://c.org/data.tar.gz
member: third.dat
",
        )
        .unwrap_err();

        match err {
            SrcManifestError::PlanValidation { details } => {
                assert!(details.contains("x.tar.gz"), "{details}");
                assert!(details.contains("data.tar.gz"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_member_named_like_its_archive_is_rejected() {
        let err = plan_for("bundle: https://example.org/b.tar.gz\nmember: inner/b.tar.gz\n")
            .unwrap_err();

        assert!(matches!(err, SrcManifestError::PlanValidation { .. }));
    }

    #[test]
    fn test_percent_encoded_url_gives_decoded_output_name() {
        let plan = plan_for("file: https://example.org/my%20data.txt\n").unwrap();

        assert_eq!(plan.entries[0].output_path, "my data.txt");
    }

    #[test]
    fn test_url_without_file_name_is_rejected() {
        let err = plan_for("file: https://example.org/\n").unwrap_err();

        assert!(matches!(err, SrcManifestError::PlanValidation { .. }));
    }

    #[test]
    fn test_empty_manifest_gives_empty_plan() {
        let plan = plan_for("# nothing\n").unwrap();

        assert!(plan.entries.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let plan = plan_for(
            "bundle: https://example.org/b.tar.gz\nmember: x/y.dat\nfile: https://example.org/z.dat\n",
        )
        .unwrap();

        plan.save_to_file(&path).unwrap();
        let loaded = FetchPlan::load_from_file(&path).unwrap();

        assert_eq!(plan, loaded);
    }

    #[test]
    fn test_file_entries_omit_member_fields_in_json() {
        let plan = plan_for("file: https://example.org/z.dat\n").unwrap();
        let json = serde_json::to_value(&plan.entries[0]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "kind": "file",
                "url": "https://example.org/z.dat",
                "output_path": "z.dat",
            })
        );
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(
            &path,
            r#"{"version": 99, "manifest_hash": "abc", "entries": []}"#,
        )
        .unwrap();

        let err = FetchPlan::load_from_file(&path).unwrap_err();

        match err {
            SrcManifestError::PlanValidation { details } => {
                assert!(details.contains("99"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_paths_outside_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");

        for (output_path, archive) in [
            ("../../etc/passwd", None),
            ("", None),
            ("/abs/x", None),
            ("..", None),
            ("dir\\file", None),
            ("ok.dat", Some("../b.tar.gz")),
        ] {
            let plan = serde_json::json!({
                "version": FetchPlan::VERSION,
                "manifest_hash": "abc",
                "entries": [{
                    "kind": if archive.is_some() { "member" } else { "file" },
                    "url": "https://example.org/b.tar.gz",
                    "member": archive.map(|_| "ok.dat"),
                    "archive": archive,
                    "output_path": output_path,
                }],
            });
            std::fs::write(&path, plan.to_string()).unwrap();

            let err = FetchPlan::load_from_file(&path).unwrap_err();

            assert!(
                matches!(err, SrcManifestError::PlanValidation { .. }),
                "{output_path:?} / {archive:?} produced {err:?}"
            );
        }
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FetchPlan::load_from_file(&path).unwrap_err();

        assert!(matches!(err, SrcManifestError::PlanLoad { .. }));
    }
}
