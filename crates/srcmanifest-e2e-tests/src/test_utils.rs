use eyre::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_MANIFEST: &str = include_str!("../fixtures/sources");

/// Output names the fetch plan for [`SAMPLE_MANIFEST`] must contain, in order.
pub const SAMPLE_OUTPUTS: [&str; 7] = [
    "ghcnm.tavg.v4.0.1.qcf.dat",
    "ghcnm.tavg.v4.0.1.qcf.inv",
    "v4.inv",
    "antarc1.txt",
    "antarc2.txt",
    "antarc3.txt",
    "SBBX.ERSSTv5.gz",
];

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub manifest_path: PathBuf,
    pub config_path: PathBuf,
    pub plan_path: PathBuf,
    pub input_dir: PathBuf,
}

/// Creates a temporary directory with the sample manifest, a YAML config
/// pointing at it and an empty input directory.
pub fn setup_test_environment() -> Result<TestEnvironment> {
    let temp_dir = tempfile::tempdir()?;

    let manifest_path = temp_dir.path().join("sources");
    std::fs::write(&manifest_path, SAMPLE_MANIFEST)?;

    let input_dir = temp_dir.path().join("input");
    std::fs::create_dir_all(&input_dir)?;

    let plan_path = temp_dir.path().join("srcmanifest.plan.json");
    let config_path = temp_dir.path().join("srcmanifest.yaml");
    std::fs::write(
        &config_path,
        format!(
            "manifest: {}\ninput_dir: {}\nplan: {}\n",
            manifest_path.display(),
            input_dir.display(),
            plan_path.display()
        ),
    )?;

    Ok(TestEnvironment {
        temp_dir,
        manifest_path,
        config_path,
        plan_path,
        input_dir,
    })
}

pub fn touch_inputs<'a>(input_dir: &Path, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    for name in names {
        std::fs::write(input_dir.join(name), name)?;
    }
    Ok(())
}
