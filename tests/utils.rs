use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// A directory with a `prelint.toml` that points to a fake linter. The fake
/// linter prints `report.json`, with `__FILE__` replaced by the absolute path
/// of the linted file.
pub struct TestProject {
    // Keeps the directory alive.
    _directory: TempDir,
    pub root: PathBuf,
}

impl TestProject {
    pub fn new(report: &str) -> anyhow::Result<Self> {
        let directory = TempDir::new()?;
        let root = directory.path().canonicalize()?;

        fs::write(
            root.join("lint.sh"),
            "sed \"s#__FILE__#$(pwd -P)/$1#g\" report.json\n",
        )?;
        fs::write(root.join("report.json"), report)?;
        fs::write(
            root.join("prelint.toml"),
            "[lint]\ncommand = \"sh\"\nargs = [\"lint.sh\"]\n",
        )?;

        Ok(Self { _directory: directory, root })
    }

    pub fn write(&self, path: &str, content: &str) -> anyhow::Result<()> {
        let path = self.root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn read(&self, path: &str) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.root.join(path))?)
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(binary_path());
        command.current_dir(&self.root).arg("--no-color");
        command
    }
}

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_prelint"))
}

pub trait CommandExt {
    /// Run the command and format its status and output for snapshots.
    /// `root` is replaced by `[TEMP]`.
    fn run_in(&mut self, root: &Path) -> String;
}

impl CommandExt for Command {
    fn run_in(&mut self, root: &Path) -> String {
        let output = self.output().expect("Failed to run prelint");
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let root = root.display().to_string();

        format!(
            "success: {}\nexit_code: {}\n----- stdout -----\n{}\n----- stderr -----\n{}",
            output.status.success(),
            output.status.code().unwrap_or(-1),
            stdout.replace(&root, "[TEMP]"),
            stderr.replace(&root, "[TEMP]"),
        )
    }
}
