use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::PreprocessError;
use crate::file::FileDescriptor;

/// A step that takes a source file and turns it into something a build can
/// consume.
///
/// `Output` is whatever the step produces: a `Result`, a future, a plain
/// value. Callers that sit in front of a preprocessor hand it back without
/// looking inside.
pub trait Preprocessor {
    type Output;

    fn preprocess(&self, file: &FileDescriptor) -> Self::Output;
}

impl<F, T> Preprocessor for F
where
    F: Fn(&FileDescriptor) -> T,
{
    type Output = T;

    fn preprocess(&self, file: &FileDescriptor) -> T {
        self(file)
    }
}

/// Options of [`BundlePreprocessor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleOptions {
    /// External bundler to run. Without one, the source is written to the
    /// output path unchanged.
    pub command: Option<String>,
    /// Arguments of `command`. `{input}` and `{output}` are replaced by the
    /// source and output paths.
    pub args: Vec<String>,
    /// Create the parent directories of the output path if needed.
    pub create_dirs: bool,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self { command: None, args: Vec::new(), create_dirs: true }
    }
}

/// The preprocessor used when none is supplied.
#[derive(Clone, Debug, Default)]
pub struct BundlePreprocessor {
    options: BundleOptions,
}

impl BundlePreprocessor {
    pub fn new(options: BundleOptions) -> Self {
        tracing::debug!("Creating bundle preprocessor with {:?}", options);
        Self { options }
    }

    pub fn options(&self) -> &BundleOptions {
        &self.options
    }

    fn run_command(
        &self,
        command: &str,
        input: &Path,
        output: &Path,
    ) -> Result<(), PreprocessError> {
        let args = self.options.args.iter().map(|arg| {
            arg.replace("{input}", &input.to_string_lossy())
                .replace("{output}", &output.to_string_lossy())
        });

        let result = Command::new(command)
            .args(args)
            .output()
            .map_err(|source| PreprocessError::Spawn { command: command.to_string(), source })?;

        if !result.status.success() {
            return Err(PreprocessError::Failed {
                command: command.to_string(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Preprocessor for BundlePreprocessor {
    type Output = Result<PathBuf, PreprocessError>;

    fn preprocess(&self, file: &FileDescriptor) -> Self::Output {
        let input = file.file_path();
        let output = file.output_path();

        if !input.is_file() {
            return Err(PreprocessError::MissingSource(input.to_path_buf()));
        }

        if self.options.create_dirs
            && let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|source| PreprocessError::Write { path: parent.to_path_buf(), source })?;
        }

        tracing::debug!("Bundling {} into {}", input.display(), output.display());

        match &self.options.command {
            Some(command) => self.run_command(command, input, output)?,
            None => {
                fs::copy(input, output)
                    .map_err(|source| PreprocessError::Write { path: output.to_path_buf(), source })?;
            }
        }

        Ok(output.to_path_buf())
    }
}
