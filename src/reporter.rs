use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::diagnostic::LintReport;
use crate::emitter::ConsoleEmitter;
use crate::engine::LintEngine;
use crate::error::EngineError;
use crate::file::FileDescriptor;
use crate::preprocessor::{BundleOptions, BundlePreprocessor, Preprocessor};

type Sink = Box<dyn Write + Send>;

/// Lints a file, prints what the linter found, then hands the file over to a
/// preprocessor and returns whatever the preprocessor returned.
///
/// A `Reporter` is itself a [`Preprocessor`], so it can be dropped in front
/// of any step expecting one.
pub struct Reporter<E, P = BundlePreprocessor> {
    engine: E,
    preprocessor: P,
    emitter: ConsoleEmitter,
    sink: Mutex<Sink>,
    cwd: Option<PathBuf>,
}

/// Build a reporter that forwards files to the default [`BundlePreprocessor`].
pub fn create_reporter<E: LintEngine>(engine: E) -> Reporter<E> {
    Reporter::new(engine)
}

impl<E> Reporter<E, BundlePreprocessor> {
    /// The default preprocessor is built here, once per reporter.
    pub fn new(engine: E) -> Self {
        Self::with_preprocessor(engine, BundlePreprocessor::new(BundleOptions::default()))
    }
}

impl<E, P> Reporter<E, P> {
    pub fn with_preprocessor(engine: E, preprocessor: P) -> Self {
        Self {
            engine,
            preprocessor,
            emitter: ConsoleEmitter::new(false),
            sink: Mutex::new(Box::new(io::stdout())),
            cwd: None,
        }
    }

    /// Color diagnostics by severity.
    pub fn colored(mut self, colored: bool) -> Self {
        self.emitter = ConsoleEmitter::new(colored);
        self
    }

    /// Where diagnostics are printed. Defaults to stdout.
    pub fn sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Mutex::new(Box::new(sink));
        self
    }

    /// Directory that relative paths are shown against. Defaults to the
    /// current directory at the time of each call.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn preprocessor(&self) -> &P {
        &self.preprocessor
    }

    fn current_dir(&self) -> PathBuf {
        working_dir(self.cwd.as_deref(), env::current_dir)
    }

    fn print(&self, output: &[u8]) {
        if output.is_empty() {
            return;
        }
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = sink.write_all(output).and_then(|_| sink.flush()) {
            tracing::warn!("Failed to print diagnostics: {err}");
        }
    }
}

/// The explicit directory if there is one, otherwise the process's. Paths are
/// then shown relative to `.` when the latter can't be read.
fn working_dir(explicit: Option<&Path>, current: impl FnOnce() -> io::Result<PathBuf>) -> PathBuf {
    if let Some(cwd) = explicit {
        return cwd.to_path_buf();
    }
    match current() {
        Ok(cwd) => cwd,
        Err(err) => {
            tracing::warn!("Failed to read the current directory: {err}");
            PathBuf::from(".")
        }
    }
}

impl<E: LintEngine, P> Reporter<E, P> {
    /// Lint `file` and print the diagnostics, without preprocessing it.
    pub fn report(&self, file: &FileDescriptor) -> Result<LintReport, EngineError> {
        tracing::debug!("Linting {}", file.file_path().display());
        let report = self
            .engine
            .execute_on_files(&[file.file_path().to_path_buf()])?;

        let mut output = Vec::new();
        if let Err(err) =
            self.emitter
                .emit(&mut output, file.file_path(), &report, &self.current_dir())
        {
            tracing::warn!("Failed to render diagnostics: {err}");
        }
        self.print(&output);

        Ok(report)
    }
}

impl<E: LintEngine, P: Preprocessor> Reporter<E, P> {
    /// Lint and print, then preprocess `file`.
    ///
    /// A linter failure is returned as is and the preprocessor doesn't run.
    /// The preprocessor's output, successful or not, is returned untouched.
    pub fn run(&self, file: &FileDescriptor) -> Result<P::Output, EngineError> {
        self.run_with_report(file).map(|(_, output)| output)
    }

    /// Same as [`Reporter::run`], but also hands back the lint report.
    pub fn run_with_report(
        &self,
        file: &FileDescriptor,
    ) -> Result<(LintReport, P::Output), EngineError> {
        let report = self.report(file)?;
        tracing::debug!("Preprocessing {}", file.file_path().display());
        Ok((report, self.preprocessor.preprocess(file)))
    }
}

impl<E: LintEngine, P: Preprocessor> Preprocessor for Reporter<E, P> {
    type Output = Result<P::Output, EngineError>;

    fn preprocess(&self, file: &FileDescriptor) -> Self::Output {
        self.run(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Diagnostic, FileResult, Severity};
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn file() -> FileDescriptor {
        FileDescriptor::new(
            "/home/me/project/my-tests.e2e-spec.js",
            "/tmp/user/project/my-tests.e2e-spec.js",
        )
    }

    fn engine(messages: Vec<Diagnostic>) -> impl Fn(&[PathBuf]) -> Result<LintReport, EngineError> {
        let report = LintReport::from_results(vec![FileResult::new(file().file_path, messages)]);
        move |_| Ok(report.clone())
    }

    fn failing_engine(message: &str) -> impl Fn(&[PathBuf]) -> Result<LintReport, EngineError> {
        let message = message.to_string();
        move |_| Err(EngineError::Other(message.clone()))
    }

    fn indent_error() -> Diagnostic {
        Diagnostic::new(
            24,
            17,
            Severity::Error,
            "Expected indentation of 2 spaces but found 4",
            "indent",
        )
    }

    #[test]
    fn test_lints_the_file_path() {
        let seen = RefCell::new(Vec::new());
        let engine = |paths: &[PathBuf]| -> Result<LintReport, EngineError> {
            seen.borrow_mut().extend_from_slice(paths);
            Ok(LintReport::default())
        };
        let reporter = Reporter::with_preprocessor(engine, |_: &FileDescriptor| ())
            .sink(SharedBuffer::default());

        reporter.run(&file()).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![PathBuf::from("/home/me/project/my-tests.e2e-spec.js")]
        );
    }

    #[test]
    fn test_clean_report_prints_nothing_and_still_preprocesses() {
        let calls = Cell::new(0);
        let buffer = SharedBuffer::default();
        let reporter = Reporter::with_preprocessor(engine(vec![]), |f: &FileDescriptor| {
            calls.set(calls.get() + 1);
            f.clone()
        })
        .sink(buffer.clone());

        let preprocessed = reporter.run(&file()).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(preprocessed, file());
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_custom_preprocessor_result_is_returned_unchanged() {
        let reporter = Reporter::with_preprocessor(
            engine(vec![indent_error()]),
            |_: &FileDescriptor| "custom preprocessed file!",
        )
        .sink(SharedBuffer::default());

        assert_eq!(reporter.run(&file()).unwrap(), "custom preprocessed file!");
    }

    #[test]
    fn test_file_reaches_the_preprocessor_untouched() {
        let file = file()
            .with_extra("shouldWatch", serde_json::json!(true))
            .with_extra("browser", serde_json::json!({"name": "chrome"}));
        let reporter = Reporter::with_preprocessor(
            engine(vec![indent_error()]),
            |f: &FileDescriptor| f.clone(),
        )
        .sink(SharedBuffer::default());

        let received = reporter.run(&file).unwrap();

        assert_eq!(received, file);
        assert_eq!(received.extra.get("shouldWatch"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_preprocessor_failure_is_returned_unchanged() {
        let reporter = Reporter::with_preprocessor(
            engine(vec![]),
            |_: &FileDescriptor| -> Result<(), String> { Err("bundle failed".to_string()) },
        )
        .sink(SharedBuffer::default());

        assert_eq!(reporter.run(&file()).unwrap(), Err("bundle failed".to_string()));
    }

    #[test]
    fn test_engine_failure_skips_preprocessing() {
        let calls = Cell::new(0);
        let reporter = Reporter::with_preprocessor(
            failing_engine("No ESLint configuration found"),
            |_: &FileDescriptor| calls.set(calls.get() + 1),
        )
        .sink(SharedBuffer::default());

        let err = reporter.run(&file()).unwrap_err();

        assert_eq!(err.to_string(), "No ESLint configuration found");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_errors_and_warnings_are_printed_apart() {
        let buffer = SharedBuffer::default();
        let reporter = Reporter::with_preprocessor(
            engine(vec![
                indent_error(),
                Diagnostic::new(54, 9, Severity::Warning, "\"a\" is not defined", "no-undef"),
            ]),
            |_: &FileDescriptor| (),
        )
        .sink(buffer.clone())
        .cwd("/home/me");

        reporter.run(&file()).unwrap();
        let output = buffer.contents();

        assert!(output.contains("\nERROR in /home/me/project/my-tests.e2e-spec.js\n"));
        assert!(output.contains("\nWARNING in /home/me/project/my-tests.e2e-spec.js\n"));
        assert!(output.contains("\nproject/my-tests.e2e-spec.js\n"));

        let (error_section, warning_section) = output.split_once("WARNING in").unwrap();
        assert_eq!(error_section.matches("Expected indentation").count(), 1);
        assert!(!error_section.contains("is not defined"));
        assert_eq!(warning_section.matches("is not defined").count(), 1);
        assert!(!warning_section.contains("Expected indentation"));
    }

    #[test]
    fn test_report_returns_the_lint_report() {
        let reporter = Reporter::with_preprocessor(engine(vec![indent_error()]), |_: &FileDescriptor| ())
            .sink(SharedBuffer::default());

        let report = reporter.report(&file()).unwrap();

        assert_eq!(report.error_count, 1);
        assert_eq!(report.results[0].messages[0], indent_error());
    }

    #[test]
    fn test_working_dir() {
        let unreadable = || Err(io::Error::new(io::ErrorKind::NotFound, "removed"));

        assert_eq!(working_dir(Some(Path::new("/home/me")), unreadable), PathBuf::from("/home/me"));
        assert_eq!(working_dir(None, || Ok(PathBuf::from("/srv"))), PathBuf::from("/srv"));
        assert_eq!(working_dir(None, unreadable), PathBuf::from("."));
    }

    #[test]
    fn test_default_preprocessor_uses_default_options() {
        let reporter = create_reporter(engine(vec![]));
        assert_eq!(reporter.preprocessor().options(), &BundleOptions::default());
    }

    #[test]
    fn test_default_preprocessor_receives_the_file() -> anyhow::Result<()> {
        let directory = tempfile::TempDir::new()?;
        let input = directory.path().join("spec.js");
        let output = directory.path().join("out").join("spec.js");
        std::fs::write(&input, "describe('app', () => {});\n")?;

        let file = FileDescriptor::new(&input, &output);
        let reporter = create_reporter(engine(vec![])).sink(SharedBuffer::default());
        let preprocessed = reporter.run(&file)??;

        assert_eq!(preprocessed, output);
        assert_eq!(
            std::fs::read_to_string(Path::new(&output))?,
            "describe('app', () => {});\n"
        );
        Ok(())
    }

    #[test]
    fn test_reporters_chain() {
        let outer_calls = Cell::new(0);
        let inner = Reporter::with_preprocessor(engine(vec![]), |_: &FileDescriptor| 42)
            .sink(SharedBuffer::default());
        let outer_engine = |_: &[PathBuf]| -> Result<LintReport, EngineError> {
            outer_calls.set(outer_calls.get() + 1);
            Ok(LintReport::default())
        };
        let outer = Reporter::with_preprocessor(outer_engine, inner).sink(SharedBuffer::default());

        let result = outer.run(&file()).unwrap().unwrap();

        assert_eq!(result, 42);
        assert_eq!(outer_calls.get(), 1);
    }

    #[test]
    fn test_future_is_returned_without_being_polled() {
        use std::future::Future;
        use std::pin::Pin;
        use std::task::{Context, Poll};

        struct Deferred<'a>(&'a Cell<bool>);

        impl Future for Deferred<'_> {
            type Output = &'static str;

            fn poll(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Self::Output> {
                self.0.set(true);
                Poll::Ready("bundled later")
            }
        }

        let polled = Cell::new(false);
        let reporter =
            Reporter::with_preprocessor(engine(vec![]), |_: &FileDescriptor| Deferred(&polled))
                .sink(SharedBuffer::default());

        let future = reporter.run(&file()).unwrap();
        assert!(!polled.get());
        drop(future);
    }
}
