use crate::engine::{CommandEngine, DEFAULT_LINT_COMMAND, default_lint_args};
use crate::preprocessor::BundleOptions;
use crate::toml::TomlOptions;

/// Everything needed to build a reporter, once `prelint.toml` and the
/// command line have been merged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub engine: CommandEngine,
    pub bundle: BundleOptions,
    pub colored: bool,
}

/// Settings from the command line. They take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct ArgsConfig {
    pub no_color: bool,
}

pub fn build_config(args: &ArgsConfig, options: TomlOptions) -> Config {
    let lint = options.lint.unwrap_or_default();
    let engine = CommandEngine::new(
        lint.command.unwrap_or_else(|| DEFAULT_LINT_COMMAND.to_string()),
        lint.args.unwrap_or_else(default_lint_args),
    );

    let defaults = BundleOptions::default();
    let bundle = options.bundle.unwrap_or_default();
    let bundle = BundleOptions {
        command: bundle.command.or(defaults.command),
        args: bundle.args.unwrap_or(defaults.args),
        create_dirs: bundle.create_dirs.unwrap_or(defaults.create_dirs),
    };

    let colored = !args.no_color && options.output.and_then(|o| o.color).unwrap_or(true);

    Config { engine, bundle, colored }
}
