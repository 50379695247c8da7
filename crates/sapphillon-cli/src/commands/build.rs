use crate::emitter::emit_package;
use crate::errors::{BuildError, CliError};
use crate::logger;
use crate::GlobalOpts;
use clap::Args;
use colored::Colorize;
use sapphillon_ast::extract_functions;
use sapphillon_manifest::PackageDescriptor;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File written into the output directory
pub const OUTPUT_FILE_NAME: &str = "package.js";

#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// Plugin project directory containing package.toml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Directory to write package.js into (default: the project directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Outcome of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub function_count: usize,
    pub module_count: usize,
}

/// Build `<output_dir>/package.js` from the project in `project_dir`
///
/// Metadata is extracted from the entry module as written; the script body
/// comes from the bundle, so handlers see their inlined dependencies.
pub fn build_package(project_dir: &Path, output_dir: &Path) -> Result<BuildSummary, BuildError> {
    let package = PackageDescriptor::load(project_dir)?;
    debug!(
        "Building {} {} (entry {})",
        package.name, package.version, package.entry
    );

    let bundle = sapphillon_bundler::bundle(Path::new(&package.entry), project_dir)?;

    let entry_path = bundle
        .modules
        .last()
        .cloned()
        .unwrap_or_else(|| package.entry_path(project_dir));
    let source = fs::read_to_string(&entry_path).map_err(|source| BuildError::ReadEntry {
        path: entry_path.clone(),
        source,
    })?;
    let functions = extract_functions(&source);

    let script = emit_package(&bundle, &functions, &package);

    fs::create_dir_all(output_dir).map_err(|source| BuildError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let output_path = output_dir.join(OUTPUT_FILE_NAME);
    fs::write(&output_path, script).map_err(|source| BuildError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(BuildSummary {
        output_path,
        function_count: functions.len(),
        module_count: bundle.modules.len(),
    })
}

/// Handle `sapphillon build`
pub fn handle_build(cmd: BuildCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let output_dir = cmd.output.unwrap_or_else(|| cmd.project.clone());
    logger::debug(&format!(
        "Project: {}, output: {}",
        cmd.project.display(),
        output_dir.display()
    ));

    logger::spinner_start(&format!("Building {}", cmd.project.display()));
    let result = build_package(&cmd.project, &output_dir);
    logger::spinner_stop();
    let summary = result?;

    if summary.function_count == 0 {
        logger::warn("No documented exported functions found in entry module");
    }
    logger::info(&format!(
        "Bundled {} module(s) into {}",
        summary.module_count,
        summary.output_path.display()
    ));

    if !opts.quiet {
        println!(
            "{} Build complete: {}",
            "✔".green().bold(),
            summary.output_path.display()
        );
        println!("   - Found {} function(s)", summary.function_count);
    }
    Ok(())
}
