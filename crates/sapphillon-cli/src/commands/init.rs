use crate::errors::{CliError, InitError};
use crate::logger;
use crate::GlobalOpts;
use clap::{Args, ValueEnum};
use colored::Colorize;
use sapphillon_config::Config;
use sapphillon_manifest::{render_manifest, ManifestTemplate, MANIFEST_FILE_NAME};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_PACKAGE_ID: &str = "com.example";
const INITIAL_VERSION: &str = "1.0.0";

const GITIGNORE_TEMPLATE: &str = r"# Build output
package.js
*.js.map

# Dependencies
node_modules/
deno.lock

# Editors
.vscode/
.idea/
*.swp
*.swo
*~

# OS
.DS_Store
Thumbs.db

# Logs and temporary files
*.log
*.tmp
tmp/
";

const INDEX_JS_TEMPLATE: &str = r#"/**
 * Adds two numbers.
 * @param {number} a - The first addend
 * @param {number} b - The second addend
 * @returns {number} The sum
 * @permission ["FileSystemRead:/etc", "FileSystemWrite:/etc"]
 */
export function add(a, b) {
  return a + b;
}
"#;

const INDEX_TS_TEMPLATE: &str = r#"/**
 * Adds two numbers.
 * @param {number} a - The first addend
 * @param {number} b - The second addend
 * @returns {number} The sum
 * @permission ["FileSystemRead:/etc", "FileSystemWrite:/etc"]
 */
export function add(a: number, b: number): number {
  return a + b;
}
"#;

/// Source language of a new plugin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    #[value(alias = "js")]
    Javascript,
    #[value(alias = "ts")]
    Typescript,
}

impl Language {
    pub fn entry_file(self) -> &'static str {
        match self {
            Language::Javascript => "index.js",
            Language::Typescript => "index.ts",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            Language::Typescript => "TypeScript",
        }
    }

    fn entry_template(self) -> &'static str {
        match self {
            Language::Javascript => INDEX_JS_TEMPLATE,
            Language::Typescript => INDEX_TS_TEMPLATE,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitCommand {
    /// Plugin name
    #[arg(value_name = "NAME")]
    pub positional_name: Option<String>,

    /// Plugin name (takes precedence over NAME)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Target directory (default: the plugin name)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<String>,

    /// Package id written to package.toml (default: config package_id or com.example)
    #[arg(long, value_name = "ID")]
    pub package_id: Option<String>,

    /// Package description (default: "Plugin package for <NAME>")
    #[arg(long)]
    pub description: Option<String>,

    /// Entry module language
    #[arg(long, value_enum)]
    pub language: Option<Language>,
}

/// Fully resolved scaffolding request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub name: String,
    pub directory: String,
    pub package_id: String,
    pub author_id: Option<String>,
    pub description: String,
    pub language: Language,
}

impl InitOptions {
    /// Apply command-line values over config defaults
    pub fn resolve(cmd: InitCommand, config: &Config) -> Result<Self, InitError> {
        let name = [cmd.name, cmd.positional_name]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .ok_or(InitError::MissingName)?;

        let language = match cmd.language {
            Some(language) => language,
            None => config
                .language
                .as_deref()
                .map(language_from_config)
                .unwrap_or_default(),
        };

        Ok(InitOptions {
            directory: cmd.directory.unwrap_or_else(|| name.clone()),
            package_id: cmd
                .package_id
                .or_else(|| config.package_id.clone())
                .unwrap_or_else(|| DEFAULT_PACKAGE_ID.to_string()),
            author_id: config.author_id.clone().filter(|a| !a.is_empty()),
            description: cmd
                .description
                .unwrap_or_else(|| format!("Plugin package for {name}")),
            language,
            name,
        })
    }

    fn manifest(&self) -> ManifestTemplate {
        ManifestTemplate {
            name: self.name.clone(),
            version: INITIAL_VERSION.to_string(),
            description: self.description.clone(),
            entry: format!("src/{}", self.language.entry_file()),
            author_id: self.author_id.clone(),
            package_id: self.package_id.clone(),
        }
    }
}

fn language_from_config(value: &str) -> Language {
    Language::from_str(value, true).unwrap_or_else(|_| {
        logger::warn(&format!(
            "Unknown language '{}' in config, using javascript",
            value
        ));
        Language::Javascript
    })
}

/// Reject directory arguments that could escape the working directory
pub fn validate_path(path: &str) -> Result<String, InitError> {
    let normalized = path.replace('\\', "/");
    if normalized.contains("../") || normalized.starts_with("..") {
        return Err(InitError::InvalidPath(path.to_string()));
    }
    Ok(normalized)
}

/// Create the project directory and its files; returns the project directory
pub fn scaffold(options: &InitOptions) -> Result<PathBuf, InitError> {
    let target = PathBuf::from(validate_path(&options.directory)?);

    match fs::metadata(&target) {
        Ok(meta) if meta.is_dir() => return Err(InitError::AlreadyExists(target)),
        Ok(_) => return Err(InitError::NotADirectory(target)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(InitError::Scaffold { path: target, source }),
    }

    if let Err(source) = write_project(&target, options) {
        if let Err(e) = fs::remove_dir_all(&target) {
            logger::debug(&format!(
                "Failed to clean up {}: {}",
                target.display(),
                e
            ));
        }
        return Err(InitError::Scaffold { path: target, source });
    }
    Ok(target)
}

fn write_project(target: &Path, options: &InitOptions) -> io::Result<()> {
    let src = target.join("src");
    fs::create_dir_all(&src)?;

    fs::write(
        target.join(MANIFEST_FILE_NAME),
        render_manifest(&options.manifest()),
    )?;
    logger::step(&format!("Created {}", MANIFEST_FILE_NAME));

    fs::write(target.join(".gitignore"), GITIGNORE_TEMPLATE)?;
    logger::step("Created .gitignore");

    let entry_file = options.language.entry_file();
    fs::write(src.join(entry_file), options.language.entry_template())?;
    logger::step(&format!("Created src/{}", entry_file));
    Ok(())
}

/// Handle `sapphillon init`
pub fn handle_init(cmd: InitCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    logger::debug("Handling init command");

    let config = Config::load().unwrap_or_else(|e| {
        logger::warn(&format!("Ignoring config file: {}", e));
        Config::default()
    });
    let options = InitOptions::resolve(cmd, &config)?;
    let target = scaffold(&options)?;

    logger::success(&format!("Created plugin package: {}", options.name));
    if !opts.quiet {
        let entry_file = options.language.entry_file();
        println!();
        println!("  Language: {}", options.language.display_name());
        println!("  Package id: {}", options.package_id);
        println!();
        println!("Next steps:");
        println!("  1. cd {}", target.display().to_string().bold());
        println!("  2. Edit src/{} to add your plugin functions", entry_file);
        println!("  3. Run 'sapphillon build' to build your package");
    }
    Ok(())
}
