//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use packfmt_common_config::{vars, ConfigLoader, Environment, PackfmtConfig};
use packfmt_common_http::{ClientOptions, HttpClient};
use packfmt_reconcile::{FileManifestSource, HttpManifestSource, ManifestSource, Markers};

use crate::commands::{FetchManifestCommand, GenerateCommand, UnknownCommand};
use crate::error::CliError;
use crate::output::Printer;

/// Regenerate the pack format table from the record and the version manifest.
#[derive(Debug, Parser)]
#[command(
    name = "packfmt",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::PACKFMT_CONFIG,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Wrap output sections in CI log groups
    #[arg(long, global = true)]
    pub ci: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Record file, overrides `paths.record`
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub record: Option<PathBuf>,

    /// Generated artifact, overrides `paths.artifact`
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub artifact: Option<PathBuf>,

    /// Manifest URL, overrides `manifest.url`
    #[arg(long, global = true, conflicts_with = "manifest_file")]
    pub manifest_url: Option<String>,

    /// Read the manifest from a saved file instead of fetching it
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub manifest_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile and rewrite the generated artifact
    Generate(GenerateCommand),

    /// List manifest versions whose pack format is unknown
    Unknown(UnknownCommand),

    /// Save a validated copy of the manifest for `--manifest-file`
    FetchManifest(FetchManifestCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Load configuration, then apply environment and flag overrides.
    pub fn load_config(&self) -> Result<PackfmtConfig, CliError> {
        let project_dir = Path::new(".");
        let loader = ConfigLoader::new(project_dir);

        let mut config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };

        if let Some(url) = Environment::get(vars::PACKFMT_MANIFEST_URL) {
            config.manifest.url = url;
        }
        if let Some(file) = Environment::get(vars::PACKFMT_MANIFEST_FILE) {
            config.manifest.file = Some(PathBuf::from(file));
        }

        if let Some(record) = &self.record {
            config.paths.record = record.clone();
        }
        if let Some(artifact) = &self.artifact {
            config.paths.artifact = artifact.clone();
        }
        if let Some(url) = &self.manifest_url {
            config.manifest.url = url.clone();
            config.manifest.file = None;
        }
        if let Some(file) = &self.manifest_file {
            config.manifest.file = Some(file.clone());
        }

        loader.validate(&config)?;
        Ok(config.resolve_paths(project_dir))
    }

    /// Execute the selected command
    pub async fn execute(self, config: PackfmtConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            printer: Printer::new(self.format, self.ci),
        };

        match self.command {
            Command::Generate(cmd) => cmd.execute(&ctx).await,
            Command::Unknown(cmd) => cmd.execute(&ctx).await,
            Command::FetchManifest(cmd) => cmd.execute(&ctx).await,
            Command::Completions(cmd) => cmd.execute(),
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut io::stdout());
        Ok(())
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: PackfmtConfig,
    pub printer: Printer,
}

impl CommandContext {
    pub fn markers(&self) -> Markers {
        Markers::new(
            self.config.artifact.begin_marker.clone(),
            self.config.artifact.end_marker.clone(),
        )
    }

    /// The configured manifest source, a saved file if one is set.
    pub fn manifest_source(&self) -> Result<Box<dyn ManifestSource>, CliError> {
        if let Some(file) = &self.config.manifest.file {
            return Ok(Box::new(FileManifestSource::new(file)));
        }

        let http = &self.config.http;
        let client = HttpClient::new(&ClientOptions {
            connect_timeout: http.connect_timeout(),
            request_timeout: http.request_timeout(),
            user_agent: http.user_agent.clone(),
        })?;
        Ok(Box::new(HttpManifestSource::new(client, &self.config.manifest.url)))
    }
}
