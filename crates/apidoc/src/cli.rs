//! CLI command structure using clap

use apidoc_core::config::{Layout, LineEnding, Profile};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apidoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an API model into Markdown pages
    Markdown(MarkdownArgs),
}

#[derive(Args)]
pub struct MarkdownArgs {
    /// API model (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory (cleared before generation)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Rendering configuration (apidoc.toml)
    #[arg(short, long, env = "APIDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Rendering profile, overrides the configuration
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Output layout, overrides the configuration
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Mark every page as a draft
    #[arg(long)]
    pub draft: bool,

    /// Line endings of written pages
    #[arg(long, value_enum)]
    pub line_ending: Option<LineEndingArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Hugo,
    Markdown,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Hugo => Profile::Hugo,
            ProfileArg::Markdown => Profile::Markdown,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Nested,
    Flat,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Nested => Layout::Nested,
            LayoutArg::Flat => Layout::Flat,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LineEndingArg {
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::Crlf,
        }
    }
}
