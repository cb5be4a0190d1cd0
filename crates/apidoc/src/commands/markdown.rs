//! Markdown command - render an API model into a documentation tree

use crate::cli::MarkdownArgs;
use anyhow::{Context, Result};
use apidoc_core::{ApiModel, Config};
use apidoc_markdown::MarkdownDocumenter;
use colored::Colorize;

/// Loads the configuration and applies command-line overrides
fn load_config(args: &MarkdownArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };

    if let Some(profile) = args.profile {
        config.render.profile = profile.into();
    }
    if let Some(layout) = args.layout {
        config.render.layout = Some(layout.into());
    }
    if args.draft {
        config.render.draft = true;
    }
    if let Some(line_ending) = args.line_ending {
        config.render.line_ending = line_ending.into();
    }

    tracing::debug!(
        profile = ?config.render.profile,
        layout = ?config.render.layout(),
        line_ending = ?config.render.line_ending,
        draft = config.render.draft,
        "configuration loaded"
    );
    Ok(config)
}

/// Generate Markdown documentation
///
/// # Arguments
///
/// * `args` - Input model, output directory and rendering overrides
/// * `verbose` - List every warning if true
pub fn run(args: MarkdownArgs, verbose: bool) -> Result<()> {
    let config = load_config(&args)?;

    if verbose {
        println!("{} Loading API model '{}'", "→".cyan(), args.input.display());
    }

    let model = ApiModel::from_file(&args.input)
        .with_context(|| format!("Failed to load API model '{}'", args.input.display()))?;
    tracing::debug!(
        input = %args.input.display(),
        entities = model.iter().count(),
        "API model loaded"
    );

    let summary = MarkdownDocumenter::new(&model, &config)
        .generate_files(&args.output)
        .with_context(|| format!("Failed to generate into '{}'", args.output.display()))?;

    if verbose {
        for warning in &summary.warnings {
            println!("{} {}", "!".yellow(), warning);
        }
    }

    let mut line = format!(
        "{} Generated {} pages in {}",
        "✓".green().bold(),
        summary.pages,
        args.output.display()
    );
    if !summary.warnings.is_empty() {
        line.push_str(&format!(
            " ({})",
            format!("{} warnings", summary.warnings.len()).yellow()
        ));
    }
    println!("{}", line);

    Ok(())
}
