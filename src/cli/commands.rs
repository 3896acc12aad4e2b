//! Command implementations for the synsearch CLI.

use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::analysis::SynonymDictionary;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{AnalysisConfig, AppConfig, InvalidNavigationPolicy};
use crate::engine::{Indexer, TantivyEngine};
use crate::error::Result;
use crate::session::{LineConsole, SearchSession};

/// Execute a CLI command.
pub fn execute_command(args: SynsearchArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    match &args.command {
        Command::Index(index_args) => build_index(index_args, config, &args),
        Command::Search(search_args) => search_index(search_args, config),
    }
}

/// Merge the configuration file (if any) with command line overrides.
pub fn resolve_config(args: &SynsearchArgs) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(synonyms) = &args.synonyms {
        config.analysis.synonyms = Some(synonyms.clone());
    }
    if args.no_stem {
        config.analysis.stem = false;
    }

    if let Command::Search(search_args) = &args.command {
        if let Some(page_size) = search_args.page_size {
            config.pager.page_size = page_size;
        }
        if let Some(overfetch) = search_args.overfetch {
            config.pager.overfetch_factor = overfetch;
        }
        if !search_args.display_fields.is_empty() {
            config.pager.display_fields = search_args.display_fields.clone();
        }
        if search_args.expand_queries {
            config.analysis.expand_queries = true;
        }
        if search_args.quit_on_invalid {
            config.pager.on_invalid_navigation = InvalidNavigationPolicy::Quit;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Load the configured synonym dictionary; problems leave it empty.
pub fn load_dictionary(analysis: &AnalysisConfig) -> Arc<SynonymDictionary> {
    let dictionary = match &analysis.synonyms {
        Some(path) => SynonymDictionary::load_or_empty(path),
        None => SynonymDictionary::new(),
    };
    Arc::new(dictionary)
}

/// Build an index from a JSON source.
fn build_index(args: &IndexArgs, config: AppConfig, cli_args: &SynsearchArgs) -> Result<()> {
    info!(
        "Indexing {} into {}",
        args.source.display(),
        args.index_dir.display()
    );
    let start = Instant::now();
    let dictionary = load_dictionary(&config.analysis);

    let report = Indexer::new(config, dictionary)
        .with_force(args.force)
        .build(&args.source, &args.index_dir)?;

    let summary = IndexSummary::new(&report, start.elapsed().as_millis() as u64);
    output_result(&summary, cli_args)
}

/// Run an interactive session against an index.
fn search_index(args: &SearchArgs, config: AppConfig) -> Result<()> {
    let dictionary = load_dictionary(&config.analysis);
    let engine = TantivyEngine::open(&args.index_dir, &config, dictionary)?;
    info!(
        "Opened {} with {} documents",
        args.index_dir.display(),
        engine.num_docs()
    );

    let mut session = SearchSession::new(&engine, LineConsole::stdio(), config.pager);
    session.run()?;
    Ok(())
}
