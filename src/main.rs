use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use magic_translate::mt::{
    GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator, validate_locale,
};
use magic_translate::{
    Config, CounterScope, Error, InteractivePrompt, TablePaths, TranslationPipeline,
    translate_table,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Translate localization tables, keeping emoji, tags and :variables intact")]
struct Arguments {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Directory holding one sub-directory per language (overrides config file)
    #[arg(long, global = true, env = "MAGIC_TRANSLATE_LANG_ROOT")]
    lang_root: Option<PathBuf>,

    /// Source language code (overrides config file)
    #[arg(long = "source", global = true, env = "MAGIC_TRANSLATE_SOURCE")]
    source_locale: Option<String>,

    /// Lifetime of the :variable sentinel counter (overrides config file)
    #[arg(long, global = true, value_enum)]
    counter_scope: Option<CounterScope>,

    /// Config file (default: nearest .magic-translate.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the offline mock translator instead of Google Translate
    #[arg(long, global = true)]
    mock: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate a localization file into a target language
    Translate(TranslateArgs),
}

#[derive(Debug, Args)]
struct TranslateArgs {
    /// Table name without extension, e.g. `messages`
    file: String,

    /// Target language code, e.g. `fr`
    target: String,

    /// Accept machine translations without asking
    #[arg(long)]
    no_validation: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::from_file(path)?,
        None => Config::discover(&std::env::current_dir().context("Failed to read current directory")?)?,
    };

    if let Some(lang_root) = &global.lang_root {
        config.lang_root = lang_root.clone();
    }
    if let Some(source_locale) = &global.source_locale {
        config.source_locale = source_locale.clone();
    }
    if let Some(scope) = global.counter_scope {
        config.counter_scope = scope;
    }

    config.validate()?;
    Ok(config)
}

async fn run_translate(global: &GlobalArgs, args: &TranslateArgs) -> Result<ExitCode> {
    let mut config = load_config(global)?;
    if args.no_validation {
        config.validation = false;
    }
    validate_locale(&config.source_locale)?;
    validate_locale(&args.target)?;

    let translator: Box<dyn MachineTranslator> = if global.mock {
        Box::new(MockTranslator::new(MockMode::Suffix))
    } else {
        Box::new(GoogleTranslateProvider::from_env().context("Failed to initialize translator")?)
    };

    let mut pipeline =
        TranslationPipeline::new(translator.as_ref(), &config.source_locale, &args.target)
            .with_counter_scope(config.counter_scope);
    if config.validation {
        pipeline = pipeline.with_confirmer(InteractivePrompt::stdio());
    }

    let paths = TablePaths::resolve(&config, &args.file, &args.target);
    match translate_table(&paths, &mut pipeline, config.alignment_column).await {
        Ok(summary) => {
            info!(?summary, "done");
            println!("All good 👌");
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::SourceNotFound(path)) => {
            eprintln!("File not found ❌ ({})", path.display());
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.global.verbose);

    let result = match &args.command {
        Command::Translate(translate) => run_translate(&args.global, translate).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
