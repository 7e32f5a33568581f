use clap::{Arg, Command};
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use urdu_translator::form::{self, FormOutcome, TranslatorForm};
use urdu_translator::mt::{
    CompletionProvider, GeminiProvider, MockMode, MockProvider, ProviderConfig, gemini,
};

// Plain synchronous main: the form's bridge owns the runtime for each call.
fn main() -> ExitCode {
    // .env first, so it can also carry RUST_LOG
    let dotenv_path = gemini::load_dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    if let Some(path) = dotenv_path {
        tracing::debug!("loaded {}", path.display());
    }

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let matches = Command::new("urdu-translate")
        .version(env!("CARGO_PKG_VERSION"))
        .about(form::HEADING)
        .arg(
            Arg::new("text")
                .help("English text to translate (read from stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock provider instead of Gemini (echoes the input)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .help("Model identifier (default: gemini-2.0-flash or $GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show agent and provider details")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    // Configuration is resolved before any input is read
    let provider: Arc<dyn CompletionProvider> = if use_mock {
        Arc::new(MockProvider::new(MockMode::Echo))
    } else {
        let mut config = ProviderConfig::from_env()?;
        if let Some(model) = matches.get_one::<String>("model") {
            config = config.with_model(model.clone());
        }
        Arc::new(GeminiProvider::new(config)?)
    };

    let input = match matches.get_one::<String>("text") {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let translator = TranslatorForm::new(provider);

    if verbose {
        println!("{}", form::PAGE_TITLE);
        println!("🤖 Agent: {}", translator.agent().name);
        println!("🌐 Provider: {}", translator.provider_name());
        println!("⏳ {}", form::SPINNER_TEXT);
        println!();
    }

    match translator.submit(&input) {
        FormOutcome::Success { translation } => {
            if verbose {
                println!("✅ {}", form::SUCCESS_BANNER);
            }
            println!("{}", FormOutcome::result_line(&translation));
            Ok(ExitCode::SUCCESS)
        }
        FormOutcome::Warning { message } => {
            eprintln!("⚠️  {}", message);
            Ok(ExitCode::from(2))
        }
        FormOutcome::Failure { message } => {
            eprintln!("❌ {}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}
