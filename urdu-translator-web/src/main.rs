use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use clap::{Arg, Command};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use urdu_translator::TranslatorForm;
use urdu_translator::mt::{
    CompletionProvider, GeminiProvider, MockMode, MockProvider, MtError, gemini,
};

mod page;

#[derive(Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub form: Arc<TranslatorForm>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_path = gemini::load_dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let matches = Command::new("urdu-translator-web")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Web form for the English to Urdu translation agent")
        .arg(
            Arg::new("bind")
                .long("bind")
                .short('b')
                .help("Address to listen on")
                .default_value("127.0.0.1:3000"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock provider instead of Gemini (echoes the input)")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // A missing key stops the server before any page is served
    let provider: Arc<dyn CompletionProvider> = if matches.get_flag("mock") {
        Arc::new(MockProvider::new(MockMode::Echo))
    } else {
        let provider = GeminiProvider::from_env()
            .map_err(|e| format!("Failed to initialize provider: {}", e))?;
        Arc::new(provider)
    };

    let state = AppState {
        form: Arc::new(TranslatorForm::new(provider)),
    };
    info!(
        provider = state.form.provider_name(),
        "Starting Urdu translator web server"
    );

    let app = app(state);

    let bind = matches
        .get_one::<String>("bind")
        .map(String::as_str)
        .unwrap_or("127.0.0.1:3000");
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index).post(submit_form))
        .route("/api/translate", post(translate_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn serve_index() -> impl IntoResponse {
    Html(page::render("", None))
}

/// The button's click handler: synchronous from the form's point of view
async fn submit_form(
    State(state): State<AppState>,
    Form(input): Form<FormInput>,
) -> Html<String> {
    let outcome = state.form.submit(&input.text);
    Html(page::render(&input.text, Some(&outcome)))
}

async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(chars = request.text.chars().count(), "API translation request");

    match state.form.translate(&request.text) {
        Ok(translation) => Ok(Json(TranslateResponse { translation })),
        Err(MtError::EmptyInput) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: urdu_translator::form::EMPTY_WARNING.to_string(),
            }),
        )),
        Err(e) => {
            tracing::error!("translation failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Translation service error: {}", e),
                }),
            ))
        }
    }
}
