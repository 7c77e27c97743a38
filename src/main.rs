// src/main.rs

use dotenvy::dotenv;
use quizhub::config::Config;
use quizhub::models::question::QuestionBank;
use quizhub::routes;
use quizhub::state::AppState;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to open the SQLite database");

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    // Create AppState
    let state = AppState::new(pool);

    // Seed the bundled question bank on first run
    if let Err(e) = seed_question_bank(&state).await {
        tracing::error!("Failed to seed question bank: {:?}", e);
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

/// Loads the bundled default questions when the bank is empty, so a fresh
/// install has something to quiz on. An already-populated bank is left alone.
async fn seed_question_bank(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    if !state.questions.list_subjects().await?.is_empty() {
        return Ok(());
    }

    let bank: QuestionBank = serde_json::from_str(include_str!("../data/seed_questions.json"))?;

    let mut seeded = 0;
    for (subject, questions) in &bank {
        for question in questions {
            state.questions.add_question(subject, question).await?;
            seeded += 1;
        }
    }

    tracing::info!("Seeded {} questions across {} subjects", seeded, bank.len());
    Ok(())
}
