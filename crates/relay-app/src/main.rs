//! relay: a two-turn Gemini conversation traced to Arize.
//!
//! Validates credentials, boots the OTLP pipeline, runs the fixed
//! conversation, and prints a preview of both answers.

mod config;
mod conversation;

use relay_ai::{GeminiClient, GeminiConfig, Session};
use relay_telemetry::ArizeConfig;
use tracing_subscriber::EnvFilter;

use conversation::{run_multi_turn, FIRST_PROMPT, MODEL, SECOND_PROMPT};

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root — two levels up from crates/relay-app/
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

/// First 100 characters of an answer, for the printed summary.
fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}

#[tokio::main]
async fn main() {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("relay=info".parse().expect("static directive parses")),
        )
        .init();

    // Credentials first: with no Gemini key there is nothing to trace,
    // so bail before any client or span exists.
    let env = match config::AppEnv::from_env() {
        Ok(env) => env,
        Err(err) => {
            println!("Error: {err}");
            std::process::exit(1);
        }
    };

    if !env.arize_api_key_present {
        println!("Warning: ARIZE_API_KEY not set, tracing will be limited");
    }

    let guard = match relay_telemetry::init(&ArizeConfig::from_env()) {
        Ok(guard) => guard,
        Err(err) => {
            println!("❌ Error: {err}");
            std::process::exit(1);
        }
    };
    let tracer = guard.tracer();

    let client = GeminiClient::new(GeminiConfig::new(env.gemini_api_key).with_model(MODEL));
    let mut session = Session::new();

    println!("Starting multi-turn conversation with Arize tracing...");

    match run_multi_turn(&client, &mut session, &tracer).await {
        Ok((first, second)) => {
            println!("\n=== Conversation Results ===");
            println!("Q1: {FIRST_PROMPT}");
            println!("A1: {}...", preview(&first));
            println!("\nQ2: {SECOND_PROMPT}");
            println!("A2: {}...", preview(&second));

            println!("\n✅ Conversation completed successfully!");
            println!("Check your Arize dashboard for traces and spans.");

            if let Err(err) = guard.shutdown() {
                tracing::warn!("telemetry shutdown failed: {err}");
            }
        }
        Err(err) => {
            let _ = guard.shutdown();
            println!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn preview_leaves_short_answers_unmodified() {
        assert_eq!(preview("Paris"), "Paris");
        assert_eq!(preview("Rayleigh scattering"), "Rayleigh scattering");
    }

    #[test]
    fn preview_caps_at_one_hundred_characters() {
        let long = "a".repeat(250);
        assert_eq!(preview(&long).chars().count(), 100);

        // Multi-byte characters count as characters, not bytes.
        let unicode = "é".repeat(150);
        assert_eq!(preview(&unicode).chars().count(), 100);
    }

    #[test]
    fn preview_of_empty_answer_is_empty() {
        assert_eq!(preview(""), "");
    }
}
