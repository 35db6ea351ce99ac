//! The traced two-turn conversation.
//!
//! One outer span covers the whole conversation; each message gets a
//! nested span carrying the prompt, the reply, and the reply length. The
//! tracer and parent context are passed explicitly so the procedure runs
//! unchanged against the Arize provider or an in-memory one in tests.

use opentelemetry::trace::{Span, Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};
use relay_ai::{AiClient, AiError, Session};

pub const MODEL: &str = "gemini-2.0-flash-001";
pub const FIRST_PROMPT: &str = "What is the capital of France?";
pub const SECOND_PROMPT: &str = "Why is the sky blue?";

/// Run the two fixed prompts through the session, one attempt each.
///
/// On success both reply texts are returned and the outer span closes Ok
/// with cumulative usage attached. The first failure closes the outer
/// span with an error status carrying the failure's message and is
/// returned unchanged; no retry, no partial results.
pub async fn run_multi_turn<T>(
    client: &dyn AiClient,
    session: &mut Session,
    tracer: &T,
) -> Result<(String, String), AiError>
where
    T: Tracer,
    T::Span: Send + Sync + 'static,
{
    let span = tracer
        .span_builder("multi_turn_conversation")
        .with_attributes([
            KeyValue::new("ai.model", MODEL),
            KeyValue::new("ai.conversation.turns", 2_i64),
        ])
        .start(tracer);
    let cx = Context::new().with_span(span);

    let result: Result<(String, String), AiError> = async {
        let first = send_traced(client, session, tracer, &cx, "first_message", FIRST_PROMPT).await?;
        let second =
            send_traced(client, session, tracer, &cx, "second_message", SECOND_PROMPT).await?;
        Ok((first, second))
    }
    .await;

    let span = cx.span();
    match &result {
        Ok(_) => {
            let usage = session.usage();
            span.set_attribute(KeyValue::new(
                "ai.usage.input_tokens",
                usage.input_tokens as i64,
            ));
            span.set_attribute(KeyValue::new(
                "ai.usage.output_tokens",
                usage.output_tokens as i64,
            ));
            span.set_attribute(KeyValue::new(
                "ai.usage.total_tokens",
                usage.total_tokens() as i64,
            ));
            span.set_status(Status::Ok);
        }
        Err(err) => {
            span.record_error(err);
            span.set_status(Status::error(err.to_string()));
        }
    }
    span.end();

    result
}

/// Send one prompt inside its own child span.
async fn send_traced<T>(
    client: &dyn AiClient,
    session: &mut Session,
    tracer: &T,
    parent: &Context,
    span_name: &'static str,
    prompt: &str,
) -> Result<String, AiError>
where
    T: Tracer,
    T::Span: Send + Sync + 'static,
{
    let mut span = tracer
        .span_builder(span_name)
        .start_with_context(tracer, parent);
    span.set_attribute(KeyValue::new("ai.input", prompt.to_string()));

    match session.chat(client, prompt).await {
        Ok(text) => {
            span.set_attribute(KeyValue::new("ai.output", text.clone()));
            span.set_attribute(KeyValue::new(
                "ai.response_length",
                text.chars().count() as i64,
            ));
            span.end();
            Ok(text)
        }
        Err(err) => {
            span.set_status(Status::error(err.to_string()));
            span.end();
            Err(err)
        }
    }
}
