//! AI bundle: text generation with a degraded echo mode
//!
//! Without a HuggingFace credential the command echoes the prompt back with
//! a notice and never goes to the network.

use std::sync::Arc;

use crate::application::messaging::{Bundle, Command};
use crate::domain::entities::Reply;
use crate::infrastructure::api::TextGen;

const ASK_USAGE: &str = "Usage: /ask your question";
const ASK_FALLBACK: &str = "AI API error or timeout";

/// Hard cap on the generated reply length, in characters
const MAX_REPLY_CHARS: usize = 3000;

pub fn bundle(textgen: Option<Arc<dyn TextGen>>) -> Bundle {
    Bundle::new("ai").command(
        Command::new("ask", "Ask AI", move |inv| {
            let textgen = textgen.clone();
            async move {
                let prompt = inv.args_trimmed();
                if prompt.is_empty() {
                    return Reply::text(ASK_USAGE);
                }
                let Some(api) = textgen else {
                    return Reply::text(format!(
                        "Sorry, no external AI key configured. You asked: {}",
                        prompt
                    ));
                };
                match api.generate(prompt).await {
                    Ok(text) => Reply::text(truncate_chars(text, MAX_REPLY_CHARS)),
                    Err(e) => {
                        tracing::warn!(error = %e, "text generation failed");
                        Reply::text(ASK_FALLBACK)
                    }
                }
            }
        })
        .with_args_hint("<text>"),
    )
}

fn truncate_chars(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        return text;
    }
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::messaging::Router;
    use crate::domain::entities::{Invocation, User};
    use crate::infrastructure::api::{ApiError, ApiResult};

    struct MockTextGen {
        calls: AtomicUsize,
        response: Result<String, fn() -> ApiError>,
    }

    impl MockTextGen {
        fn ok(text: impl Into<String>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Ok(text.into()),
            }
        }

        fn err(make: fn() -> ApiError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Err(make),
            }
        }
    }

    #[async_trait]
    impl TextGen for MockTextGen {
        async fn generate(&self, _prompt: &str) -> ApiResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    async fn dispatch(textgen: Option<Arc<dyn TextGen>>, args: &str) -> Reply {
        let mut router = Router::new();
        router.register(bundle(textgen)).unwrap();
        router
            .dispatch(Invocation::new("1", "ask", args, User::anonymous()))
            .await
            .expect("ask is registered")
    }

    #[tokio::test]
    async fn empty_prompt_replies_usage_and_makes_no_call() {
        let api = Arc::new(MockTextGen::ok("unused"));
        let reply = dispatch(Some(api.clone()), "").await;
        assert_eq!(reply, Reply::text("Usage: /ask your question"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn without_credential_echoes_the_prompt() {
        let reply = dispatch(None, "hello").await;
        assert_eq!(
            reply,
            Reply::text("Sorry, no external AI key configured. You asked: hello")
        );
    }

    #[tokio::test]
    async fn generated_text_passes_through() {
        let api = Arc::new(MockTextGen::ok("the answer is 42"));
        let reply = dispatch(Some(api.clone()), "meaning of life").await;
        assert_eq!(reply, Reply::text("the answer is 42"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn long_output_is_truncated_to_exactly_3000_chars() {
        let api = Arc::new(MockTextGen::ok("x".repeat(4000)));
        let Reply::Text(text) = dispatch(Some(api), "tell me everything").await else {
            panic!("ask should reply with text");
        };
        assert_eq!(text.chars().count(), 3000);
    }

    #[tokio::test]
    async fn failures_map_to_the_single_fallback() {
        for make in [
            (|| ApiError::Timeout) as fn() -> ApiError,
            || ApiError::Status(502),
            || ApiError::Decode("html error page".to_string()),
            || ApiError::MissingField("generated_text"),
        ] {
            let api = Arc::new(MockTextGen::err(make));
            let reply = dispatch(Some(api), "hello").await;
            assert_eq!(reply, Reply::text("AI API error or timeout"));
        }
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(3001);
        let out = truncate_chars(text, 3000);
        assert_eq!(out.chars().count(), 3000);

        assert_eq!(truncate_chars("short".to_string(), 3000), "short");
    }
}
