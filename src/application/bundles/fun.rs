//! Fun bundle: joke, quote, meme

use std::sync::Arc;

use crate::application::messaging::{Bundle, Command};
use crate::domain::entities::Reply;
use crate::infrastructure::api::FunApi;

const JOKE_FALLBACK: &str = "Joke API error";
const QUOTE_FALLBACK: &str = "Quote API error";
const MEME_FALLBACK: &str = "No meme for now";

pub fn bundle(api: Arc<dyn FunApi>) -> Bundle {
    let joke_api = api.clone();
    let quote_api = api.clone();
    let meme_api = api;

    Bundle::new("fun")
        .command(Command::new("joke", "Random joke", move |_inv| {
            let api = joke_api.clone();
            async move {
                match api.joke().await {
                    Ok(joke) => Reply::text(joke),
                    Err(e) => {
                        tracing::warn!(error = %e, "joke fetch failed");
                        Reply::text(JOKE_FALLBACK)
                    }
                }
            }
        }))
        .command(Command::new(
            "quote",
            "Random inspirational quote",
            move |_inv| {
                let api = quote_api.clone();
                async move {
                    match api.quote().await {
                        Ok(quote) => Reply::text(format!("\"{}\" — {}", quote.text, quote.author)),
                        Err(e) => {
                            tracing::warn!(error = %e, "quote fetch failed");
                            Reply::text(QUOTE_FALLBACK)
                        }
                    }
                }
            },
        ))
        .command(Command::new("meme", "Random meme", move |_inv| {
            let api = meme_api.clone();
            async move {
                match api.meme().await {
                    Ok(meme) => Reply::photo(meme.url, meme.title),
                    Err(e) => {
                        tracing::warn!(error = %e, "meme fetch failed");
                        Reply::text(MEME_FALLBACK)
                    }
                }
            }
        }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::messaging::Router;
    use crate::domain::entities::{Invocation, User};
    use crate::infrastructure::api::{ApiError, ApiResult, Meme, Quote};

    /// FunApi double; `error` simulates the same failure on every endpoint
    #[derive(Default)]
    struct MockFun {
        calls: AtomicUsize,
        error: Option<fn() -> ApiError>,
    }

    #[async_trait]
    impl FunApi for MockFun {
        async fn joke(&self) -> ApiResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(make) => Err(make()),
                None => Ok("A joke so short it fits one line.".to_string()),
            }
        }

        async fn quote(&self) -> ApiResult<Quote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(make) => Err(make()),
                None => Ok(Quote {
                    text: "Stay hungry".to_string(),
                    author: "Somebody".to_string(),
                }),
            }
        }

        async fn meme(&self) -> ApiResult<Meme> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(make) => Err(make()),
                None => Ok(Meme {
                    url: "https://example.com/meme.jpg".to_string(),
                    title: "it compiles".to_string(),
                }),
            }
        }
    }

    async fn dispatch(api: Arc<MockFun>, command: &str) -> Reply {
        let mut router = Router::new();
        router.register(bundle(api)).unwrap();
        router
            .dispatch(Invocation::new("1", command, "", User::anonymous()))
            .await
            .expect("command is registered")
    }

    #[tokio::test]
    async fn joke_passes_text_through() {
        let api = Arc::new(MockFun::default());
        let reply = dispatch(api.clone(), "joke").await;
        assert_eq!(reply, Reply::text("A joke so short it fits one line."));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn quote_is_formatted_with_author() {
        let reply = dispatch(Arc::new(MockFun::default()), "quote").await;
        assert_eq!(reply, Reply::text("\"Stay hungry\" — Somebody"));
    }

    #[tokio::test]
    async fn meme_replies_with_photo() {
        let reply = dispatch(Arc::new(MockFun::default()), "meme").await;
        assert_eq!(
            reply,
            Reply::photo("https://example.com/meme.jpg", "it compiles")
        );
    }

    #[tokio::test]
    async fn failures_map_to_documented_fallbacks() {
        for (command, fallback) in [
            ("joke", "Joke API error"),
            ("quote", "Quote API error"),
            ("meme", "No meme for now"),
        ] {
            for make in [
                (|| ApiError::Timeout) as fn() -> ApiError,
                || ApiError::Status(500),
                || ApiError::Decode("not json".to_string()),
                || ApiError::MissingField("joke"),
            ] {
                let api = Arc::new(MockFun {
                    calls: AtomicUsize::new(0),
                    error: Some(make),
                });
                let reply = dispatch(api, command).await;
                assert_eq!(reply, Reply::text(fallback), "command /{}", command);
            }
        }
    }
}
