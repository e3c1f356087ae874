//! Clients for the keyless entertainment APIs: jokes, quotes, memes

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, ApiError, ApiResult};

const JOKE_URL: &str = "https://v2.jokeapi.dev/joke/Any?type=single";
const QUOTE_URL: &str = "https://zenquotes.io/api/random";
const MEME_URL: &str = "https://meme-api.com/gimme";

/// A quote with its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// A meme image with its title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meme {
    pub url: String,
    pub title: String,
}

/// Entertainment API surface backing the `fun` bundle
#[async_trait]
pub trait FunApi: Send + Sync {
    async fn joke(&self) -> ApiResult<String>;
    async fn quote(&self) -> ApiResult<Quote>;
    async fn meme(&self) -> ApiResult<Meme>;
}

/// reqwest-backed implementation over JokeAPI, ZenQuotes and meme-api
pub struct HttpFunClient {
    client: Client,
}

impl HttpFunClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct JokeResponse {
    joke: Option<String>,
}

#[derive(Deserialize)]
struct QuoteEntry {
    q: Option<String>,
    a: Option<String>,
}

#[derive(Deserialize)]
struct MemeResponse {
    url: Option<String>,
    title: Option<String>,
}

#[async_trait]
impl FunApi for HttpFunClient {
    async fn joke(&self) -> ApiResult<String> {
        let response = check_status(self.client.get(JOKE_URL).send().await?)?;
        let body: JokeResponse = response.json().await?;
        body.joke.ok_or(ApiError::MissingField("joke"))
    }

    async fn quote(&self) -> ApiResult<Quote> {
        let response = check_status(self.client.get(QUOTE_URL).send().await?)?;
        // ZenQuotes wraps the single random quote in an array
        let body: Vec<QuoteEntry> = response.json().await?;
        let entry = body
            .into_iter()
            .next()
            .ok_or(ApiError::Decode("empty quote array".to_string()))?;
        Ok(Quote {
            text: entry.q.ok_or(ApiError::MissingField("q"))?,
            author: entry.a.ok_or(ApiError::MissingField("a"))?,
        })
    }

    async fn meme(&self) -> ApiResult<Meme> {
        let response = check_status(self.client.get(MEME_URL).send().await?)?;
        let body: MemeResponse = response.json().await?;
        Ok(Meme {
            url: body.url.ok_or(ApiError::MissingField("url"))?,
            title: body.title.unwrap_or_default(),
        })
    }
}
