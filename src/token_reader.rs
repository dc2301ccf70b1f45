use std::{collections::HashMap, future::Future};

use async_trait::async_trait;
use serde::Deserialize;

use crate::encoding::decode_query_string;
use crate::{
    HttpResponse, MalformedResponse, Result, TokenReaderResult, OAUTH_CALLBACK_CONFIRMED_KEY,
    OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY,
};

/// Represents response of token acquisition.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

impl TokenResponse {
    /// `oauth_callback_confirmed`, present on request-token responses.
    pub fn callback_confirmed(&self) -> bool {
        self.remain
            .get(OAUTH_CALLBACK_CONFIRMED_KEY)
            .map_or(false, |v| v == "true")
    }

    /// `user_id`, present on access-token responses.
    pub fn user_id(&self) -> Option<&str> {
        self.remain.get("user_id").map(String::as_str)
    }

    /// `screen_name`, present on access-token responses.
    pub fn screen_name(&self) -> Option<&str> {
        self.remain.get("screen_name").map(String::as_str)
    }
}

/// Add parse_oauth_token feature to HttpResponse.
// this trait is sealed
pub trait TokenReader: private::Sealed {
    fn parse_oauth_token(self) -> Result<TokenResponse>;
}

impl TokenReader for HttpResponse {
    fn parse_oauth_token(self) -> Result<TokenResponse> {
        let resp = self.error_for_status()?;
        Ok(read_oauth_token(resp.body)?)
    }
}

/// Add parse_oauth_token feature to Future of HttpResponse.
// this trait is also sealed
#[async_trait(?Send)]
pub trait TokenReaderFuture: private::SealedWrapper {
    async fn parse_oauth_token(self) -> Result<TokenResponse>;
}

#[async_trait(?Send)]
impl<T> TokenReaderFuture for T
where
    T: Future<Output = Result<HttpResponse>>,
{
    async fn parse_oauth_token(self) -> Result<TokenResponse> {
        self.await?.parse_oauth_token()
    }
}

/// Parses a `key=value&...` token body. Keys without a value read as empty
/// strings; `oauth_token` and `oauth_token_secret` must be present.
pub fn read_oauth_token(text: String) -> TokenReaderResult<TokenResponse> {
    let mut destructured = decode_query_string(&text)
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect::<HashMap<String, String>>();
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: destructured,
        }),
        (None, _) => Err(MalformedResponse::TokenKeyNotFound(OAUTH_TOKEN_KEY, text)),
        (_, _) => Err(MalformedResponse::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text,
        )),
    }
}

mod private {
    use std::future::Future;

    use crate::{HttpResponse, Result};

    pub trait Sealed {}
    impl Sealed for HttpResponse {}
    pub trait SealedWrapper {}
    impl<T> SealedWrapper for T where T: Future<Output = Result<HttpResponse>> {}
}
