use std::borrow::Cow;

use crate::TokenResponse;

/// Supplies the key material a [`Signer`](crate::Signer) needs.
pub trait SecretsProvider {
    fn get_consumer_key_pair(&self) -> (&str, &str);

    fn get_token_pair_option(&self) -> Option<(&str, &str)>;

    fn get_token_option_pair(&self) -> (Option<&str>, Option<&str>) {
        self.get_token_pair_option()
            .map(|s| (Some(s.0), Some(s.1)))
            .unwrap_or((None, None))
    }
}

/// Consumer credentials, optionally paired with a user token.
///
/// `Secrets<'a, ()>` carries no token and signs with an empty token secret,
/// which is what the request-token step needs.
#[derive(Debug, Clone)]
pub struct Secrets<'a, T> {
    token: T,
    token_secret: T,
    consumer_key: Cow<'a, str>,
    consumer_secret: Cow<'a, str>,
}

impl<'a> Secrets<'a, ()> {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            token: (),
            token_secret: (),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn token<TKey, TSecret>(
        self,
        token: TKey,
        token_secret: TSecret,
    ) -> Secrets<'a, Cow<'a, str>>
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            token: token.into(),
            token_secret: token_secret.into(),
            consumer_key: self.consumer_key,
            consumer_secret: self.consumer_secret,
        }
    }

    /// Borrows these consumer credentials together with `token` for a single
    /// call, leaving `self` untouched.
    pub fn with_token<'b>(&'b self, token: &'b Token) -> Secrets<'b, Cow<'b, str>> {
        Secrets {
            token: Cow::Borrowed(token.token.as_str()),
            token_secret: Cow::Borrowed(token.secret.as_str()),
            consumer_key: Cow::Borrowed(&*self.consumer_key),
            consumer_secret: Cow::Borrowed(&*self.consumer_secret),
        }
    }
}

impl SecretsProvider for Secrets<'_, ()> {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option(&self) -> Option<(&str, &str)> {
        None
    }
}

impl SecretsProvider for Secrets<'_, Cow<'_, str>> {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option(&self) -> Option<(&str, &str)> {
        Some((&self.token, &self.token_secret))
    }
}

/// A user token and its secret, either the temporary request token or the
/// final access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
    pub secret: String,
}

impl Token {
    pub fn new<TKey, TSecret>(token: TKey, secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Token {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl From<TokenResponse> for Token {
    fn from(resp: TokenResponse) -> Self {
        Token {
            token: resp.oauth_token,
            secret: resp.oauth_token_secret,
        }
    }
}

impl From<&TokenResponse> for Token {
    fn from(resp: &TokenResponse) -> Self {
        Token::new(resp.oauth_token.as_str(), resp.oauth_token_secret.as_str())
    }
}
