/*!
twitter-oauth1: an OAuth 1.0a request-signing client for the Twitter REST API 1.1.

# Overview

Every request is signed with HMAC-SHA1 as described in RFC 5849: a fresh
nonce and timestamp, the normalized parameter string, the signature base
string and the `Authorization: OAuth ...` header are built per call. The
HTTP round-trip goes through the [`HttpTransport`] trait, implemented for
`reqwest::Client` out of the box.

Consumer credentials are fixed in the [`Config`]; user tokens are passed to
each call, so a single [`Client`] can be shared between users and tasks.

# How to use

## Basic usecase 1 - Acquiring OAuth token & secret

```ignore
use std::io;
use twitter_oauth1::{Client, Config, Token};

let client = Client::new(Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]"));

// step 1: acquire request token & token secret
let request_token = client.request_token("oob").await?;

// step 2. acquire user pin
println!("please access to: {}", client.authorize_url(&request_token.oauth_token));
println!("input pin: ");
let mut user_input = String::new();
io::stdin().read_line(&mut user_input)?;
let pin = user_input.trim();

// step 3. acquire access token
let access = client.access_token(&Token::from(&request_token), pin).await?;
println!(
    "your token and secret is: \n token: {}\n secret: {}",
    access.oauth_token, access.oauth_token_secret
);
```

## Basic usecase 2 - sending the tweet

```ignore
use twitter_oauth1::{Client, Config, Token, Tweet};

let client = Client::new(Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]"));
let token = Token::new("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let resp = client.tweet(&token, &Tweet::new("Hello, Twitter!")).await?;
```

## Arbitrary resources

```ignore
use http::Method;
use twitter_oauth1::{Client, Config, Parameters, Token};

let client = Client::new(Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]"));
let token = Token::new("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let req = client
    .api_request(Method::GET, "statuses/user_timeline.json")
    .query(Parameters::new().push("screen_name", "twitterapi"));
let resp = client.send(req, Some(&token)).await?;
```
*/
mod client;
mod config;
pub mod encoding;
mod endpoints;
mod error;
mod handshake;
mod media;
pub mod nonce;
mod request;
mod secrets;
pub mod signer;
#[cfg(test)]
mod test_support;
mod token_reader;
mod transport;

// exposed to external program
pub use client::Client;
pub use config::Config;
pub use endpoints::{HomeTimeline, Tweet, UploadedMedia};
pub use error::{Error, MalformedResponse, Result, TokenReaderResult};
pub use handshake::{Account, VerifyCredentials};
pub use media::MediaFile;
pub use request::{ApiRequest, Parameters, SignedRequest};
pub use secrets::{Secrets, SecretsProvider, Token};
pub use signer::{OAuthParameters, Signer};
pub use token_reader::{read_oauth_token, TokenReader, TokenReaderFuture, TokenResponse};
pub use transport::{HttpResponse, HttpTransport};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_callback_confirmed`.
pub const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
pub(crate) const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
