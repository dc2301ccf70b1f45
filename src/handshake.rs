//! The three-legged OAuth handshake and credential verification.
//!
//! 1. [`Client::request_token`] obtains a temporary token bound to a callback.
//! 2. The user is sent to [`Client::authorize_url`] and comes back with a
//!    verifier (or a PIN for the `oob` callback).
//! 3. [`Client::access_token`] trades the temporary token and the verifier
//!    for the user's access token.
//!
//! Each step is an independent call; nothing is kept between them except
//! what the caller passes back in.

use std::collections::HashMap;

use http::Method;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::encoding::percent_encode;
use crate::{
    Client, Error, HttpTransport, MalformedResponse, OAuthParameters, Parameters, Result, Token,
    TokenReader, TokenResponse, OAUTH_VERIFIER_KEY,
};

const REQUEST_TOKEN_RESOURCE: &str = "request_token";
const AUTHORIZE_RESOURCE: &str = "authorize";
const ACCESS_TOKEN_RESOURCE: &str = "access_token";
const VERIFY_CREDENTIALS_RESOURCE: &str = "account/verify_credentials.json";

/// Query parameters of `account/verify_credentials`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_entities: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_email: Option<bool>,
}

/// The authenticated user as returned by `account/verify_credentials`.
///
/// `id` is kept as a string whatever its JSON representation, since user IDs
/// do not fit in a double.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    /// Every other field of the response.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Unsigned(n) => n.to_string(),
        Id::Signed(n) => n.to_string(),
    })
}

fn log_rejected(step: &'static str) -> impl Fn(Error) -> Error {
    move |err| {
        if let Error::Rejected { status, .. } = &err {
            warn!(step, status = %status, "oauth step rejected");
        }
        err
    }
}

impl<T> Client<T>
where
    T: HttpTransport,
{
    /// Step 1: obtains a request token.
    ///
    /// Pass `"oob"` as `callback_url` for PIN-based authorization.
    ///
    /// # Errors
    /// [`Error::Rejected`] when the server refuses the call,
    /// [`Error::MalformedResponse`] when the answer lacks the token pair or
    /// does not confirm the callback.
    pub async fn request_token(&self, callback_url: &str) -> Result<TokenResponse> {
        let req = self
            .oauth_request(Method::POST, REQUEST_TOKEN_RESOURCE)
            .oauth_parameters(OAuthParameters::new().callback(callback_url));
        let token = self
            .send(req, None)
            .await?
            .parse_oauth_token()
            .map_err(log_rejected(REQUEST_TOKEN_RESOURCE))?;
        if !token.callback_confirmed() {
            return Err(MalformedResponse::CallbackNotConfirmed.into());
        }
        Ok(token)
    }

    /// Step 2: where to send the user to approve `request_token`.
    pub fn authorize_url(&self, request_token: &str) -> String {
        format!(
            "{}{}?oauth_token={}",
            self.config().oauth_url_base,
            AUTHORIZE_RESOURCE,
            percent_encode(request_token)
        )
    }

    /// Step 3: exchanges the request token and the user's verifier for an
    /// access token. The call is signed with the request-token secret.
    ///
    /// # Errors
    /// Same as [`Client::request_token`], minus the callback check.
    pub async fn access_token(&self, request_token: &Token, verifier: &str) -> Result<TokenResponse> {
        let req = self
            .oauth_request(Method::POST, ACCESS_TOKEN_RESOURCE)
            .form(Parameters::new().push(OAUTH_VERIFIER_KEY, verifier));
        self.send(req, Some(request_token))
            .await?
            .parse_oauth_token()
            .map_err(log_rejected(ACCESS_TOKEN_RESOURCE))
    }

    /// Checks that `token` is a valid access token and returns its user.
    ///
    /// # Errors
    /// [`Error::Rejected`] for an invalid or revoked token,
    /// [`Error::MalformedResponse`] when the body is not the expected JSON.
    pub async fn verify_credentials(
        &self,
        token: &Token,
        params: &VerifyCredentials,
    ) -> Result<Account> {
        let req = self
            .api_request(Method::GET, VERIFY_CREDENTIALS_RESOURCE)
            .query(Parameters::from_serialize(params)?);
        let resp = self
            .send(req, Some(token))
            .await?
            .error_for_status()
            .map_err(log_rejected(VERIFY_CREDENTIALS_RESOURCE))?;
        Ok(serde_json::from_str(&resp.body).map_err(MalformedResponse::from)?)
    }
}
