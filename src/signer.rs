use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use http::Method;
use sha1::Sha1;
use tracing::debug;

use crate::encoding::percent_encode;
use crate::nonce::{current_timestamp, generate_nonce};
use crate::{
    Result, SecretsProvider, OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_KEY_PREFIX,
    OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY,
    OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY, OAUTH_VERSION_KEY, REALM_KEY,
};

type HmacSha1 = Hmac<Sha1>;

/// The only signature method this crate speaks.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Produces the `Authorization` header for one request.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
    debug_log: bool,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
            debug_log: false,
        }
    }

    /// Emit the signature base string and signature as `debug` events.
    pub fn debug_log(self, enabled: bool) -> Self {
        Signer {
            debug_log: enabled,
            ..self
        }
    }

    /// Signs a request and returns the complete `Authorization` header value.
    ///
    /// `base_url` must not carry a query string: URL query parameters and
    /// form body parameters are passed in `request_params` instead.
    pub fn generate_signature<I, K, V>(
        self,
        method: &Method,
        base_url: &str,
        request_params: I,
    ) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (token, token_secret) = self.secrets.get_token_option_pair();

        let mut oauth_params = self.parameters.build_oauth_set(consumer_key, token)?;

        let normalized = normalize_parameters(
            request_params
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
                .chain(oauth_params.iter().map(|(k, v)| (k.to_string(), v.to_string()))),
        );
        let base = signature_base(method, base_url, &normalized);
        let signature = sign_base_string(&base, consumer_secret, token_secret.unwrap_or(""));

        if self.debug_log {
            debug!(signature_base = %base, signature = %signature, "signed request");
        }

        oauth_params.push((OAUTH_SIGNATURE_KEY, Cow::Owned(signature)));
        Ok(authorization_header(
            oauth_params.iter().map(|(k, v)| (*k, &**v)),
            self.parameters.realm.as_deref(),
        ))
    }
}

/// Per-request `oauth_*` values beyond the fixed protocol fields.
///
/// Nonce and timestamp are generated fresh for every request unless fixed
/// here, which is only useful for reproducing a known signature.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    callback: Option<Cow<'a, str>>,
    nonce: Option<Cow<'a, str>>,
    realm: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
    verifier: Option<Cow<'a, str>>,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the realm value
    ///
    /// # Note
    /// The realm is appended to the header after the `oauth_*` fields and
    /// never takes part in the signature.
    pub fn realm<T>(self, realm: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// set the oauth_verifier value
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    fn build_oauth_set<'s>(
        &'s self,
        consumer_key: &'s str,
        token: Option<&'s str>,
    ) -> Result<Vec<(&'static str, Cow<'s, str>)>> {
        let nonce: Cow<'s, str> = match self.nonce {
            Some(ref nonce) => Cow::Borrowed(&**nonce),
            None => Cow::Owned(generate_nonce()?),
        };
        let timestamp = self.timestamp.unwrap_or_else(current_timestamp);

        let mut set = vec![
            (OAUTH_CONSUMER_KEY, Cow::Borrowed(consumer_key)),
            (OAUTH_NONCE_KEY, nonce),
            (OAUTH_SIGNATURE_METHOD_KEY, Cow::Borrowed(SIGNATURE_METHOD)),
            (OAUTH_TIMESTAMP_KEY, Cow::Owned(timestamp.to_string())),
            (OAUTH_VERSION_KEY, Cow::Borrowed(OAUTH_VERSION)),
        ];
        if let Some(ref callback) = self.callback {
            set.push((OAUTH_CALLBACK_KEY, Cow::Borrowed(&**callback)));
        }
        if let Some(token) = token {
            set.push((OAUTH_TOKEN_KEY, Cow::Borrowed(token)));
        }
        if let Some(ref verifier) = self.verifier {
            set.push((OAUTH_VERIFIER_KEY, Cow::Borrowed(&**verifier)));
        }
        Ok(set)
    }
}

/// Builds the canonical parameter string.
///
/// Every key and value is percent-encoded, entries are sorted by encoded key
/// and then encoded value, and joined as `k=v&k=v`. Repeated keys stay
/// separate entries.
pub fn normalize_parameters<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded = params
        .into_iter()
        .map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
        .collect::<Vec<_>>();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// `METHOD&encoded(base_url)&encoded(normalized)`.
pub fn signature_base(method: &Method, base_url: &str, normalized: &str) -> String {
    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(base_url),
        percent_encode(normalized)
    )
}

/// `encoded(consumer_secret)&encoded(token_secret)`; the token secret is empty
/// before a request token has been issued.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Base64 encoded HMAC-SHA1 of `base` under the derived signing key.
pub fn sign_base_string(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = signing_key(consumer_secret, token_secret);
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Signs an already normalized parameter string.
pub fn sign(
    method: &Method,
    base_url: &str,
    normalized: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    sign_base_string(
        &signature_base(method, base_url, normalized),
        consumer_secret,
        token_secret,
    )
}

/// Renders `OAuth k1="v1", k2="v2"` from the `oauth_*` entries of `params`,
/// sorted by key. Entries without the `oauth_` prefix are dropped.
pub fn authorization_header<I, K, V>(params: I, realm: Option<&str>) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut oauth_params = params
        .into_iter()
        .filter(|(k, _)| k.as_ref().starts_with(OAUTH_KEY_PREFIX))
        .map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
        .collect::<Vec<_>>();
    oauth_params.sort();

    let mut fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>();
    if let Some(realm) = realm {
        fields.push(format!("{}=\"{}\"", REALM_KEY, percent_encode(realm)));
    }
    format!("OAuth {}", fields.join(", "))
}
