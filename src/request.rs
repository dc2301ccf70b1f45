use std::borrow::Cow;

use http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::Method;
use serde::Serialize;
use tracing::debug;

use crate::encoding::encode_pairs;
use crate::{OAuthParameters, Result, SecretsProvider, Signer};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Ordered request parameters. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a pair; an existing pair with the same key is kept.
    pub fn push<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Flattens a serializable record into pairs, the same way a form or a
    /// query string would carry it. `None` fields should be skipped with
    /// `#[serde(skip_serializing_if = "Option::is_none")]`.
    ///
    /// # Errors
    /// This method fails when `value` is not a flat struct, map or sequence of
    /// pairs.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(value)?;
        Ok(url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key=value&key=value` with both sides percent-encoded, insertion order
    /// kept.
    pub fn encode(&self) -> String {
        encode_pairs(self.iter())
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Parameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Describes one API call before it is signed.
///
/// The base URL travels with the request, so handshake calls against the
/// OAuth host never touch the configured API base.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    method: Method,
    base_url: Cow<'a, str>,
    resource: Cow<'a, str>,
    query: Parameters,
    form: Parameters,
    oauth: OAuthParameters<'a>,
}

impl<'a> ApiRequest<'a> {
    pub fn new<TBase, TResource>(method: Method, base_url: TBase, resource: TResource) -> Self
    where
        TBase: Into<Cow<'a, str>>,
        TResource: Into<Cow<'a, str>>,
    {
        ApiRequest {
            method,
            base_url: base_url.into(),
            resource: resource.into(),
            query: Parameters::new(),
            form: Parameters::new(),
            oauth: OAuthParameters::new(),
        }
    }

    /// Set the URL query parameters.
    pub fn query(self, query: Parameters) -> Self {
        ApiRequest { query, ..self }
    }

    /// Set the form body parameters.
    ///
    /// # Note
    /// Only `POST` and `PUT` carry a body. For any other method these
    /// parameters are neither sent nor signed.
    pub fn form(self, form: Parameters) -> Self {
        ApiRequest { form, ..self }
    }

    /// Set the additional `oauth_*` values.
    pub fn oauth_parameters(self, oauth: OAuthParameters<'a>) -> Self {
        ApiRequest { oauth, ..self }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Base URL plus resource path, without query string. This is the URL
    /// that enters the signature base.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.resource)
    }

    /// The wire URL: endpoint plus the query parameters in insertion order.
    pub fn full_url(&self) -> String {
        let endpoint = self.endpoint();
        if self.query.is_empty() {
            endpoint
        } else {
            format!("{}?{}", endpoint, self.query.encode())
        }
    }

    fn carries_body(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT
    }

    fn body_parameters(&self) -> Option<&Parameters> {
        if self.carries_body() {
            Some(&self.form)
        } else {
            None
        }
    }

    /// The encoded form body, empty unless the method is `POST` or `PUT`.
    pub fn body(&self) -> String {
        self.body_parameters()
            .map(Parameters::encode)
            .unwrap_or_default()
    }

    /// Signs the request with `secrets` and freezes it into a
    /// [`SignedRequest`].
    ///
    /// # Errors
    /// Fails only when no nonce could be generated.
    pub fn sign<TSecretsProvider>(
        self,
        secrets: &TSecretsProvider,
        user_agent: &str,
        debug_log: bool,
    ) -> Result<SignedRequest>
    where
        TSecretsProvider: SecretsProvider,
    {
        let endpoint = self.endpoint();
        let url = self.full_url();
        let body = self.body();
        if debug_log {
            debug!(endpoint = %endpoint, url = %url, "building request");
        }

        let signed_params = self
            .query
            .iter()
            .chain(self.body_parameters().into_iter().flat_map(|form| form.iter()));
        let authorization = Signer::new(secrets, self.oauth.clone())
            .debug_log(debug_log)
            .generate_signature(&self.method, &endpoint, signed_params)?;

        let mut headers = vec![
            (AUTHORIZATION, authorization),
            (USER_AGENT, user_agent.to_string()),
        ];
        if !body.is_empty() {
            headers.push((CONTENT_TYPE, FORM_CONTENT_TYPE.to_string()));
        }

        Ok(SignedRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

/// A request ready for the wire. Built once and sent once.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(HeaderName, String)>,
    pub body: String,
}

impl SignedRequest {
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn authorization(&self) -> Option<&str> {
        self.header(&AUTHORIZATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{extract_signature, header_fields};
    use crate::Secrets;

    const API_BASE: &str = "https://api.example.com/1.1/";

    #[derive(Serialize)]
    struct Sample<'a> {
        status: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
        trim_user: bool,
    }

    #[test]
    fn parameters_from_serialize_keeps_field_order() {
        let params = Parameters::from_serialize(&Sample {
            status: "hello world & more",
            count: None,
            trim_user: true,
        })
        .unwrap();
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("status", "hello world & more"), ("trim_user", "true")]
        );
    }

    #[test]
    fn parameters_allow_repeated_keys() {
        let params = Parameters::new().push("media", "AAA").push("media", "BBB");
        assert_eq!(params.len(), 2);
        assert_eq!(params.encode(), "media=AAA&media=BBB");
    }

    #[test]
    fn full_url_keeps_query_insertion_order() {
        let req = ApiRequest::new(Method::GET, API_BASE, "statuses/home_timeline.json").query(
            Parameters::new()
                .push("since_id", "12")
                .push("count", "5")
                .push("q", "a b"),
        );
        assert_eq!(
            req.endpoint(),
            "https://api.example.com/1.1/statuses/home_timeline.json"
        );
        assert_eq!(
            req.full_url(),
            "https://api.example.com/1.1/statuses/home_timeline.json?since_id=12&count=5&q=a%20b"
        );
    }

    #[test]
    fn full_url_without_query_has_no_question_mark() {
        let req = ApiRequest::new(Method::GET, API_BASE, "account/verify_credentials.json");
        assert_eq!(req.full_url(), req.endpoint());
    }

    #[test]
    fn body_only_for_post_and_put() {
        let form = Parameters::new().push("status", "hello world");
        for method in &[Method::POST, Method::PUT] {
            let req = ApiRequest::new(method.clone(), API_BASE, "x").form(form.clone());
            assert_eq!(req.body(), "status=hello%20world");
        }
        for method in &[Method::GET, Method::DELETE, Method::PATCH] {
            let req = ApiRequest::new(method.clone(), API_BASE, "x").form(form.clone());
            assert_eq!(req.body(), "");
        }
    }

    #[test]
    fn sign_pinned_post_fixture() {
        let secrets = Secrets::new("ck", "cs").token("tk", "ts");
        let signed = ApiRequest::new(Method::POST, API_BASE, "statuses/update.json")
            .form(Parameters::new().push("status", "hello world"))
            .oauth_parameters(
                OAuthParameters::new()
                    .nonce("abc123")
                    .timestamp(1_000_000_000u64),
            )
            .sign(&secrets, "test-agent", false)
            .unwrap();

        assert_eq!(signed.method, Method::POST);
        assert_eq!(
            signed.url,
            "https://api.example.com/1.1/statuses/update.json"
        );
        assert_eq!(signed.body, "status=hello%20world");
        assert_eq!(signed.header(&USER_AGENT), Some("test-agent"));
        assert_eq!(signed.header(&CONTENT_TYPE), Some(FORM_CONTENT_TYPE));

        let authorization = signed.authorization().unwrap();
        assert_eq!(
            extract_signature(authorization),
            "3+5lroNWVsi4SiO50017C4AvRdA="
        );
        assert_eq!(
            authorization,
            "OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"abc123\", \
             oauth_signature=\"3%2B5lroNWVsi4SiO50017C4AvRdA%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1000000000\", \
             oauth_token=\"tk\", oauth_version=\"1.0\""
        );
    }

    #[test]
    fn query_parameters_are_signed_but_not_in_header() {
        let secrets = Secrets::new("ck", "cs").token("tk", "ts");
        let oauth = || OAuthParameters::new().nonce("n").timestamp(1u64);
        let with_query = ApiRequest::new(Method::GET, API_BASE, "statuses/home_timeline.json")
            .query(Parameters::new().push("count", "5"))
            .oauth_parameters(oauth())
            .sign(&secrets, "ua", false)
            .unwrap();
        let without_query =
            ApiRequest::new(Method::GET, API_BASE, "statuses/home_timeline.json")
                .oauth_parameters(oauth())
                .sign(&secrets, "ua", false)
                .unwrap();

        let with_sig = extract_signature(with_query.authorization().unwrap());
        let without_sig = extract_signature(without_query.authorization().unwrap());
        assert_ne!(with_sig, without_sig);
        assert!(header_fields(with_query.authorization().unwrap())
            .iter()
            .all(|(k, _)| k.starts_with("oauth_")));
        assert_eq!(with_query.header(&CONTENT_TYPE), None);
    }

    #[test]
    fn form_on_get_is_neither_sent_nor_signed() {
        let secrets = Secrets::new("ck", "cs");
        let oauth = || OAuthParameters::new().nonce("n").timestamp(1u64);
        let with_form = ApiRequest::new(Method::GET, API_BASE, "x")
            .form(Parameters::new().push("ignored", "1"))
            .oauth_parameters(oauth())
            .sign(&secrets, "ua", false)
            .unwrap();
        let bare = ApiRequest::new(Method::GET, API_BASE, "x")
            .oauth_parameters(oauth())
            .sign(&secrets, "ua", false)
            .unwrap();
        assert_eq!(with_form.body, "");
        assert_eq!(with_form.authorization(), bare.authorization());
    }
}
