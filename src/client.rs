use http::Method;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::{
    ApiRequest, Config, HttpResponse, HttpTransport, Result, Secrets, SignedRequest, Token,
};

/// Signs and dispatches API calls.
///
/// Holds only read-only state: the configuration, the consumer credentials
/// and the transport. User tokens are passed to every call, so one client can
/// serve many users concurrently.
#[derive(Debug)]
pub struct Client<T = ReqwestClient> {
    transport: T,
    config: Config,
    secrets: Secrets<'static, ()>,
}

impl Client<ReqwestClient> {
    /// Constructs a new `Client` backed by a default `reqwest::Client`.
    pub fn new(config: Config) -> Self {
        Client::with_transport(config, ReqwestClient::new())
    }
}

impl<T> Client<T>
where
    T: HttpTransport,
{
    /// Constructs a new `Client` with a custom transport.
    pub fn with_transport(config: Config, transport: T) -> Self {
        let secrets = Secrets::new(config.consumer_key.clone(), config.consumer_secret.clone());
        Client {
            transport,
            config,
            secrets,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start building a request against the REST API base.
    pub fn api_request<'a>(&'a self, method: Method, resource: &'a str) -> ApiRequest<'a> {
        ApiRequest::new(method, self.config.api_url_base.as_str(), resource)
    }

    /// Start building a request against the OAuth base.
    pub fn oauth_request<'a>(&'a self, method: Method, resource: &'a str) -> ApiRequest<'a> {
        ApiRequest::new(method, self.config.oauth_url_base.as_str(), resource)
    }

    /// Start building a request against the media upload base.
    pub fn upload_request<'a>(&'a self, method: Method, resource: &'a str) -> ApiRequest<'a> {
        ApiRequest::new(method, self.config.upload_url_base.as_str(), resource)
    }

    /// Signs `request` with the consumer credentials and, when given, the
    /// user token.
    pub fn sign(&self, request: ApiRequest<'_>, token: Option<&Token>) -> Result<SignedRequest> {
        let user_agent = self.config.user_agent.as_str();
        let debug_log = self.config.debug_log;
        match token {
            Some(token) => request.sign(&self.secrets.with_token(token), user_agent, debug_log),
            None => request.sign(&self.secrets, user_agent, debug_log),
        }
    }

    /// Signs `request` and sends it through the transport.
    ///
    /// The response is returned as is; a non-2xx status is not an error here.
    ///
    /// # Errors
    ///
    /// This method fails when no nonce could be generated or the transport
    /// reports a failure.
    pub async fn send(&self, request: ApiRequest<'_>, token: Option<&Token>) -> Result<HttpResponse> {
        let signed = self.sign(request, token)?;
        if self.config.debug_log {
            debug!(method = %signed.method, url = %signed.url, "sending request");
        }
        let resp = self.transport.send(signed).await?;
        if self.config.debug_log {
            debug!(status = %resp.status, "received response");
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use http::header::USER_AGENT;
    use http::StatusCode;

    use super::*;
    use crate::test_support::{header_fields, MockTransport};
    use crate::{OAuthParameters, Parameters};

    fn client() -> Client<MockTransport> {
        Client::with_transport(
            Config::new("ck", "cs")
                .api_url_base("https://api.example.com/1.1/")
                .user_agent("Twitter Source"),
            MockTransport::new(),
        )
    }

    #[tokio::test]
    async fn send_dispatches_signed_request() {
        let client = client();
        client
            .transport()
            .push_response(HttpResponse::new(StatusCode::OK, "[]"));

        let token = Token::new("tk", "ts");
        let req = client
            .api_request(Method::POST, "statuses/update.json")
            .form(Parameters::new().push("status", "hello world"))
            .oauth_parameters(
                OAuthParameters::new()
                    .nonce("abc123")
                    .timestamp(1_000_000_000u64),
            );
        let resp = client.send(req, Some(&token)).await.unwrap();
        assert_eq!(resp.body, "[]");

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://api.example.com/1.1/statuses/update.json");
        assert_eq!(sent[0].body, "status=hello%20world");
        assert_eq!(sent[0].header(&USER_AGENT), Some("Twitter Source"));
        let fields = header_fields(sent[0].authorization().unwrap());
        assert!(fields.contains(&("oauth_token".to_string(), "tk".to_string())));
        assert!(fields.contains(&(
            "oauth_signature".to_string(),
            "3+5lroNWVsi4SiO50017C4AvRdA=".to_string()
        )));
    }

    #[tokio::test]
    async fn send_does_not_interpret_status() {
        let client = client();
        client
            .transport()
            .push_response(HttpResponse::new(StatusCode::FORBIDDEN, "nope"));
        let resp = client
            .send(client.api_request(Method::GET, "statuses/home_timeline.json"), None)
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let client = client();
        let err = client
            .send(client.api_request(Method::GET, "statuses/home_timeline.json"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Transport(_)));
    }

    #[test]
    fn sign_without_token_omits_oauth_token() {
        let client = client();
        let signed = client
            .sign(client.oauth_request(Method::POST, "request_token"), None)
            .unwrap();
        assert_eq!(signed.url, "https://api.twitter.com/oauth/request_token");
        assert!(header_fields(signed.authorization().unwrap())
            .iter()
            .all(|(k, _)| k != "oauth_token"));
    }
}
