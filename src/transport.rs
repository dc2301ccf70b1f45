use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use reqwest::Client as ReqwestClient;

use crate::{Error, Result, SignedRequest};

/// The HTTP boundary. Implementations own connection handling, TLS,
/// redirects and timeouts; they receive a fully signed request and hand the
/// raw response back.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse>;
}

/// A response as plain data. Nothing is interpreted here, non-2xx statuses
/// included.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    pub fn new<T: Into<String>>(status: StatusCode, body: T) -> Self {
        HttpResponse {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turns a non-2xx response into [`Error::Rejected`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Rejected {
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestClient {
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse> {
        let mut builder = self.request(request.method, request.url.as_str());
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
