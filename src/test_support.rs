use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::encoding::percent_decode;
use crate::{Error, HttpResponse, HttpTransport, Result, SignedRequest, OAUTH_SIGNATURE_KEY};

/// Splits an `OAuth k="v", ...` header into decoded pairs, in header order.
pub(crate) fn header_fields(auth_header: &str) -> Vec<(String, String)> {
    auth_header
        .strip_prefix("OAuth ")
        .unwrap()
        .split(", ")
        .map(|item| {
            let (k, v) = item.split_once('=').unwrap();
            (k.to_string(), percent_decode(v.trim_matches('"')))
        })
        .collect()
}

pub(crate) fn extract_signature(auth_header: &str) -> String {
    header_fields(auth_header)
        .into_iter()
        .find(|(k, _)| k == OAUTH_SIGNATURE_KEY)
        .unwrap()
        .1
}

/// Replays queued responses and records every request it is handed. With an
/// empty queue it fails like a refused connection.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<SignedRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn push_response(&self, resp: HttpResponse) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub(crate) fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: SignedRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            Error::Transport(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "no response queued",
            )))
        })
    }
}
