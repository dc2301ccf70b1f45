//! Thin call sites for a few REST resources. They only translate typed
//! parameter records into [`Parameters`] and hand them to [`Client::send`].

use std::path::Path;

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{
    Client, HttpResponse, HttpTransport, MalformedResponse, MediaFile, Parameters, Result, Token,
};

const HOME_TIMELINE_RESOURCE: &str = "statuses/home_timeline.json";
const UPDATE_RESOURCE: &str = "statuses/update.json";
const MEDIA_UPLOAD_RESOURCE: &str = "media/upload.json";

/// Query parameters of `statuses/home_timeline`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeTimeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_replies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_entities: Option<bool>,
}

/// Body of `statuses/update`. `status` is the only required field.
#[derive(Debug, Clone, Serialize)]
pub struct Tweet {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_ids: Option<String>,
}

impl Tweet {
    pub fn new<T: Into<String>>(status: T) -> Self {
        Tweet {
            status: status.into(),
            in_reply_to_status_id: None,
            media_ids: None,
        }
    }

    pub fn in_reply_to<T: Into<String>>(self, status_id: T) -> Self {
        Tweet {
            in_reply_to_status_id: Some(status_id.into()),
            ..self
        }
    }

    /// Attach previously uploaded media, sent as a comma separated list.
    pub fn media_ids<I, S>(self, media_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = media_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Tweet {
            media_ids: Some(joined),
            ..self
        }
    }
}

/// Result of `media/upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedMedia {
    pub media_id_string: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl<T> Client<T>
where
    T: HttpTransport,
{
    /// `GET statuses/home_timeline`. The response is returned unparsed.
    pub async fn home_timeline(&self, token: &Token, params: &HomeTimeline) -> Result<HttpResponse> {
        let req = self
            .api_request(Method::GET, HOME_TIMELINE_RESOURCE)
            .query(Parameters::from_serialize(params)?);
        self.send(req, Some(token)).await
    }

    /// `POST statuses/update`. The response is returned unparsed.
    pub async fn tweet(&self, token: &Token, tweet: &Tweet) -> Result<HttpResponse> {
        let req = self
            .api_request(Method::POST, UPDATE_RESOURCE)
            .form(Parameters::from_serialize(tweet)?);
        self.send(req, Some(token)).await
    }

    /// Reads `path` and uploads it in one `media/upload` call as base64
    /// `media_data`.
    ///
    /// # Errors
    /// [`Error::FileUnreadable`](crate::Error::FileUnreadable) before anything
    /// is sent, [`Error::Rejected`](crate::Error::Rejected) or
    /// [`Error::MalformedResponse`](crate::Error::MalformedResponse) after.
    pub async fn upload_media<P: AsRef<Path>>(&self, token: &Token, path: P) -> Result<UploadedMedia> {
        let media = MediaFile::open(path)?;
        let req = self
            .upload_request(Method::POST, MEDIA_UPLOAD_RESOURCE)
            .form(Parameters::new().push("media_data", media.to_base64()));
        let resp = self.send(req, Some(token)).await?.error_for_status()?;
        Ok(serde_json::from_str(&resp.body).map_err(MalformedResponse::from)?)
    }
}
