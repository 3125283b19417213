//! HTTP transport for the Pictriev endpoint.
//!
//! Performs exactly one round trip per call and hands back the raw status
//! and body. The body is always read to the end, which returns the
//! connection to the pool whether or not it is later decoded.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;
use url::Url;

use pictriev_models::Command;

use crate::config::PictrievConfig;
use crate::error::{PictrievError, PictrievResult};

/// Multipart field name (and filename) for uploaded images.
pub const UPLOAD_FIELD: &str = "photo";

/// Raw HTTP response, not yet interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Build `<base>?<command>&key=value...` with form-encoded values.
pub fn command_url(base: &Url, command: Command, params: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query.append_key_only(command.wire_name());
        for (key, value) in params {
            query.append_pair(key, value);
        }
    }
    url
}

/// Multipart form carrying a single image part.
pub fn upload_form(image: Vec<u8>) -> Form {
    let part = Part::bytes(image).file_name(UPLOAD_FIELD);
    Form::new().part(UPLOAD_FIELD, part)
}

/// Shared reqwest client configured from [`PictrievConfig`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &PictrievConfig) -> PictrievResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(PictrievError::Network)?;

        Ok(Self { http })
    }

    /// Issue a GET request.
    pub async fn get(&self, url: Url) -> PictrievResult<RawResponse> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        Self::read(response).await
    }

    /// Issue a POST request with a multipart body.
    pub async fn post_multipart(&self, url: Url, form: Form) -> PictrievResult<RawResponse> {
        debug!("POST {} (multipart)", url);
        let response = self.http.post(url).multipart(form).send().await?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> PictrievResult<RawResponse> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}
