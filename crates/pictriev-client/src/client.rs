//! Pictriev service client.

use std::path::Path;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info_span, Instrument};
use url::Url;

use pictriev_models::{Command, DetectionResult, IdentityResult, Language};

use crate::config::PictrievConfig;
use crate::decode::{decode_find_face, decode_whois};
use crate::error::PictrievResult;
use crate::metrics::{record_request, OUTCOME_OK};
use crate::transport::{command_url, upload_form, HttpTransport};

/// `image` parameter value announcing a multipart upload.
const IMAGE_POST: &str = "post";

/// Client for the Pictriev face recognition service.
///
/// Holds no mutable state; clones share the underlying connection pool and
/// can be used concurrently.
#[derive(Debug, Clone)]
pub struct PictrievClient {
    transport: HttpTransport,
    base_url: Url,
    config: PictrievConfig,
}

impl PictrievClient {
    /// Create a new client.
    pub fn new(config: PictrievConfig) -> PictrievResult<Self> {
        let base_url = config.validate()?;
        let transport = HttpTransport::new(&config)?;

        Ok(Self {
            transport,
            base_url,
            config,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> PictrievResult<Self> {
        Self::new(PictrievConfig::from_env())
    }

    pub fn config(&self) -> &PictrievConfig {
        &self.config
    }

    /// Detect faces in a remotely hosted image.
    pub async fn find_face_url(&self, image_url: &str) -> PictrievResult<DetectionResult> {
        let url = command_url(&self.base_url, Command::FindFace, &[("image", image_url)]);

        self.execute_request(Command::FindFace, async {
            let response = self.transport.get(url).await?;
            decode_find_face(&response)
        })
        .await
    }

    /// Detect faces in an uploaded image.
    ///
    /// No size limit is applied; the service rejects what it cannot handle.
    pub async fn find_face_image(&self, image: Vec<u8>) -> PictrievResult<DetectionResult> {
        let url = command_url(&self.base_url, Command::FindFace, &[("image", IMAGE_POST)]);
        debug!(bytes = image.len(), "uploading image");

        self.execute_request(Command::FindFace, async {
            let response = self.transport.post_multipart(url, upload_form(image)).await?;
            decode_find_face(&response)
        })
        .await
    }

    /// Read an image from `reader` to the end and upload it.
    pub async fn find_face_reader<R>(&self, mut reader: R) -> PictrievResult<DetectionResult>
    where
        R: AsyncRead + Unpin,
    {
        let mut image = Vec::new();
        reader.read_to_end(&mut image).await?;
        self.find_face_image(image).await
    }

    /// Upload an image file.
    pub async fn find_face_file(&self, path: impl AsRef<Path>) -> PictrievResult<DetectionResult> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        self.find_face_reader(file).await
    }

    /// Look up ranked identity guesses for face `face_id` of a detected image.
    ///
    /// `face_id` is a 0-based index into the faces found for `image_id`; it
    /// is passed through unchecked.
    pub async fn whois(
        &self,
        image_id: &str,
        face_id: u32,
        lang: Language,
    ) -> PictrievResult<IdentityResult> {
        let face_id = face_id.to_string();
        let url = command_url(
            &self.base_url,
            Command::Whois,
            &[
                ("imageid", image_id),
                ("faceid", face_id.as_str()),
                ("lang", lang.as_str()),
            ],
        );

        self.execute_request(Command::Whois, async {
            let response = self.transport.get(url).await?;
            decode_whois(&response, lang)
        })
        .await
    }

    async fn execute_request<T, F>(&self, command: Command, fut: F) -> PictrievResult<T>
    where
        F: std::future::Future<Output = PictrievResult<T>>,
    {
        let span = info_span!("pictriev_request", command = %command);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let outcome = match &result {
            Ok(_) => OUTCOME_OK,
            Err(e) => e.kind(),
        };
        record_request(command.as_str(), outcome, latency_ms);

        result
    }
}
