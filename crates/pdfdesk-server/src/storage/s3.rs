use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    operation::head_object::HeadObjectOutput,
    primitives::ByteStream,
    types::MetadataDirective,
    Client,
};
use bytes::Bytes;
use tracing::{debug, info, instrument};

use super::{config::StorageConfig, content_type_for, Attributes, ObjectStore, StorageError, StorageResult};

/// S3-compatible backend
///
/// Attributes map to S3 user metadata (`x-amz-meta-*`). S3 only carries US-ASCII in
/// metadata headers, so attribute values outside that range are rejected by the service.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        config.validate()?;
        debug!("Initializing S3 store with config: {:?}", config);

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "pdfdesk-storage",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());

        info!("S3 store initialized for bucket: {}", config.bucket);

        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn head(&self, key: &str) -> StorageResult<HeadObjectOutput> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(output),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => {
                Err(StorageError::NotFound(key.to_string()))
            },
            Err(err) => Err(unavailable(err)),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    #[instrument(skip(self))]
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        debug!("Listing objects in s3://{}/{}", self.bucket, prefix);

        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(unavailable)?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(str::to_string)),
            );

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                },
                _ => break,
            }
        }

        keys.sort();
        debug!("Listed {} objects under s3://{}/{}", keys.len(), self.bucket, prefix);
        Ok(keys)
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        debug!("Downloading from s3://{}/{}", self.bucket, key);

        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                return Err(StorageError::NotFound(key.to_string()));
            },
            Err(err) => return Err(unavailable(err)),
        };

        let data = response
            .body
            .collect()
            .await
            .map_err(unavailable)?
            .into_bytes();

        debug!("Downloaded {} bytes from s3://{}/{}", data.len(), self.bucket, key);
        Ok(data)
    }

    #[instrument(skip(self, data, attributes), fields(size = data.len()))]
    async fn put(&self, key: &str, data: Bytes, attributes: Option<Attributes>) -> StorageResult<()> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data));

        if let Some(content_type) = content_type_for(key) {
            request = request.content_type(content_type);
        }

        if let Some(attributes) = attributes {
            request = request.set_metadata(Some(attributes.into_iter().collect()));
        }

        request.send().await.map_err(unavailable)?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn attributes(&self, key: &str) -> StorageResult<Attributes> {
        let head = self.head(key).await?;
        Ok(head
            .metadata()
            .map(|metadata| {
                metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    #[instrument(skip(self, attributes))]
    async fn replace_attributes(&self, key: &str, attributes: Attributes) -> StorageResult<()> {
        // A REPLACE copy resets system metadata too, so carry the content type over.
        let head = self.head(key).await?;

        self.client
            .copy_object()
            .bucket(&self.bucket)
            .key(key)
            .copy_source(copy_source(&self.bucket, key))
            .metadata_directive(MetadataDirective::Replace)
            .set_metadata(Some(attributes.into_iter().collect()))
            .set_content_type(head.content_type().map(str::to_string))
            .send()
            .await
            .map_err(unavailable)?;

        info!("Replaced attributes on s3://{}/{}", self.bucket, key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(unavailable)?;

        info!("Deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

fn unavailable<E>(err: E) -> StorageError
where
    E: std::error::Error + 'static,
{
    StorageError::Unavailable(DisplayErrorContext(err).to_string())
}

/// `x-amz-copy-source` value: bucket plus the URL-encoded key, segment by segment
fn copy_source(bucket: &str, key: &str) -> String {
    let encoded: Vec<_> = key.split('/').map(urlencoding::encode).collect();
    format!("{}/{}", bucket, encoded.join("/"))
}
