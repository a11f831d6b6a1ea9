//! HttpContentStore - storage network over HTTP
//!
//! - read: `GET <read>/<account>/<file>?c=<millis>` (404 → `None`)
//! - probe: `HEAD <read>/<account>/<file>`
//! - write: `POST <write>/upload`, `POST <write>/edit` (multipart, signed)

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

use crate::config::HttpConfig;
use crate::domain::{FileName, StorageAccountId, StoreError};
use crate::ports::{Clock, ContentStore, FileBody};
use crate::session::{Endpoint, StorageSession};

pub struct HttpContentStore {
    client: reqwest::Client,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteAction {
    Upload,
    Edit,
}

impl WriteAction {
    fn path(&self) -> &'static str {
        match self {
            WriteAction::Upload => "upload",
            WriteAction::Edit => "edit",
        }
    }
}

impl HttpContentStore {
    /// `[http]` 設定から reqwest client を作って HttpContentStore を作成
    pub fn new(config: &HttpConfig, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport)?;
        Ok(Self { client, clock })
    }

    /// Use a pre-built client (shared connection pool, custom TLS).
    pub fn with_client(client: reqwest::Client, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    async fn write(
        &self,
        action: WriteAction,
        session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError> {
        let url = session.endpoint.action_url(action.path())?;
        let message = signing_message(action, account, file, &body.bytes);
        let signature = session.signer.sign(message.as_bytes())?;

        let part = Part::bytes(body.bytes.to_vec())
            .file_name(file.to_string())
            .mime_str(&body.content_type)
            .map_err(transport)?;
        let mut form = Form::new()
            .part("file", part)
            .text("fileNames", file.to_string())
            .text("message", signature)
            .text("signer", session.owner().to_string())
            .text("storage_account", account.to_string());
        if action == WriteAction::Edit {
            let target = session.endpoint.file_url(account, file, None)?;
            form = form.text("url", target.to_string());
        }

        tracing::debug!(%url, %account, %file, "POST");
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                method: "POST",
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Text the wallet signs for a write. Binds the action, account, file and body size.
fn signing_message(
    action: WriteAction,
    account: &StorageAccountId,
    file: &FileName,
    bytes: &Bytes,
) -> String {
    format!(
        "Signed request: {}\nStorage Account: {}\nFile: {}\nSize: {}",
        action.path(),
        account,
        file,
        bytes.len()
    )
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn get(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
        file: &FileName,
    ) -> Result<Option<Bytes>, StoreError> {
        let url = endpoint.file_url(account, file, Some(self.clock.now().timestamp_millis()))?;
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.bytes().await.map_err(transport)?)),
            status => Err(StoreError::Status {
                method: "GET",
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    async fn exists(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
        file: &FileName,
    ) -> Result<bool, StoreError> {
        let url = endpoint.file_url(account, file, None)?;
        tracing::debug!(%url, "HEAD");
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::Status {
                method: "HEAD",
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    async fn upload(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError> {
        self.write(WriteAction::Upload, session, account, file, body)
            .await
    }

    async fn edit(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError> {
        self.write(WriteAction::Edit, session, account, file, body)
            .await
    }
}
