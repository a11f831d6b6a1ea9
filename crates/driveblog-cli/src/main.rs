use bytes::Bytes;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use driveblog_core::domain::{ArticleDraft, AssetUpload, BlogSettings};
use driveblog_core::impls::{FixedSigner, InMemoryAccountDirectory, InMemoryContentStore};
use driveblog_core::{BlogBuilder, BlogConfig, StorageSession};

/// 開発用の wallet 公開鍵
const DEMO_OWNER: &str = "demo-owner";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // (A) 設定（引数があればその TOML、なければ既定値）
    let config = match std::env::args().nth(1) {
        Some(path) => BlogConfig::load_or_default(path),
        None => BlogConfig::default(),
    };

    // (B) in-memory の storage network と account 一覧でワイヤリング
    let store = Arc::new(InMemoryContentStore::new());
    let blog = BlogBuilder::new()
        .store(store.clone())
        .accounts(Arc::new(InMemoryAccountDirectory::new()))
        .config(config)
        .build()?;
    let session = StorageSession::new(
        Arc::new(FixedSigner::new(DEMO_OWNER)?),
        blog.endpoint().clone(),
    );

    // (C) storage account を用意
    let account = match blog.find_storage(&session, blog.identifier()).await? {
        Some(account) => account,
        None => {
            blog.create_storage(&session, blog.identifier(), blog.default_size())
                .await?
        }
    };

    // (D) 設定 → 記事 2 本（2 本目はサムネイル付き）
    blog.save_settings(&session, BlogSettings::new("Demo Blog", "demo", ""))
        .await?;
    blog.publish_article(
        &session,
        ArticleDraft::new("Hello", "<p>Hello, storage network!</p>", "Hello, storage network!"),
    )
    .await?;
    blog.publish_article(
        &session,
        ArticleDraft::new("Second", "<p>With a picture.</p>", "With a picture.").with_thumbnail(
            AssetUpload::new("cat.png", "image/png", Bytes::from_static(b"\x89PNG\r\n")),
        ),
    )
    .await?;

    // (E) 読み手側：カタログと記事を読み戻す
    let snapshot = blog.catalog(blog.endpoint(), &account.id).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot.document)?);

    if let Some(article) = blog.article(blog.endpoint(), &account.id, "Hello").await? {
        println!("{} ({}): {}", article.title, article.created_at, article.content);
    }

    for file in store.file_names(&account.id).await {
        println!("stored: {file}");
    }
    Ok(())
}
