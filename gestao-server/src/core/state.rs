use crate::core::{Config, Result};
use crate::store::DocumentStore;

/// 服务器状态
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | DocumentStore | JSON document (Arc inside, cheap to clone) |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub store: DocumentStore,
}

impl ServerState {
    pub fn new(config: Config, store: DocumentStore) -> Self {
        Self { config, store }
    }

    /// 初始化服务器状态
    ///
    /// Creates the work directory and an empty document when missing.
    pub async fn initialize(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.work_dir).await?;
        let store = DocumentStore::new(&config.data_file);
        store.ensure().await?;
        tracing::info!(path = %config.data_file.display(), "Document store ready");
        Ok(Self::new(config.clone(), store))
    }
}
