// gestao-client/src/store/remote.rs
// HTTP 存储 - 通过 REST API 访问 gestao-server

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{EntryCreate, OvertimeEntry, Vacation, VacationCreate};

use super::Store;
use crate::{ClientConfig, ClientError, ClientResult};

/// 服务端返回的错误响应格式
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Deserialize)]
struct HealthResponse {
    ok: bool,
}

/// REST-backed store
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            // 优先使用服务端的 message 字段
            let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(api_err) => api_err.message.unwrap_or(api_err.error),
                Err(_) => text,
            };
            return match status {
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                _ => Err(ClientError::Server {
                    status: status.as_u16(),
                    message,
                }),
            };
        }
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    /// DELETE; a 404 means the id is gone and maps to `None`
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        let response = self.client.delete(self.url(path)).send().await?;
        match self.handle_response(response).await {
            Ok(removed) => Ok(Some(removed)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Store for RemoteStore {
    async fn health(&self) -> ClientResult<()> {
        let health: HealthResponse = self.get("api/health").await?;
        if health.ok {
            Ok(())
        } else {
            Err(ClientError::InvalidResponse("health check reported not ok".into()))
        }
    }

    async fn list_entries(&self) -> ClientResult<Vec<OvertimeEntry>> {
        self.get("api/entries").await
    }

    async fn create_entry(&self, payload: EntryCreate) -> ClientResult<OvertimeEntry> {
        self.post("api/entries", &payload).await
    }

    async fn delete_entry(&self, id: i64) -> ClientResult<Option<OvertimeEntry>> {
        self.delete(&format!("api/entries/{id}")).await
    }

    async fn list_vacations(&self) -> ClientResult<Vec<Vacation>> {
        self.get("api/vacations").await
    }

    async fn create_vacation(&self, payload: VacationCreate) -> ClientResult<Vacation> {
        self.post("api/vacations", &payload).await
    }

    async fn delete_vacation(&self, id: i64) -> ClientResult<Option<Vacation>> {
        self.delete(&format!("api/vacations/{id}")).await
    }
}
