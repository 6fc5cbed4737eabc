//! # RPC トランスポート
//!
//! 下流サービスへの RPC を HTTP + JSON で送る。
//!
//! ```text
//! POST {base_url}/rpc/{Interface}/{Method}
//! Content-Type: application/json
//!
//! { ...リクエストオブジェクト, "user": { email, domain, role, accessToken } }
//! ```
//!
//! - 2xx: ボディを結果オブジェクトとしてデコードする
//! - それ以外: ボディのテキストを `details` として [`RpcError::Remote`] に載せる
//!
//! `details` の解釈（エラーコードの抽出と HTTP エラーへの変換）は
//! [`crate::adapter::remote_error`] が担う。

use gatehouse_domain::Principal;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::middleware::request_id::inject_request_id;

/// RPC の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// 下流サービスがエラーを返した（`details` は未解釈のボディ）
    #[error("リモート呼び出しが失敗しました（{status}）: {details}")]
    Remote { status: u16, details: String },

    /// 接続できない、またはタイムアウト
    #[error("下流サービスに到達できません: {0}")]
    Unavailable(String),

    /// その他の通信エラー（結果のデコード失敗を含む）
    #[error("ネットワークエラー: {0}")]
    Network(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            RpcError::Unavailable(err.to_string())
        } else {
            RpcError::Network(err.to_string())
        }
    }
}

/// 下流サービスに送るリクエストオブジェクト
///
/// 呼び出し元が指定した項目に、認証済みの呼び出し元を `user` として同梱する。
#[derive(Debug, Clone, Serialize)]
pub struct RemoteRequest<T> {
    #[serde(flatten)]
    pub payload: T,
    pub user:    Principal,
}

impl<T> RemoteRequest<T> {
    pub fn new(payload: T, principal: &Principal) -> Self {
        Self {
            payload,
            user: principal.clone(),
        }
    }
}

/// ID のみを指定する操作（詳細取得・削除など）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ById {
    pub id: Uuid,
}

/// 呼び出し元以外の入力を持たない操作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoPayload {}

/// RPC トランスポート
///
/// reqwest の接続プールを共有するため `Clone` で複製して使う。
#[derive(Debug, Clone)]
pub struct RpcTransport {
    base_url: String,
    client:   reqwest::Client,
}

impl RpcTransport {
    /// # 引数
    ///
    /// - `base_url`: 下流サービスのベース URL（例: `http://localhost:4002`）
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// RPC を 1 回実行する（リトライしない）
    pub async fn call<Req, Res>(
        &self,
        interface: &str,
        method: &str,
        request: &Req,
    ) -> Result<Res, RpcError>
    where
        Req: Serialize + ?Sized + Sync,
        Res: DeserializeOwned,
    {
        let url = format!("{}/rpc/{}/{}", self.base_url, interface, method);
        tracing::debug!(rpc.interface = interface, rpc.method = method, "RPC 呼び出し");

        let response = inject_request_id(self.client.post(&url).json(request))
            .send()
            .await?;
        handle_rpc_response(response).await
    }
}

/// RPC レスポンスの共通ハンドリング
pub(crate) async fn handle_rpc_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RpcError> {
    let status = response.status();

    if status.is_success() {
        let body = response.json::<T>().await?;
        return Ok(body);
    }

    let details = response.text().await.unwrap_or_default();
    Err(RpcError::Remote {
        status: status.as_u16(),
        details,
    })
}
