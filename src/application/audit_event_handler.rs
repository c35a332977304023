/// 監査イベントハンドラー
///
/// インフラ変更通知イベントを受け取り、呼び出しごとに1件の監査レコードを書き込む。
/// ルーティングは無く、すべての呼び出しが1回の取り込みとなる。
use chrono::{DateTime, Utc};
use lambda_http::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};

use crate::domain::{ApiResponse, AuditRecord};
use crate::infrastructure::{ItemTable, StorageError};

/// 監査イベントハンドラーのエラー型
#[derive(Debug, Error)]
pub enum AuditEventHandlerError {
    /// ストレージ操作に失敗
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// イベントがJSONオブジェクトではない
    #[error("Event payload is not a JSON object: {0}")]
    InvalidEvent(String),
    /// レコードのシリアライズに失敗
    #[error("Failed to serialize audit record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 監査イベントを取り込むハンドラー
pub struct AuditEventHandler<T>
where
    T: ItemTable,
{
    /// 監査テーブル
    table: T,
}

impl<T> AuditEventHandler<T>
where
    T: ItemTable,
{
    /// 新しいAuditEventHandlerを作成
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// イベントを取り込み、レスポンスを返す
    ///
    /// # 引数
    /// * `event` - 受信したイベント
    /// * `request_id` - 呼び出しのリクエストID（レコードのキーになる）
    pub async fn handle(&self, event: &Value, request_id: &str) -> ApiResponse {
        self.handle_at(event, request_id, Utc::now()).await
    }

    /// 時刻を指定してイベントを取り込む
    pub async fn handle_at(&self, event: &Value, request_id: &str, now: DateTime<Utc>) -> ApiResponse {
        match self.ingest(event, request_id, now).await {
            Ok(record) => {
                info!(
                    request_id = request_id,
                    table = self.table.table_name(),
                    record = ?record,
                    "監査イベントを保存"
                );
                ApiResponse::new(
                    StatusCode::OK,
                    json!({ "message": "Event stored successfully", "data": record }),
                )
            }
            Err(AuditEventHandlerError::Storage(err)) => {
                error!(request_id = request_id, error = %err, "DynamoDB操作に失敗");
                ApiResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "DynamoDB operation failed", "details": err.to_string() }),
                )
            }
            Err(err) => {
                error!(request_id = request_id, error = %err, "監査イベント処理で想定外のエラー");
                ApiResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Unexpected error", "details": err.to_string() }),
                )
            }
        }
    }

    async fn ingest(
        &self,
        event: &Value,
        request_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AuditRecord, AuditEventHandlerError> {
        if !event.is_object() {
            return Err(AuditEventHandlerError::InvalidEvent(event.to_string()));
        }

        let record = AuditRecord::from_event(event, request_id, now);
        self.table.put_item(record.to_item()?).await?;

        Ok(record)
    }
}
