/// 監査イベント取り込みLambdaエントリポイント
///
/// EventBridge等から届くインフラ変更通知を受け取り、
/// 呼び出しごとに1件の監査レコードをDynamoDBに保存する。
use lambda_runtime::{Error, LambdaEvent, service_fn};
use recorder::application::AuditEventHandler;
use recorder::infrastructure::{DynamoDbConfig, DynamoItemTable, ItemTable, init_logging};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDBクライアントは起動時に1度だけ作成し、各呼び出しで再利用する
    let config = DynamoDbConfig::audit_from_env().await;
    let table = DynamoItemTable::new(config.client().clone(), config.table_name().to_string());
    info!(table = config.table_name(), "監査イベントLambda関数を初期化");

    let handler = AuditEventHandler::new(table);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_event(handler, event).await
    }))
    .await
}

/// Lambda関数のメインハンドラー
///
/// 業務上の失敗もすべてレスポンスエンベロープとして返し、`Err`は返さない。
async fn handle_event<T: ItemTable>(
    handler: &AuditEventHandler<T>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();
    let response = handler.handle(&payload, &context.request_id).await;
    Ok(response.into_lambda_value())
}
