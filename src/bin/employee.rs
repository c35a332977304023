/// 従業員API HTTP Lambdaエントリポイント
///
/// `POST .../employee` で従業員レコードを作成し、
/// `GET .../employee?emp_id=<id>` で取得する。
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use recorder::application::{EmployeeHandler, EmployeeRequest};
use recorder::infrastructure::{DynamoDbConfig, DynamoItemTable, ItemTable, init_logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDBクライアントは起動時に1度だけ作成し、各呼び出しで再利用する
    let config = DynamoDbConfig::employee_from_env().await;
    let table = DynamoItemTable::new(config.client().clone(), config.table_name().to_string());
    info!(table = config.table_name(), "従業員API Lambda関数を初期化");

    let handler = EmployeeHandler::new(table);
    let handler = &handler;

    run(service_fn(move |request: Request| async move {
        handle_request(handler, request).await
    }))
    .await
}

/// HTTPリクエストをハンドラーに渡し、レスポンスに変換する
async fn handle_request<T: ItemTable>(
    handler: &EmployeeHandler<T>,
    request: Request,
) -> Result<Response<Body>, Error> {
    let request = EmployeeRequest::from_http(&request);
    Ok(handler.handle(&request).await.into_http_response())
}
