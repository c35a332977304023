/// 従業員APIハンドラー
///
/// HTTPメソッドとパス末尾でルーティングし、
/// 従業員レコードの作成・取得を行う。
use std::collections::HashMap;

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, RequestExt};
use thiserror::Error;
use tracing::{error, info};

use crate::domain::employee::EMP_ID;
use crate::domain::{ApiResponse, Employee, ItemKey, PayloadError};
use crate::infrastructure::{ItemTable, StorageError};

/// 従業員リソースのパスセグメント
pub const EMPLOYEE_RESOURCE: &str = "/employee";
/// 取得時のキーを指定するクエリパラメータ名
pub const EMP_ID_PARAM: &str = "emp_id";

/// 従業員ハンドラーの想定外エラー
///
/// 入力検証の失敗はここに含めず、レスポンスとして直接返す。
#[derive(Debug, Error)]
pub enum EmployeeHandlerError {
    /// リクエストボディのデコードに失敗
    #[error("Invalid request body: {0}")]
    Payload(#[from] PayloadError),
    /// ストレージ操作に失敗
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// ハンドラーに渡すHTTPトリガーの内容
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRequest {
    pub method: Method,
    pub path: String,
    /// 受信したままのボディ（UTF-8検証はデコード時に行う）
    pub body: Option<Vec<u8>>,
    pub query: HashMap<String, String>,
}

impl EmployeeRequest {
    /// Lambda HTTPリクエストから変換
    pub fn from_http(request: &Request) -> Self {
        let body = match request.body() {
            Body::Text(text) => Some(text.as_bytes().to_vec()),
            Body::Binary(bytes) => Some(bytes.clone()),
            _ => None,
        };

        // クエリパラメータが無い場合は空マップ
        let query = request
            .query_string_parameters_ref()
            .map(|params| {
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            body,
            query,
        }
    }
}

/// ルーティング結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Create,
    Fetch,
    Unsupported,
}

impl Route {
    fn resolve(method: &Method, path: &str) -> Self {
        if !path.ends_with(EMPLOYEE_RESOURCE) {
            return Route::Unsupported;
        }

        if *method == Method::POST {
            Route::Create
        } else if *method == Method::GET {
            Route::Fetch
        } else {
            Route::Unsupported
        }
    }
}

/// 従業員レコードの作成・取得を行うハンドラー
pub struct EmployeeHandler<T>
where
    T: ItemTable,
{
    /// 従業員テーブル
    table: T,
}

impl<T> EmployeeHandler<T>
where
    T: ItemTable,
{
    /// 新しいEmployeeHandlerを作成
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// リクエストを処理してレスポンスを返す
    ///
    /// 想定外のエラーはここで500に変換し、詳細は呼び出し元に返さない。
    pub async fn handle(&self, request: &EmployeeRequest) -> ApiResponse {
        info!(method = %request.method, path = %request.path, "従業員APIリクエスト受信");

        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "従業員APIで想定外のエラーが発生");
                ApiResponse::message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    async fn dispatch(&self, request: &EmployeeRequest) -> Result<ApiResponse, EmployeeHandlerError> {
        match Route::resolve(&request.method, &request.path) {
            Route::Create => self.create(request.body.as_deref()).await,
            Route::Fetch => Ok(self.fetch(&request.query).await),
            Route::Unsupported => Ok(ApiResponse::message(
                StatusCode::BAD_REQUEST,
                "Unsupported method or path",
            )),
        }
    }

    /// 従業員レコードを作成（既存レコードは無条件に上書き）
    async fn create(&self, body: Option<&[u8]>) -> Result<ApiResponse, EmployeeHandlerError> {
        let payload = Employee::decode_body(body)?;

        let employee = match Employee::from_payload(&payload) {
            Ok(employee) => employee,
            Err(missing) => {
                return Ok(ApiResponse::message(
                    StatusCode::BAD_REQUEST,
                    missing.to_string(),
                ));
            }
        };

        let item = employee.into_item();
        self.table.put_item(item.clone()).await?;

        info!(
            table = self.table.table_name(),
            record = %serde_json::Value::Object(item),
            "従業員レコードを登録"
        );

        Ok(ApiResponse::message(
            StatusCode::CREATED,
            "Employee created successfully",
        ))
    }

    /// キーで従業員レコードを取得
    async fn fetch(&self, query: &HashMap<String, String>) -> ApiResponse {
        let emp_id = match query.get(EMP_ID_PARAM).filter(|id| !id.is_empty()) {
            Some(emp_id) => emp_id,
            None => {
                return ApiResponse::message(
                    StatusCode::BAD_REQUEST,
                    "emp_id query parameter is required",
                );
            }
        };

        let item = match self.table.get_item(&ItemKey::new(EMP_ID, emp_id.as_str())).await {
            Ok(item) => item,
            Err(err) => {
                error!(emp_id = %emp_id, error = %err, "従業員レコードの取得に失敗");
                return ApiResponse::message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error retrieving employee",
                );
            }
        };

        match item {
            Some(item) => {
                let record = serde_json::Value::Object(item);
                info!(emp_id = %emp_id, record = %record, "従業員レコードを取得");
                ApiResponse::new(StatusCode::OK, record)
            }
            None => ApiResponse::message(StatusCode::NOT_FOUND, "Employee not Found"),
        }
    }
}
