// レスポンス整形
//
// 両ハンドラーが共有するレスポンスエンベロープ。
// ステータスコード、固定のContent-Typeヘッダー、JSON文字列化したボディを持つ。

use lambda_http::http::header::{CONTENT_TYPE, HeaderValue};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::{Value, json};

/// レスポンスのContent-Type
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// ハンドラーが返すレスポンスエンベロープ
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTPステータスコード
    pub status: StatusCode,
    /// JSONエンコード済みのボディ
    pub body: String,
}

impl ApiResponse {
    /// ステータスとボディ値からレスポンスを構築
    ///
    /// `Value`の文字列化は失敗しないため、この関数は常に成功する。
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// `{"message": ...}` 形式のボディを持つレスポンスを構築
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }

    /// ステータスコードの数値
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// イベント駆動Lambda向けのJSONエンベロープに変換
    ///
    /// `{"statusCode": .., "headers": {"Content-Type": ..}, "body": ".."}`
    pub fn into_lambda_value(self) -> Value {
        json!({
            "statusCode": self.status_code(),
            "headers": { "Content-Type": JSON_CONTENT_TYPE },
            "body": self.body,
        })
    }

    /// HTTP Lambda向けのレスポンスに変換
    pub fn into_http_response(self) -> Response<Body> {
        let mut response = Response::new(Body::Text(self.body));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        response
    }
}

#[cfg(test)]
impl ApiResponse {
    /// ボディをJSON値としてパース（不正なJSONはNull）
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}
