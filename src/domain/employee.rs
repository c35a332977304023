// 従業員レコードのコーデック
//
// リクエストボディ（JSON文字列）を検証し、
// 保存用のアイテムへ変換する。

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::Item;

/// 従業員IDの属性名（パーティションキー）
pub const EMP_ID: &str = "Emp_Id";
/// 名の属性名
pub const FIRST_NAME: &str = "First_Name";
/// 姓の属性名
pub const LAST_NAME: &str = "Last_Name";
/// 入社日の属性名
pub const DATE_OF_JOINING: &str = "Date_Of_Joining";

/// 必須フィールド（検証はこの順序で行う）
pub const REQUIRED_FIELDS: [&str; 4] = [EMP_ID, FIRST_NAME, LAST_NAME, DATE_OF_JOINING];

/// リクエストボディのデコードエラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PayloadError {
    /// JSONとしてパースできない
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
    /// JSONだがオブジェクトではない
    #[error("Body is not a JSON object")]
    NotAnObject,
}

/// 必須フィールドの欠落
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Missing field: {0}")]
pub struct MissingField(pub &'static str);

/// 従業員レコード
///
/// 値は型検査せずにそのまま保持する（存在チェックのみ）。
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub emp_id: Value,
    pub first_name: Value,
    pub last_name: Value,
    pub date_of_joining: Value,
}

impl Employee {
    /// リクエストボディをJSONオブジェクトとしてデコード
    ///
    /// ボディが無い場合のみ空オブジェクトとして扱う。
    /// 空文字列や不正なUTF-8はJSONとして不正なのでエラーになる。
    pub fn decode_body(body: Option<&[u8]>) -> Result<Map<String, Value>, PayloadError> {
        let Some(body) = body else {
            return Ok(Map::new());
        };

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(PayloadError::NotAnObject),
            Err(e) => Err(PayloadError::InvalidJson(e.to_string())),
        }
    }

    /// ペイロードから従業員レコードを構築
    ///
    /// 必須フィールドを宣言順に確認し、最初に欠落していたフィールドを返す。
    /// 必須フィールド以外の属性は取り込まない。
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, MissingField> {
        if let Some(missing) = REQUIRED_FIELDS
            .into_iter()
            .find(|field| !payload.contains_key(*field))
        {
            return Err(MissingField(missing));
        }

        let field = |name: &str| payload.get(name).cloned().unwrap_or(Value::Null);

        Ok(Self {
            emp_id: field(EMP_ID),
            first_name: field(FIRST_NAME),
            last_name: field(LAST_NAME),
            date_of_joining: field(DATE_OF_JOINING),
        })
    }

    /// 保存用アイテムに変換（4フィールドのみ）
    pub fn into_item(self) -> Item {
        let mut item = Item::new();
        item.insert(EMP_ID.to_string(), self.emp_id);
        item.insert(FIRST_NAME.to_string(), self.first_name);
        item.insert(LAST_NAME.to_string(), self.last_name);
        item.insert(DATE_OF_JOINING.to_string(), self.date_of_joining);
        item
    }
}
