// テーブルに保存するアイテムの表現
//
// ストレージ層とドメイン層の間でやり取りするアイテムは、
// 属性名をキーとするJSONオブジェクトとして扱う。

use serde_json::{Map, Value};

/// テーブルの1アイテム（属性名 -> 属性値）
pub type Item = Map<String, Value>;

/// パーティションキーによるポイントルックアップ用のキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    /// キー属性名（例: "Emp_Id"）
    pub name: String,
    /// キーの値
    pub value: String,
}

impl ItemKey {
    /// 新しいキーを作成
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// アイテムからこのキー属性の文字列値を取り出す
    pub fn from_item(name: &str, item: &Item) -> Option<Self> {
        item.get(name)
            .and_then(Value::as_str)
            .map(|value| Self::new(name, value))
    }
}
