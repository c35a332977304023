/// 単一テーブルに対するストレージゲートウェイ
///
/// キー指定の取得とアイテムの書き込みのみを提供する。
/// 従業員テーブルと監査テーブルで同じ実装を、テーブル名を変えて使う。
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use thiserror::Error;

use crate::domain::{Item, ItemKey};

/// ストレージ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    Read(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    Write(String),

    /// アイテムの変換に失敗
    #[error("Codec error: {0}")]
    Codec(String),
}

/// ストレージゲートウェイ用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替えられるようにする。
/// 実装はビジネス状態を持たず、並行呼び出しから共有してよい。
#[async_trait]
pub trait ItemTable: Send + Sync {
    /// 対象テーブル名
    fn table_name(&self) -> &str;

    /// キーでアイテムを1件取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Item))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(StorageError)`
    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, StorageError>;

    /// アイテムを無条件に書き込む（同じキーの既存アイテムは上書き）
    async fn put_item(&self, item: Item) -> Result<(), StorageError>;
}

/// ItemTableのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoItemTable {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// テーブル名
    table_name: String,
}

impl DynamoItemTable {
    /// 新しいDynamoItemTableを作成
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl ItemTable for DynamoItemTable {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, StorageError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&key.name, AttributeValue::S(key.value.clone()))
            .send()
            .await
            .map_err(|e| StorageError::Read(DisplayErrorContext(&e).to_string()))?;

        result.item.map(decode_item).transpose()
    }

    async fn put_item(&self, item: Item) -> Result<(), StorageError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(encode_item(&item)?))
            .send()
            .await
            .map_err(|e| StorageError::Write(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

/// アイテムをDynamoDBの属性マップに変換
fn encode_item(item: &Item) -> Result<HashMap<String, AttributeValue>, StorageError> {
    serde_dynamo::to_item(item).map_err(|e| StorageError::Codec(e.to_string()))
}

/// DynamoDBの属性マップをアイテムに変換
fn decode_item(attributes: HashMap<String, AttributeValue>) -> Result<Item, StorageError> {
    serde_dynamo::from_item(attributes).map_err(|e| StorageError::Codec(e.to_string()))
}
