/// DynamoDB接続設定
///
/// AWS設定は環境から読み込み、対象テーブル名は環境変数で指定する。
/// テーブル名が未設定の場合は固定のデフォルト名を使う。
use aws_sdk_dynamodb::Client as DynamoDbClient;

/// 従業員テーブル名の環境変数
pub const EMPLOYEE_TABLE_ENV: &str = "EMPLOYEE_TABLE";
/// 従業員テーブルのデフォルト名
pub const DEFAULT_EMPLOYEE_TABLE: &str = "Emp_Master";

/// 監査テーブル名の環境変数
pub const AUDIT_TABLE_ENV: &str = "DYNAMODB_TABLE";
/// 監査テーブルのデフォルト名
pub const DEFAULT_AUDIT_TABLE: &str = "CloudFormationTable";

/// クライアントとテーブル名を持つDynamoDB設定
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// テーブル名
    table_name: String,
}

impl DynamoDbConfig {
    /// 従業員API用の設定を環境から読み込む
    pub async fn employee_from_env() -> Self {
        Self::from_env(EMPLOYEE_TABLE_ENV, DEFAULT_EMPLOYEE_TABLE).await
    }

    /// 監査イベント用の設定を環境から読み込む
    pub async fn audit_from_env() -> Self {
        Self::from_env(AUDIT_TABLE_ENV, DEFAULT_AUDIT_TABLE).await
    }

    /// 環境からAWS設定を読み込み、テーブル名を環境変数から決定する
    pub async fn from_env(table_env: &str, default_table: &str) -> Self {
        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Self {
            client,
            table_name: table_name_from_env(table_env, default_table),
        }
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// 環境変数からテーブル名を読み込む（空文字・空白のみはデフォルト扱い）
pub fn table_name_from_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
