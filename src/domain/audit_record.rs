// 監査イベントレコード
//
// インフラ変更通知イベントから固定のフィールドを抽出し、
// 欠落しているフィールドはセンチネル値で埋める。

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::Item;

/// 監査テーブルのキー属性名
pub const EVENT_ID: &str = "Event_id";

pub const UNKNOWN_SOURCE: &str = "UnknownSource";
pub const UNKNOWN_EVENT: &str = "UnknownEvent";
pub const UNKNOWN_REGION: &str = "UnknownRegion";
pub const UNKNOWN_RESOURCE: &str = "UnknownResource";
pub const UNKNOWN_USER: &str = "UnknownUser";

/// 1回の呼び出しにつき1件書き込まれる監査レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    #[serde(rename = "Event_id")]
    pub event_id: String,
    #[serde(rename = "EventTime")]
    pub event_time: String,
    #[serde(rename = "EventSource")]
    pub event_source: String,
    #[serde(rename = "EventName")]
    pub event_name: String,
    #[serde(rename = "ResourceName")]
    pub resource_name: String,
    #[serde(rename = "AWSRegion")]
    pub aws_region: String,
    #[serde(rename = "Username")]
    pub username: String,
}

impl AuditRecord {
    /// イベントからレコードを構築
    ///
    /// キーは常に呼び出しのリクエストIDで、イベント内容からは導出しない。
    /// `now`は`time`が無い場合にのみ使う。
    pub fn from_event(event: &Value, request_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            event_id: request_id.to_string(),
            event_time: string_or(event.get("time"), || format_event_time(now)),
            event_source: string_or(event.get("source"), || UNKNOWN_SOURCE.to_string()),
            event_name: string_or(event.get("detail-type"), || UNKNOWN_EVENT.to_string()),
            aws_region: string_or(event.get("region"), || UNKNOWN_REGION.to_string()),
            resource_name: string_or(
                event
                    .get("resources")
                    .and_then(Value::as_array)
                    .and_then(|resources| resources.first()),
                || UNKNOWN_RESOURCE.to_string(),
            ),
            username: string_or(
                event
                    .get("detail")
                    .and_then(|detail| detail.get("userIdentity"))
                    .and_then(|identity| identity.get("userName")),
                || UNKNOWN_USER.to_string(),
            ),
        }
    }

    /// 保存用アイテムに変換
    pub fn to_item(&self) -> Result<Item, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(item) => Ok(item),
            other => Err(serde::ser::Error::custom(format!(
                "audit record serialized to non-object: {}",
                other
            ))),
        }
    }
}

/// 文字列値を取り出し、無ければ（または文字列でなければ）デフォルト値を使う
fn string_or(value: Option<&Value>, default: impl FnOnce() -> String) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(default)
}

/// デフォルトのイベント時刻（UTC、タイムゾーン表記なし、マイクロ秒）
pub fn format_event_time(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn test_format_event_time() {
        assert_eq!(format_event_time(fixed_now()), "2024-05-01T12:30:45.000000");
    }

    #[test]
    fn test_from_event_all_fields_present() {
        let event = json!({
            "time": "2024-01-01T00:00:00Z",
            "source": "aws.cloudformation",
            "detail-type": "CloudFormation Stack Status Change",
            "region": "ap-northeast-1",
            "resources": ["arn:aws:cloudformation:stack/a", "arn:aws:cloudformation:stack/b"],
            "detail": { "userIdentity": { "userName": "alice" } }
        });

        let record = AuditRecord::from_event(&event, "req-1", fixed_now());

        assert_eq!(
            record,
            AuditRecord {
                event_id: "req-1".to_string(),
                event_time: "2024-01-01T00:00:00Z".to_string(),
                event_source: "aws.cloudformation".to_string(),
                event_name: "CloudFormation Stack Status Change".to_string(),
                resource_name: "arn:aws:cloudformation:stack/a".to_string(),
                aws_region: "ap-northeast-1".to_string(),
                username: "alice".to_string(),
            }
        );
    }

    /// 全フィールド欠落時はセンチネル値と現在時刻で埋める
    #[test]
    fn test_from_event_all_fields_absent() {
        let record = AuditRecord::from_event(&json!({}), "req-2", fixed_now());

        assert_eq!(record.event_id, "req-2");
        assert_eq!(record.event_time, "2024-05-01T12:30:45.000000");
        assert_eq!(record.event_source, UNKNOWN_SOURCE);
        assert_eq!(record.event_name, UNKNOWN_EVENT);
        assert_eq!(record.aws_region, UNKNOWN_REGION);
        assert_eq!(record.resource_name, UNKNOWN_RESOURCE);
        assert_eq!(record.username, UNKNOWN_USER);
    }

    #[test]
    fn test_from_event_empty_resources() {
        let record = AuditRecord::from_event(&json!({"resources": []}), "req", fixed_now());
        assert_eq!(record.resource_name, UNKNOWN_RESOURCE);
    }

    /// 入れ子の途中が欠けていてもデフォルトになる
    #[test]
    fn test_from_event_partial_user_identity() {
        for event in [
            json!({"detail": {}}),
            json!({"detail": {"userIdentity": {}}}),
            json!({"detail": {"userIdentity": {"type": "Root"}}}),
            json!({"detail": null}),
        ] {
            let record = AuditRecord::from_event(&event, "req", fixed_now());
            assert_eq!(record.username, UNKNOWN_USER);
        }
    }

    /// 文字列でない値は欠落扱い
    #[test]
    fn test_from_event_non_string_values_use_defaults() {
        let event = json!({"source": 1, "region": null, "resources": [42]});
        let record = AuditRecord::from_event(&event, "req", fixed_now());

        assert_eq!(record.event_source, UNKNOWN_SOURCE);
        assert_eq!(record.aws_region, UNKNOWN_REGION);
        assert_eq!(record.resource_name, UNKNOWN_RESOURCE);
    }

    #[test]
    fn test_sample_ec2_event() {
        let event = json!({
            "source": "aws.ec2",
            "detail-type": "EC2 Instance State-change",
            "resources": ["arn:aws:ec2:us-east-1:123456789012:instance/i-123"]
        });

        let record = AuditRecord::from_event(&event, "req", fixed_now());

        assert_eq!(record.username, "UnknownUser");
        assert_eq!(
            record.resource_name,
            "arn:aws:ec2:us-east-1:123456789012:instance/i-123"
        );
        assert_eq!(record.event_source, "aws.ec2");
        assert_eq!(record.event_name, "EC2 Instance State-change");
    }

    #[test]
    fn test_to_item_attribute_names() {
        let record = AuditRecord::from_event(&json!({}), "req-3", fixed_now());
        let item = record.to_item().unwrap();

        assert_eq!(item.len(), 7);
        assert_eq!(item.get(EVENT_ID), Some(&json!("req-3")));
        for name in [
            "EventTime",
            "EventSource",
            "EventName",
            "ResourceName",
            "AWSRegion",
            "Username",
        ] {
            assert!(item.get(name).is_some_and(Value::is_string), "{} missing", name);
        }
    }
}
