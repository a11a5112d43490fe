//! 时段字段的序列化格式：输出 `HH:MM`，输入同时接受 `HH:MM` 和 `HH:MM:SS`

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%H:%M";

pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(|_| serde::de::Error::custom(format!("无效的时间: '{s}'，格式应为 HH:MM")))
}

/// 可选字段版本
pub mod option {
    use super::*;

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => super::serialize(t, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => parse(&s).map(Some).map_err(|_| {
                serde::de::Error::custom(format!("无效的时间: '{s}'，格式应为 HH:MM"))
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_forms() {
        let expected = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        assert_eq!(parse("18:30").unwrap(), expected);
        assert_eq!(parse("18:30:00").unwrap(), expected);
        assert!(parse("25:00").is_err());
        assert!(parse("6pm").is_err());
    }
}
