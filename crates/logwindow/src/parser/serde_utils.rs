/// Record timestamps as `YYYY-MM-DD HH:MM:SS.mmm` strings.
///
/// Keeps the millisecond precision of the source line and stays readable in
/// JSON output, unlike chrono's default RFC 3339 `T` form. A record whose
/// prefix named no real instant serializes as `null`.
pub mod millis {
    use std::fmt;
    use chrono::NaiveDateTime;
    use serde::{Serializer, Deserializer};
    use serde::de::{self, Visitor};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

    pub fn serialize<S>(ts: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.collect_str(&ts.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MillisVisitor;

        impl<'de> Visitor<'de> for MillisVisitor {
            type Value = Option<NaiveDateTime>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("null or a timestamp like 2024-01-01 10:00:00.000")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
                    .map(Some)
                    .map_err(|e| E::custom(format!("invalid timestamp {:?}: {}", value, e)))
            }
        }

        deserializer.deserialize_option(MillisVisitor)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Serialize, Deserialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::millis")]
        ts: Option<NaiveDateTime>,
    }

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 5, 42)
            .unwrap()
    }

    #[test]
    fn test_serialize_keeps_milliseconds() {
        let json = serde_json::to_string(&Wrapper { ts: Some(sample()) }).unwrap();
        assert_eq!(json, r#"{"ts":"2024-01-01 10:00:05.042"}"#);
    }

    #[test]
    fn test_serialize_missing_as_null() {
        let json = serde_json::to_string(&Wrapper { ts: None }).unwrap();
        assert_eq!(json, r#"{"ts":null}"#);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let parsed: Wrapper = serde_json::from_str(r#"{"ts":"2024-01-01 10:00:05.042"}"#).unwrap();
        assert_eq!(parsed.ts, Some(sample()));

        let parsed: Wrapper = serde_json::from_str(r#"{"ts":null}"#).unwrap();
        assert_eq!(parsed.ts, None);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"ts":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_string() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"ts":1700000000}"#);
        assert!(result.is_err());
    }
}
