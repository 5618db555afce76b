use crate::domain::values::metadata_value::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored vector with its metadata. The key lives in the owning store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl VectorRecord {
    pub fn new(vector: Vec<f32>, metadata: Metadata) -> Self {
        Self {
            vector,
            metadata,
            timestamp: Utc::now(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    pub(crate) fn touch(&mut self) {
        self.timestamp = Utc::now();
    }
}

/// RFC 3339 on the way out. On the way in, timestamps without an offset
/// (`2024-03-01T10:15:00.123456`) are read as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                None => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            }
        }
    }
}
