use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Transform a list of `unix timestamps` -> `naive dates`, e.g.,
///                     `1705795200`      -> `2024-01-21`
pub fn de_timestamps_to_naive_date<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamps: Vec<i64> = Deserialize::deserialize(deserializer)?;
    timestamps
        .into_iter()
        .map(|timestamp| {
            DateTime::from_timestamp(timestamp, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("timestamp out of range: {timestamp}"))
                })
        })
        .collect()
}

/// Yahoo sends volume as an integer, but occasionally as a float (`1.0e7`) for thinly-traded
/// symbols; both land as `Option<i64>`.
pub fn de_nullable_volume<'de, D>(deserializer: D) -> Result<Vec<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Option<serde_json::Value>> = Deserialize::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| match value {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Number(num)) => num
                .as_i64()
                .or_else(|| num.as_f64().map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("ERROR! Unable to parse volume")),
            Some(_) => Err(serde::de::Error::custom("ERROR! Invalid type for volume")),
        })
        .collect()
}
