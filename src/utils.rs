use super::*;

fn id_from_value<E: de::Error>(value: Value) -> Result<Option<String>, E> {
  match value {
    Value::Null => Ok(None),
    Value::String(s) if s.trim().is_empty() => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Number(n) => Ok(Some(n.to_string())),
    Value::Bool(b) => Err(E::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Value::Array(_) => {
      Err(E::invalid_type(Unexpected::Seq, &"string or number"))
    }
    Value::Object(_) => {
      Err(E::invalid_type(Unexpected::Map, &"string or number"))
    }
  }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  id_from_value(Value::deserialize(deserializer)?)?
    .ok_or_else(|| de::Error::invalid_value(Unexpected::Unit, &"an identifier"))
}

pub(crate) fn deserialize_optional_id<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<Value>::deserialize(deserializer)? {
    None => Ok(None),
    Some(value) => id_from_value(value),
  }
}

pub(crate) fn deserialize_timestamp<'de, D>(
  deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::Number(n) => {
      let timestamp = if let Some(seconds) = n.as_i64() {
        Utc.timestamp_opt(seconds, 0).single()
      } else {
        n.as_f64().and_then(|seconds| {
          #[allow(clippy::cast_possible_truncation)]
          let millis = (seconds * 1000.0).round() as i64;
          Utc.timestamp_millis_opt(millis).single()
        })
      };

      timestamp.ok_or_else(|| {
        de::Error::invalid_value(
          Unexpected::Other("out of range number"),
          &"a unix timestamp",
        )
      })
    }
    Value::String(s) => parse_timestamp(&s).ok_or_else(|| {
      de::Error::invalid_value(Unexpected::Str(&s), &"a timestamp")
    }),
    Value::Null => Err(de::Error::invalid_type(Unexpected::Unit, &"a timestamp")),
    Value::Bool(b) => {
      Err(de::Error::invalid_type(Unexpected::Bool(b), &"a timestamp"))
    }
    Value::Array(_) => {
      Err(de::Error::invalid_type(Unexpected::Seq, &"a timestamp"))
    }
    Value::Object(_) => {
      Err(de::Error::invalid_type(Unexpected::Map, &"a timestamp"))
    }
  }
}

/// Accepts RFC 3339 as well as the `YYYY-MM-DD HH:MM:SS` form, which is
/// read as UTC.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
  let text = text.trim();

  if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
    return Some(timestamp.with_timezone(&Utc));
  }

  ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    .map(|naive| naive.and_utc())
}
