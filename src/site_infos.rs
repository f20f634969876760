use super::*;

/// Site-wide metadata from `site.json`, mostly comment counts keyed by
/// article slug.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SiteInfos {
  entries: Map<String, Value>,
}

impl SiteInfos {
  /// Numeric entry under `key`; numbers sent as strings are accepted.
  #[must_use]
  pub fn count(&self, key: &str) -> Option<u64> {
    match self.entries.get(key)? {
      Value::Number(n) => n.as_u64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    }
  }

  #[must_use]
  pub fn entries(&self) -> &Map<String, Value> {
    &self.entries
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.entries.get(key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn count_reads_numbers_and_numeric_strings() {
    let infos = serde_json::from_str::<SiteInfos>(
      r#"{"total": 12, "hello_world": "3", "title": "Blog"}"#,
    )
    .unwrap();

    assert_eq!(infos.count("total"), Some(12));
    assert_eq!(infos.count("hello_world"), Some(3));
    assert_eq!(infos.count("title"), None);
    assert_eq!(infos.count("missing"), None);
    assert_eq!(infos.entries().len(), 3);
  }

  #[test]
  fn rejects_non_object_payloads() {
    assert!(serde_json::from_str::<SiteInfos>("[1, 2]").is_err());
  }
}
