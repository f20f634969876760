use super::*;

/// A single comment as served by the cache files.
///
/// Records arrive flat; `children` is filled in by [`CommentIndex::build`]
/// and is always in chronological order. Replies are shared with the
/// index, so cloning a comment does not copy its subtree.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Comment {
  #[serde(default, rename = "name", alias = "author")]
  pub author: Option<String>,
  #[serde(rename = "comment", alias = "body")]
  pub body: String,
  #[serde(default, skip_deserializing)]
  pub children: Vec<Arc<Comment>>,
  #[serde(default)]
  pub email: Option<String>,
  /// Fields the client does not interpret, kept as sent by the server.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  #[serde(default, deserialize_with = "deserialize_optional_id")]
  pub parent_id: Option<String>,
  #[serde(deserialize_with = "deserialize_timestamp")]
  pub submitted_at: DateTime<Utc>,
}

impl Comment {
  pub fn author_or_anonymous(&self) -> &str {
    self
      .author
      .as_deref()
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .unwrap_or("anonymous")
  }

  #[must_use]
  pub fn is_root(&self) -> bool {
    self.parent_id.is_none()
  }

  /// Number of replies below this comment, at any depth.
  #[must_use]
  pub fn reply_count(&self) -> usize {
    let mut stack = self.children.iter().collect::<Vec<_>>();
    let mut count = 0;

    while let Some(comment) = stack.pop() {
      count += 1;
      stack.extend(&comment.children);
    }

    count
  }
}

// Unwinds deep reply chains without recursing once per level.
impl Drop for Comment {
  fn drop(&mut self) {
    let mut stack = std::mem::take(&mut self.children);

    while let Some(child) = stack.pop() {
      if let Ok(mut child) = Arc::try_unwrap(child) {
        stack.append(&mut child.children);
      }
    }
  }
}

/// A comment to be submitted with [`Client::post_comment`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewComment {
  pub author: String,
  pub body: String,
  pub email: String,
  pub parent_id: Option<String>,
  pub slug: String,
}

impl NewComment {
  pub fn new(
    slug: impl Into<String>,
    body: impl Into<String>,
    author: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      author: author.into(),
      body: body.into(),
      email: email.into(),
      parent_id: None,
      slug: slug.into(),
    }
  }

  #[must_use]
  pub fn reply_to(mut self, parent_id: impl Into<String>) -> Self {
    self.parent_id = Some(parent_id.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_flat_record() {
    let comment = serde_json::from_str::<Comment>(
      r#"{
        "id": 7,
        "parent_id": null,
        "submitted_at": "2024-05-01 08:00:00",
        "comment": "First!",
        "name": "ada",
        "email": "ada@example.com",
        "validated": true
      }"#,
    )
    .unwrap();

    assert_eq!(comment.id, "7");
    assert!(comment.is_root());
    assert_eq!(comment.body, "First!");
    assert_eq!(comment.author_or_anonymous(), "ada");
    assert_eq!(comment.email.as_deref(), Some("ada@example.com"));
    assert_eq!(comment.extra.get("validated"), Some(&Value::Bool(true)));
    assert!(comment.children.is_empty());
  }

  #[test]
  fn missing_author_reads_as_anonymous() {
    let comment = serde_json::from_str::<Comment>(
      r#"{"id": "a", "parent_id": "b", "submitted_at": 0, "comment": ""}"#,
    )
    .unwrap();

    assert_eq!(comment.parent_id.as_deref(), Some("b"));
    assert_eq!(comment.author_or_anonymous(), "anonymous");
  }

  #[test]
  fn reply_to_sets_parent() {
    let comment =
      NewComment::new("post", "hi", "bob", "bob@example.com").reply_to("12");

    assert_eq!(comment.parent_id.as_deref(), Some("12"));
    assert_eq!(comment.slug, "post");
  }
}
