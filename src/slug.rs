use super::*;

static WHITESPACE_RUN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turns a URL path into the name of its cache file.
///
/// Lower-cases, drops one leading and one trailing slash, maps the remaining
/// slashes to `_`, trims, and collapses internal whitespace runs into `_`.
///
/// ```
/// assert_eq!(comment_client::clean_slug("/My-Post/Sub/"), "my-post_sub");
/// ```
#[must_use]
pub fn clean_slug(slug: &str) -> String {
  let lower = slug.to_lowercase();

  let stripped = lower.strip_prefix('/').unwrap_or(&lower);
  let stripped = stripped.strip_suffix('/').unwrap_or(stripped);

  let underscored = stripped.replace('/', "_");

  WHITESPACE_RUN
    .replace_all(underscored.trim(), "_")
    .into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_outer_slashes_and_joins_segments() {
    assert_eq!(clean_slug("/My-Post/Sub/"), "my-post_sub");
  }

  #[test]
  fn lowercases_clean_input() {
    assert_eq!(clean_slug("Already_Clean"), "already_clean");
  }

  #[test]
  fn strips_only_one_slash_on_each_side() {
    assert_eq!(clean_slug("//post//"), "_post_");
  }

  #[test]
  fn whitespace_becomes_underscores() {
    assert_eq!(clean_slug("Hello World"), "hello_world");
    assert_eq!(clean_slug("  Hello \t  World  "), "hello_world");
  }

  #[test]
  fn empty_and_root_paths_normalize_to_empty() {
    assert_eq!(clean_slug(""), "");
    assert_eq!(clean_slug("/"), "");
    assert_eq!(clean_slug("//"), "");
  }
}
