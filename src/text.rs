use super::*;

/// Fenced code blocks, with an optional language tag after the opening
/// fence. Their contents are emitted as they are.
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)```(?:[^\n`]*\n)?(.*?)```").unwrap()
});

/// Inline markdown, applied top to bottom. Inline code comes first so that
/// link and emphasis markers inside it are already wrapped; bold must run
/// before italic or `*x*` would eat the inner half of `**x**`.
///
/// Links only match `http`, `https` and `mailto` targets. A target may hold
/// balanced parentheses, one level deep.
static INLINE: LazyLock<[(Regex, &str); 4]> = LazyLock::new(|| {
  [
    (Regex::new(r"`([^`\n]+)`").unwrap(), "<code>${1}</code>"),
    (
      Regex::new(
        r"\[([^\]\n]+)\]\(((?i:https?://|mailto:)(?:[^()\s]|\([^()\s]*\))+)\)",
      )
      .unwrap(),
      r#"<a href="${2}">${1}</a>"#,
    ),
    (
      Regex::new(r"\*\*([^*\n](?:[^\n]*?[^*\n])?)\*\*").unwrap(),
      "<strong>${1}</strong>",
    ),
    (
      Regex::new(r"\*([^*\s](?:[^*\n]*?[^*\s])?)\*").unwrap(),
      "<i>${1}</i>",
    ),
  ]
});

static PARAGRAPH_BREAK: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\n[ \t]*\n\s*").unwrap());

/// Escapes `&`, `<`, `>`, `"` and `'` in a single pass, using the named
/// entities `&amp;`, `&lt;`, `&gt;`, `&quot;` and `&apos;`.
///
/// Already escaped text is escaped again: `&amp;` becomes `&amp;amp;`.
#[must_use]
pub fn escape_html(text: &str) -> String {
  // Input apostrophes are gone after encoding, and an input `&#x27;` now
  // reads `&amp;#x27;`, so only encoder output is rewritten here.
  html_escape::encode_quoted_attribute(text).replace("&#x27;", "&apos;")
}

/// Escapes an untrusted comment body and renders it with [`render_markdown`].
#[must_use]
pub fn render_comment(body: &str) -> String {
  render_markdown(&escape_html(body))
}

/// Renders fenced and inline code, links, `**bold**`, `*italic*` and
/// paragraphs.
///
/// This is a fixed sequence of pattern substitutions, not a parser: nested
/// or overlapping constructs and escaped markers are not handled. Fenced
/// code becomes a `<pre>` block of its own, outside any paragraph and with
/// its line breaks untouched. The input is not escaped, see
/// [`render_comment`] for untrusted text.
#[must_use]
pub fn render_markdown(text: &str) -> String {
  let normalized = text.replace("\r\n", "\n");

  let mut rendered = String::new();
  let mut last = 0;

  for captures in FENCED_CODE.captures_iter(&normalized) {
    let (Some(fence), Some(code)) = (captures.get(0), captures.get(1)) else {
      continue;
    };

    rendered.push_str(&render_paragraphs(&normalized[last..fence.start()]));
    rendered.push_str("<pre><code>");
    rendered.push_str(code.as_str());
    rendered.push_str("</code></pre>");

    last = fence.end();
  }

  rendered.push_str(&render_paragraphs(&normalized[last..]));

  rendered
}

fn render_paragraphs(text: &str) -> String {
  let rendered = INLINE.iter().fold(
    text.to_string(),
    |acc, (pattern, replacement)| {
      pattern.replace_all(&acc, *replacement).into_owned()
    },
  );

  PARAGRAPH_BREAK
    .split(rendered.trim())
    .filter(|block| !block.trim().is_empty())
    .map(|block| format!("<p>{}</p>", block.trim().replace('\n', "<br>")))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_html_replaces_markup_characters() {
    assert_eq!(
      escape_html(r#"<b>"x"</b>"#),
      "&lt;b&gt;&quot;x&quot;&lt;/b&gt;"
    );
  }

  #[test]
  fn escape_html_is_not_idempotent() {
    let once = escape_html("a & b");
    assert_eq!(once, "a &amp; b");
    assert_eq!(escape_html(&once), "a &amp;amp; b");
  }

  #[test]
  fn escape_html_uses_named_entities() {
    assert_eq!(escape_html("it's"), "it&apos;s");
    assert_eq!(
      escape_html(r#"<a title='x'>"&"</a>"#),
      "&lt;a title=&apos;x&apos;&gt;&quot;&amp;&quot;&lt;/a&gt;"
    );
    assert_eq!(escape_html("&#x27;"), "&amp;#x27;");
  }

  #[test]
  fn render_markdown_wraps_bold_and_italic() {
    assert_eq!(
      render_markdown("**bold** and *italic*"),
      "<p><strong>bold</strong> and <i>italic</i></p>"
    );
  }

  #[test]
  fn render_markdown_renders_links() {
    assert_eq!(
      render_markdown("see [the docs](https://example.com/docs)"),
      r#"<p>see <a href="https://example.com/docs">the docs</a></p>"#
    );
  }

  #[test]
  fn render_markdown_renders_inline_code() {
    assert_eq!(
      render_markdown("run `cargo doc` first"),
      "<p>run <code>cargo doc</code> first</p>"
    );
  }

  #[test]
  fn render_markdown_renders_fenced_code() {
    assert_eq!(
      render_markdown("```rust\nlet x = 1;\n```"),
      "<pre><code>let x = 1;\n</code></pre>"
    );
  }

  #[test]
  fn render_markdown_keeps_blank_lines_inside_fenced_code() {
    assert_eq!(
      render_markdown("```\nfn a() {\n\n}\n```"),
      "<pre><code>fn a() {\n\n}\n</code></pre>"
    );
  }

  #[test]
  fn render_markdown_sets_fenced_code_between_paragraphs() {
    assert_eq!(
      render_markdown("intro *here*\n```\nlet *x* = 1;\n\nx\n```\nafter"),
      "<p>intro <i>here</i></p>\
       <pre><code>let *x* = 1;\n\nx\n</code></pre>\
       <p>after</p>"
    );
  }

  #[test]
  fn render_markdown_links_only_safe_schemes() {
    for body in [
      "[click](javascript:alert(document.cookie))",
      "[click](JavaScript:alert(1))",
      "[click](data:text/html,hi)",
      "[click](/relative/path)",
    ] {
      assert!(!render_markdown(body).contains("<a"), "{body}");
    }

    assert_eq!(
      render_comment("[click](javascript:alert(document.cookie))"),
      "<p>[click](javascript:alert(document.cookie))</p>"
    );

    assert_eq!(
      render_markdown("[mail me](mailto:ada@example.com)"),
      r#"<p><a href="mailto:ada@example.com">mail me</a></p>"#
    );
  }

  #[test]
  fn render_markdown_keeps_parentheses_in_link_targets() {
    assert_eq!(
      render_markdown(
        "[Rust](https://en.wikipedia.org/wiki/Rust_(programming_language))."
      ),
      "<p><a href=\"https://en.wikipedia.org/wiki/Rust_(programming_language)\">\
       Rust</a>.</p>"
    );
  }

  #[test]
  fn render_markdown_splits_paragraphs() {
    assert_eq!(
      render_markdown("first line\nsecond line\n\n\nnext paragraph\n"),
      "<p>first line<br>second line</p><p>next paragraph</p>"
    );
  }

  #[test]
  fn render_markdown_ignores_lone_asterisks() {
    assert_eq!(render_markdown("2 * 3 = 6"), "<p>2 * 3 = 6</p>");
  }

  #[test]
  fn render_markdown_of_blank_input_is_empty() {
    assert_eq!(render_markdown(" \n\n "), "");
  }

  #[test]
  fn render_comment_escapes_before_rendering() {
    assert_eq!(
      render_comment("<script>*x*</script>"),
      "<p>&lt;script&gt;<i>x</i>&lt;/script&gt;</p>"
    );
  }
}
