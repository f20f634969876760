use super::*;

const INDENT: &str = "  ";

const MIN_BODY_WIDTH: usize = 20;

fn push_comment(out: &mut String, comment: &Comment, depth: usize, width: usize) {
  let indent = INDENT.repeat(depth);

  out.push_str(&format!(
    "{indent}{} · {}\n",
    comment.author_or_anonymous(),
    comment.submitted_at.format("%Y-%m-%d %H:%M")
  ));

  let body_width = width.saturating_sub(indent.len() + INDENT.len());

  for line in render_comment_text(&comment.body, body_width).lines() {
    if line.trim().is_empty() {
      out.push('\n');
    } else {
      out.push_str(&format!("{indent}{INDENT}{line}\n"));
    }
  }

  out.push('\n');
}

/// Markdown body as wrapped terminal text.
pub(crate) fn render_comment_text(body: &str, width: usize) -> String {
  let html = render_comment(body);

  html2text::from_read(html.as_bytes(), width.max(MIN_BODY_WIDTH))
    .map(|text| text.trim_end().to_owned())
    .unwrap_or_else(|_| body.trim().to_owned())
}

pub(crate) fn render_site_infos(infos: &SiteInfos) -> String {
  infos
    .entries()
    .iter()
    .map(|(key, value)| match value {
      Value::String(s) => format!("{key}: {s}\n"),
      other => format!("{key}: {other}\n"),
    })
    .collect()
}

/// Comments and their replies, depth first, each reply indented one step
/// further than its parent.
pub(crate) fn render_thread<'a>(
  roots: impl IntoIterator<Item = &'a Comment>,
  width: usize,
) -> String {
  let mut out = String::new();

  let mut stack = roots
    .into_iter()
    .map(|comment| (comment, 0))
    .collect::<Vec<_>>();

  stack.reverse();

  while let Some((comment, depth)) = stack.pop() {
    push_comment(&mut out, comment, depth, width);

    stack.extend(
      comment
        .children
        .iter()
        .rev()
        .map(|child| (child.as_ref(), depth + 1)),
    );
  }

  out
}
