// Field order is the wire order.
#![allow(clippy::arbitrary_source_item_ordering)]

use super::*;

#[derive(Debug, Serialize)]
pub(crate) struct PostCommentForm<'a> {
  pub(crate) slug: &'a str,
  pub(crate) comment: &'a str,
  pub(crate) name: &'a str,
  pub(crate) email: &'a str,
  pub(crate) parent_id: &'a str,
}

impl<'a> From<&'a NewComment> for PostCommentForm<'a> {
  fn from(comment: &'a NewComment) -> Self {
    Self {
      slug: &comment.slug,
      comment: &comment.body,
      name: &comment.author,
      email: &comment.email,
      parent_id: comment.parent_id.as_deref().unwrap_or_default(),
    }
  }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateCommentForm<'a> {
  pub(crate) comment: &'a str,
  pub(crate) user_secret: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteCommentForm<'a> {
  pub(crate) user_secret: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValidateCommentForm<'a> {
  pub(crate) user_secret: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscriptionForm<'a> {
  pub(crate) subscribe: bool,
  pub(crate) user_id: &'a str,
  pub(crate) user_secret: &'a str,
}
