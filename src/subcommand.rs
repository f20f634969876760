use super::*;

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Subcommand {
  /// Print the thread for an article.
  Comments { slug: String },
  /// Delete a comment.
  Delete {
    id: String,
    #[arg(long, env = "COMMENTS_SECRET")]
    secret: String,
  },
  /// Submit a new comment or a reply.
  Post {
    slug: String,
    body: String,
    #[arg(long)]
    author: String,
    #[arg(long)]
    email: String,
    /// Id of the comment being replied to.
    #[arg(long)]
    parent: Option<String>,
  },
  /// Print a single comment and its replies.
  Show { slug: String, id: String },
  /// Print site-wide comment counts.
  Site,
  /// Turn new-comment notifications for an article on or off.
  Subscribe {
    article_id: String,
    #[arg(long)]
    user_id: String,
    #[arg(long, env = "COMMENTS_SECRET")]
    secret: String,
    /// Unsubscribe instead.
    #[arg(long)]
    off: bool,
  },
  /// Replace the text of a comment.
  Update {
    id: String,
    body: String,
    #[arg(long, env = "COMMENTS_SECRET")]
    secret: String,
  },
  /// Approve a pending comment.
  Validate {
    id: String,
    #[arg(long, env = "COMMENTS_SECRET")]
    secret: String,
  },
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn terminal_width() -> usize {
  terminal::size()
    .map(|(columns, _)| usize::from(columns))
    .unwrap_or(DEFAULT_WIDTH)
}

impl Subcommand {
  pub(crate) async fn run(self, mut client: Client, json: bool) -> Result {
    match self {
      Self::Comments { slug } => {
        let (infos, index) =
          try_join(client.fetch_site_infos(), client.load_comments(&slug))
            .await
            .with_context(|| format!("failed to load comments for `{slug}`"))?;

        if json {
          return print_json(index.roots());
        }

        let total = infos.count(&clean_slug(&slug)).unwrap_or_else(|| {
          u64::try_from(index.len()).unwrap_or(u64::MAX)
        });

        println!("{total} comments\n");
        print!(
          "{}",
          render_thread(
            index.roots().iter().map(AsRef::as_ref),
            terminal_width()
          )
        );
      }
      Self::Delete { id, secret } => {
        client
          .delete_comment(&id, &secret)
          .await
          .with_context(|| format!("failed to delete comment {id}"))?;

        println!("deleted comment {id}");
      }
      Self::Post {
        slug,
        body,
        author,
        email,
        parent,
      } => {
        let mut comment = NewComment::new(&slug, body, author, email);

        if let Some(parent) = parent {
          comment = comment.reply_to(parent);
        }

        client
          .post_comment(&comment)
          .await
          .with_context(|| format!("failed to post comment on `{slug}`"))?;

        println!("comment submitted");
      }
      Self::Show { slug, id } => {
        client
          .fetch_comments(&slug)
          .await
          .with_context(|| format!("failed to load comments for `{slug}`"))?;

        let comment = client
          .comment_by_id(&id)
          .with_context(|| format!("no comment with id {id} on `{slug}`"))?;

        if json {
          return print_json(comment);
        }

        print!(
          "{}",
          render_thread([comment], terminal_width())
        );
      }
      Self::Site => {
        let infos = client
          .fetch_site_infos()
          .await
          .context("failed to load site infos")?;

        if json {
          return print_json(&infos);
        }

        print!("{}", render_site_infos(&infos));
      }
      Self::Subscribe {
        article_id,
        user_id,
        secret,
        off,
      } => {
        client
          .update_new_comments_subscription(&article_id, &user_id, &secret, !off)
          .await
          .with_context(|| {
            format!("failed to update subscription for article {article_id}")
          })?;

        if off {
          println!("unsubscribed from article {article_id}");
        } else {
          println!("subscribed to article {article_id}");
        }
      }
      Self::Update { id, body, secret } => {
        client
          .update_comment(&id, &secret, &body)
          .await
          .with_context(|| format!("failed to update comment {id}"))?;

        println!("updated comment {id}");
      }
      Self::Validate { id, secret } => {
        client
          .validate_comment(&id, &secret)
          .await
          .with_context(|| format!("failed to validate comment {id}"))?;

        println!("validated comment {id}");
      }
    }

    Ok(())
  }
}
