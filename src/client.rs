use super::*;

const PATH_SEGMENT: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'%')
  .add(b'/')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}');

fn segment(value: &str) -> String {
  utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Reads comment threads from the static cache and sends submissions and
/// moderation actions to the API.
///
/// Every call makes exactly one request and reports failures as they are;
/// nothing is retried. The index of the most recent
/// [`fetch_comments`](Self::fetch_comments) is kept for
/// [`comment_by_id`](Self::comment_by_id). Clones share the connection pool
/// but not the index.
#[derive(Clone, Debug)]
pub struct Client {
  client: reqwest::Client,
  config: ClientConfig,
  index: CommentIndex,
}

impl Client {
  /// Looks a comment up in the thread loaded by the last
  /// [`fetch_comments`](Self::fetch_comments).
  #[must_use]
  pub fn comment_by_id(&self, id: &str) -> Option<&Comment> {
    self.index.get(id)
  }

  #[must_use]
  pub fn comments(&self) -> &CommentIndex {
    &self.index
  }

  pub(crate) fn comments_url(&self, slug: &str) -> Result<String> {
    let slug = clean_slug(slug);

    if slug.is_empty() {
      return Err(Error::InvalidSlug);
    }

    Ok(self.config.url(&format!(
      "{}/{}.json",
      self.config.cache_uri(),
      segment(&slug)
    )))
  }

  #[must_use]
  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub async fn delete_comment(&self, comment_id: &str, secret: &str) -> Result {
    self
      .submit(
        Method::DELETE,
        &format!("comment/{}", segment(comment_id)),
        &DeleteCommentForm {
          user_secret: secret,
        },
      )
      .await
  }

  /// Fetches the thread for `slug`, replaces the stored index with it and
  /// returns its roots.
  ///
  /// Taking `&mut self` keeps two fetches on the same client from racing
  /// over the index. Callers that share a client across tasks have to
  /// serialize these calls themselves; whichever finishes last wins.
  pub async fn fetch_comments(&mut self, slug: &str) -> Result<CommentForest> {
    let index = self.load_comments(slug).await?;

    let forest = index.roots().to_vec();

    self.index = index;

    Ok(forest)
  }

  async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
    tracing::debug!(%url, "fetching cache file");

    let response = self.client.get(url).send().await.map_err(|source| {
      Error::Transport {
        url: url.to_string(),
        source,
      }
    })?;

    let status = response.status();

    if !status.is_success() {
      return Err(Error::Fetch {
        status,
        url: url.to_string(),
      });
    }

    let body = response.bytes().await.map_err(|source| Error::Transport {
      url: url.to_string(),
      source,
    })?;

    serde_json::from_slice(&body).map_err(|source| Error::Parse {
      url: url.to_string(),
      source,
    })
  }

  pub async fn fetch_site_infos(&self) -> Result<SiteInfos> {
    self.fetch_json(&self.site_infos_url()).await
  }

  /// Fetches and assembles the thread for `slug` without touching the
  /// stored index.
  pub async fn load_comments(&self, slug: &str) -> Result<CommentIndex> {
    let url = self.comments_url(slug)?;

    let comments = self.fetch_json::<Vec<Comment>>(&url).await?;

    CommentIndex::build(comments, self.config.orphan_policy())
  }

  #[must_use]
  pub fn new(config: ClientConfig) -> Self {
    Self::with_http_client(config, reqwest::Client::new())
  }

  pub async fn post_comment(&self, comment: &NewComment) -> Result {
    self
      .submit(Method::POST, "comment/", &PostCommentForm::from(comment))
      .await
  }

  fn site_infos_url(&self) -> String {
    self
      .config
      .url(&format!("{}/site.json", self.config.cache_uri()))
  }

  async fn submit<F: Serialize>(
    &self,
    method: Method,
    path: &str,
    form: &F,
  ) -> Result {
    let url = self.config.url(path);

    tracing::debug!(%method, %url, "submitting form");

    let response = self
      .client
      .request(method, url.as_str())
      .form(form)
      .send()
      .await
      .map_err(|source| Error::Transport {
        url: url.clone(),
        source,
      })?;

    let status = response.status();

    if status.is_success() {
      return Ok(());
    }

    let message = response.text().await.map_err(|source| Error::Transport {
      url: url.clone(),
      source,
    })?;

    tracing::debug!(%status, %url, "server rejected submission");

    Err(Error::Submit { message, status })
  }

  pub async fn update_comment(
    &self,
    comment_id: &str,
    secret: &str,
    body: &str,
  ) -> Result {
    self
      .submit(
        Method::PATCH,
        &format!("comment/{}", segment(comment_id)),
        &UpdateCommentForm {
          comment: body,
          user_secret: secret,
        },
      )
      .await
  }

  pub async fn update_new_comments_subscription(
    &self,
    article_id: &str,
    user_id: &str,
    secret: &str,
    subscribe: bool,
  ) -> Result {
    self
      .submit(
        Method::PATCH,
        &format!("notification/article/{}/", segment(article_id)),
        &SubscriptionForm {
          subscribe,
          user_id,
          user_secret: secret,
        },
      )
      .await
  }

  pub async fn validate_comment(
    &self,
    comment_id: &str,
    secret: &str,
  ) -> Result {
    self
      .submit(
        Method::POST,
        &format!("comment/validate/{}/", segment(comment_id)),
        &ValidateCommentForm {
          user_secret: secret,
        },
      )
      .await
  }

  /// Uses a caller-built `reqwest::Client`, for timeouts, proxies or TLS
  /// settings.
  #[must_use]
  pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
    Self {
      client,
      config,
      index: CommentIndex::default(),
    }
  }
}
