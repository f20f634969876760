use super::*;

/// Read and moderate comments on a static-cache comment server.
#[derive(Debug, Parser)]
#[command(name = "comment-client", version)]
pub(crate) struct Arguments {
  /// Path segment under the endpoint that holds the cache files.
  #[arg(long, env = "COMMENTS_CACHE_URI")]
  cache_uri: String,
  /// Base URL of the comment API.
  #[arg(long, env = "COMMENTS_ENDPOINT")]
  endpoint: String,
  /// Print JSON instead of formatted text.
  #[arg(long, global = true)]
  json: bool,
  /// What to do with replies whose parent is missing: promote or reject.
  #[arg(long, env = "COMMENTS_ORPHAN_POLICY", default_value_t = OrphanPolicy::Promote)]
  orphan_policy: OrphanPolicy,
  #[command(subcommand)]
  subcommand: Subcommand,
  /// Log requests (overrides RUST_LOG).
  #[arg(long, short, global = true)]
  verbose: bool,
}

impl Arguments {
  fn client(&self) -> Result<Client> {
    let config = ClientConfig::new(&self.endpoint, &self.cache_uri)
      .context("invalid client configuration")?
      .with_orphan_policy(self.orphan_policy);

    Ok(Client::new(config))
  }

  fn init_tracing(&self) {
    let filter = if self.verbose {
      EnvFilter::new("comment_client=debug")
    } else {
      EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();
  }

  pub(crate) async fn run(self) -> Result {
    self.init_tracing();

    let client = self.client()?;

    self.subcommand.run(client, self.json).await
  }
}
