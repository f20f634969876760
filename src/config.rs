use super::*;

/// What to do with a comment whose parent is not part of the fetched set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrphanPolicy {
  /// Show the comment as a root, at its chronological position.
  #[default]
  Promote,
  /// Fail the whole fetch with [`Error::DanglingReference`].
  Reject,
}

impl FromStr for OrphanPolicy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "promote" => Ok(Self::Promote),
      "reject" => Ok(Self::Reject),
      other => Err(Error::Configuration(format!(
        "unknown orphan policy `{other}`, expected `promote` or `reject`"
      ))),
    }
  }
}

impl fmt::Display for OrphanPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Promote => "promote",
      Self::Reject => "reject",
    })
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
  cache_uri: String,
  endpoint: Url,
  orphan_policy: OrphanPolicy,
}

impl ClientConfig {
  pub const CACHE_URI_VAR: &str = "COMMENTS_CACHE_URI";

  pub const ENDPOINT_VAR: &str = "COMMENTS_ENDPOINT";

  pub const ORPHAN_POLICY_VAR: &str = "COMMENTS_ORPHAN_POLICY";

  #[must_use]
  pub fn cache_uri(&self) -> &str {
    &self.cache_uri
  }

  #[must_use]
  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }

  /// Reads a variable, telling an unset variable apart from one that holds
  /// something other than unicode.
  fn env_value(
    name: &str,
    value: Result<String, VarError>,
  ) -> Result<Option<String>> {
    match value {
      Ok(value) => Ok(Some(value)),
      Err(VarError::NotPresent) => Ok(None),
      Err(VarError::NotUnicode(_)) => Err(Error::Configuration(format!(
        "{name} is not valid unicode"
      ))),
    }
  }

  pub fn from_env() -> Result<Self> {
    let required = |name: &str| {
      Self::env_value(name, env::var(name))?.ok_or_else(|| {
        Error::Configuration(format!("{name} is not set"))
      })
    };

    let config = Self::new(
      required(Self::ENDPOINT_VAR)?,
      required(Self::CACHE_URI_VAR)?,
    )?;

    match Self::env_value(
      Self::ORPHAN_POLICY_VAR,
      env::var(Self::ORPHAN_POLICY_VAR),
    )? {
      Some(policy) => Ok(config.with_orphan_policy(policy.parse()?)),
      None => Ok(config),
    }
  }

  /// Validates and stores the endpoint base URL and the path segment under
  /// which the cache files live.
  pub fn new(
    endpoint: impl AsRef<str>,
    cache_uri: impl AsRef<str>,
  ) -> Result<Self> {
    let endpoint = endpoint.as_ref().trim();

    if endpoint.is_empty() {
      return Err(Error::Configuration("endpoint is required".into()));
    }

    let cache_uri = cache_uri.as_ref().trim().trim_matches('/');

    if cache_uri.is_empty() {
      return Err(Error::Configuration("cache URI is required".into()));
    }

    let endpoint = Url::parse(endpoint).map_err(|error| {
      Error::Configuration(format!("invalid endpoint `{endpoint}`: {error}"))
    })?;

    if !matches!(endpoint.scheme(), "http" | "https") {
      return Err(Error::Configuration(format!(
        "endpoint must be an http or https URL, got `{endpoint}`"
      )));
    }

    if endpoint.query().is_some() || endpoint.fragment().is_some() {
      return Err(Error::Configuration(format!(
        "endpoint must not carry a query or fragment, got `{endpoint}`"
      )));
    }

    Ok(Self {
      cache_uri: cache_uri.to_string(),
      endpoint,
      orphan_policy: OrphanPolicy::default(),
    })
  }

  #[must_use]
  pub fn orphan_policy(&self) -> OrphanPolicy {
    self.orphan_policy
  }

  /// `{endpoint}/{path}` with exactly one slash at the seam.
  pub(crate) fn url(&self, path: &str) -> String {
    format!(
      "{}/{}",
      self.endpoint.as_str().trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }

  #[must_use]
  pub fn with_orphan_policy(mut self, orphan_policy: OrphanPolicy) -> Self {
    self.orphan_policy = orphan_policy;
    self
  }
}
