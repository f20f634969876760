use super::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("invalid configuration: {0}")]
  Configuration(String),

  /// A comment names a parent that is not part of the fetched thread.
  #[error("comment {id} references missing parent {parent_id}")]
  DanglingReference { id: String, parent_id: String },

  /// Non-2xx reply from one of the cache file endpoints.
  #[error("request to {url} failed with status {status}")]
  Fetch { status: StatusCode, url: String },

  #[error("slug is empty after normalization")]
  InvalidSlug,

  #[error("malformed JSON from {url}")]
  Parse {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  /// Non-2xx reply from a mutating endpoint. `message` is the raw response
  /// body as sent by the server.
  #[error("server rejected request with status {status}: {message}")]
  Submit { message: String, status: StatusCode },

  #[error("could not reach {url}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

impl Error {
  /// Whether trying again later could plausibly succeed.
  ///
  /// Transport failures and 5xx replies are transient; configuration
  /// errors, malformed data and 4xx rejections are not.
  #[must_use]
  pub fn is_transient(&self) -> bool {
    match self {
      Self::Transport { .. } => true,
      Self::Fetch { status, .. } | Self::Submit { status, .. } => {
        status.is_server_error()
      }
      Self::Configuration(_)
      | Self::DanglingReference { .. }
      | Self::InvalidSlug
      | Self::Parse { .. } => false,
    }
  }

  #[must_use]
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Fetch { status, .. } | Self::Submit { status, .. } => Some(*status),
      Self::Transport { source, .. } => source.status(),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn server_errors_are_transient() {
    let error = Error::Submit {
      message: "try later".into(),
      status: StatusCode::SERVICE_UNAVAILABLE,
    };

    assert!(error.is_transient());
    assert_eq!(error.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
  }

  #[test]
  fn rejections_are_not_transient() {
    let error = Error::Submit {
      message: "bad secret".into(),
      status: StatusCode::FORBIDDEN,
    };

    assert!(!error.is_transient());
    assert!(!Error::InvalidSlug.is_transient());
  }

  #[test]
  fn submit_error_displays_server_message() {
    let error = Error::Submit {
      message: "Comment too long".into(),
      status: StatusCode::BAD_REQUEST,
    };

    assert_eq!(
      error.to_string(),
      "server rejected request with status 400 Bad Request: Comment too long"
    );
  }
}
