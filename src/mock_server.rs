use {
  super::*,
  axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode as HttpStatus, Uri, header},
    response::{IntoResponse, Response},
  },
  std::{net::SocketAddr, sync::Mutex},
  tokio::net::TcpListener,
};

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
  pub(crate) body: String,
  pub(crate) content_type: Option<String>,
  pub(crate) method: String,
  pub(crate) path: String,
}

/// Answers every request with the same canned response and records what it
/// was sent.
pub(crate) struct MockServer {
  address: SocketAddr,
  shared: Arc<Shared>,
}

struct Shared {
  body: &'static str,
  requests: Mutex<Vec<RecordedRequest>>,
  status: HttpStatus,
}

impl MockServer {
  pub(crate) fn client(&self, cache_uri: &str) -> Client {
    let config = ClientConfig::new(self.endpoint(), cache_uri).unwrap();
    Client::with_http_client(config, local_http_client())
  }

  pub(crate) fn endpoint(&self) -> String {
    format!("http://{}", self.address)
  }

  pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
    self.shared.requests.lock().unwrap().clone()
  }

  pub(crate) async fn start(status: u16, body: &'static str) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let shared = Arc::new(Shared {
      body,
      requests: Mutex::new(Vec::new()),
      status: HttpStatus::from_u16(status).unwrap(),
    });

    let router = Router::new()
      .fallback(record)
      .with_state(Arc::clone(&shared));

    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });

    Self { address, shared }
  }
}

/// An address nothing listens on.
pub(crate) async fn closed_endpoint() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{address}")
}

pub(crate) fn local_http_client() -> reqwest::Client {
  reqwest::Client::builder().no_proxy().build().unwrap()
}

async fn record(
  State(shared): State<Arc<Shared>>,
  method: Method,
  uri: Uri,
  headers: HeaderMap,
  body: String,
) -> Response {
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|value| value.to_str().ok())
    .map(str::to_string);

  shared.requests.lock().unwrap().push(RecordedRequest {
    body,
    content_type,
    method: method.to_string(),
    path: uri
      .path_and_query()
      .map_or_else(|| uri.path().to_string(), ToString::to_string),
  });

  (
    shared.status,
    [(header::CONTENT_TYPE, "application/json")],
    shared.body,
  )
    .into_response()
}
