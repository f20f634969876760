//! Client for a comment hosting API that serves precomputed comment threads
//! as static JSON cache files and accepts submissions and moderation
//! actions as form-encoded requests.
//!
//! ```no_run
//! # async fn demo() -> comment_client::Result {
//! use comment_client::{Client, ClientConfig};
//!
//! let config = ClientConfig::new("https://api.example.com", "static")?;
//! let mut client = Client::new(config);
//!
//! for comment in client.fetch_comments("/blog/hello-world/").await? {
//!   println!("{} replies to {}", comment.children.len(), comment.id);
//! }
//! # Ok(())
//! # }
//! ```

use {
  chrono::{DateTime, NaiveDateTime, TimeZone, Utc},
  form::{
    DeleteCommentForm, PostCommentForm, SubscriptionForm, UpdateCommentForm,
    ValidateCommentForm,
  },
  percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode},
  regex::Regex,
  reqwest::{Method, StatusCode, Url},
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::{Map, Value},
  std::{
    collections::HashMap,
    env::{self, VarError},
    fmt,
    str::FromStr,
    sync::{Arc, LazyLock},
  },
  utils::{
    deserialize_id, deserialize_optional_id, deserialize_timestamp,
  },
};

pub use {
  client::Client,
  comment::{Comment, NewComment},
  config::{ClientConfig, OrphanPolicy},
  error::Error,
  site_infos::SiteInfos,
  slug::clean_slug,
  text::{escape_html, render_comment, render_markdown},
  thread::{CommentForest, CommentIndex},
};

mod client;
mod comment;
mod config;
mod error;
mod form;
mod site_infos;
mod slug;
mod text;
mod thread;
mod utils;

#[cfg(test)]
mod mock_server;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
