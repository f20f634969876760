use {
  anyhow::Context,
  arguments::Arguments,
  clap::Parser,
  comment_client::{
    Client, ClientConfig, Comment, NewComment, OrphanPolicy, SiteInfos,
    clean_slug, render_comment,
  },
  crossterm::{style::Stylize, terminal},
  futures::future::try_join,
  render::{render_site_infos, render_thread},
  serde_json::Value,
  std::{
    backtrace::BacktraceStatus,
    io::{self, IsTerminal},
    process,
  },
  subcommand::Subcommand,
  tracing_subscriber::EnvFilter,
};

mod arguments;
mod render;
mod subcommand;

const DEFAULT_WIDTH: usize = 80;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

async fn run() -> Result {
  Arguments::parse().run().await
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
