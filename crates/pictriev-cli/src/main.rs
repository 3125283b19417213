//! Command-line front end for the Pictriev client.
//!
//! ```text
//! pictriev detect <image-url>
//! pictriev upload <path>
//! pictriev whois <image-id> <face-id> [lang]
//! ```

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pictriev_client::{Language, PictrievClient};

const USAGE: &str = "usage:
  pictriev detect <image-url>
  pictriev upload <path>
  pictriev whois <image-id> <face-id> [lang]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let client = PictrievClient::from_env().context("failed to create Pictriev client")?;
    info!("Using endpoint {}", client.config().base_url);

    match args.first().map(String::as_str) {
        Some("detect") => {
            let url = arg(&args, 1, "image-url")?;
            print_json(&client.find_face_url(url).await?)
        }
        Some("upload") => {
            let path = arg(&args, 1, "path")?;
            print_json(&client.find_face_file(path).await?)
        }
        Some("whois") => {
            let image_id = arg(&args, 1, "image-id")?;
            let face_id: u32 = arg(&args, 2, "face-id")?
                .parse()
                .context("face-id must be a non-negative integer")?;
            let lang = match args.get(3) {
                Some(code) => code.parse::<Language>()?,
                None => Language::default(),
            };
            print_json(&client.whois(image_id, face_id, lang).await?)
        }
        Some(other) => bail!("unknown command {:?}\n{}", other, USAGE),
        None => bail!("{}", USAGE),
    }
}

/// Colored output by default, JSON when `LOG_FORMAT=json`.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pictriev=info,warn"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing <{}>\n{}", name, USAGE))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
