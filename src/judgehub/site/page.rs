extern crate reqwest;
extern crate tokio;

use super::error::{network_error, Error, Result};
use reqwest::{cookie::Jar, Client, Url};
use std::{path::PathBuf, sync::Arc};

/// Where a judge page comes from: a copy saved from the browser, or a live
/// URL fetched with the user's session cookie.
pub enum Page {
    File(PathBuf),
    Remote { client: Client, url: String },
}

/// Client carrying `cookie` for every request to `origin`.
pub fn session_client(origin: &str, cookie: Option<&str>) -> Result<Client> {
    let jar = Jar::default();
    if let (Some(cookie), Ok(url)) = (cookie, origin.parse::<Url>()) {
        for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.add_cookie_str(pair, &url);
        }
    }
    Client::builder()
        .cookie_provider(Arc::new(jar))
        .build()
        .map_err(Error::Builder)
}

impl Page {
    /// `http(s)://` arguments are fetched, anything else is a file path.
    pub fn from_arg(arg: &str, origin: &str, cookie: Option<&str>) -> Result<Self> {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Ok(Page::Remote {
                client: session_client(origin, cookie)?,
                url: arg.to_string(),
            })
        } else {
            Ok(Page::File(PathBuf::from(arg)))
        }
    }

    /// Origin the page was served from, used to rebuild links.
    pub fn origin(&self, fallback: &str) -> String {
        match self {
            Page::Remote { url, .. } => url
                .parse::<Url>()
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_else(|_| fallback.to_string()),
            Page::File(_) => fallback.to_string(),
        }
    }

    pub async fn load(&self) -> Result<String> {
        match self {
            Page::File(path) => tokio::fs::read_to_string(path).await.map_err(Error::Io),
            Page::Remote { client, url } => client
                .get(url)
                .send()
                .await
                .map_err(network_error)?
                .error_for_status()
                .map_err(network_error)?
                .text()
                .await
                .map_err(network_error),
        }
    }
}
