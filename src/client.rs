use crate::api::{parse_audio_features, parse_playlist_page, parse_track_page};
use crate::r#trait::SpotifyClient;
use crate::types::{AudioFeatures, PlaylistPage, TrackEntryPage};
use crate::{Result, SpotifyError};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Page size requested from the playlist-tracks endpoint.
const TRACK_PAGE_LIMIT: u32 = 100;
/// Page size requested from the playlist-listing endpoint.
const PLAYLIST_PAGE_LIMIT: u32 = 50;
/// How many 429 responses a single request rides out before giving up.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Spotify Web API client backed by any [`HttpClient`] implementation.
///
/// The client is handed an already-acquired bearer token; acquiring and
/// refreshing tokens is the caller's concern. Requests that hit the
/// service's rate limiter sleep for the server-reported interval and retry
/// a bounded number of times; every other failure propagates immediately.
///
/// # Examples
///
/// ```rust,no_run
/// use spotify_taste::{SpotifyClient, SpotifyHttpClient};
///
/// # tokio_test::block_on(async {
/// let http = http_client::native::NativeClient::new();
/// let client = SpotifyHttpClient::new(Box::new(http), "BQAe...".to_string());
///
/// let page = client.user_playlists("some_user").await?;
/// println!("{} playlists on the first page", page.items.len());
/// # Ok::<(), spotify_taste::SpotifyError>(())
/// # });
/// ```
#[derive(Clone)]
pub struct SpotifyHttpClient {
    client: Arc<dyn HttpClient + Send + Sync>,
    access_token: String,
    base_url: String,
}

impl SpotifyHttpClient {
    /// Create a client against the public Web API endpoint.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `access_token` - A valid OAuth bearer token
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, access_token: String) -> Self {
        Self::with_base_url(client, access_token, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL.
    ///
    /// Useful for tests or API-compatible gateways.
    pub fn with_base_url(
        client: Box<dyn HttpClient + Send + Sync>,
        access_token: String,
        base_url: String,
    ) -> Self {
        Self {
            client: Arc::from(client),
            access_token,
            base_url,
        }
    }

    async fn get(&self, url: &str) -> Result<String> {
        let mut attempts = 0;
        loop {
            match self.get_once(url).await {
                Err(SpotifyError::RateLimit { retry_after }) if attempts < MAX_RATE_LIMIT_RETRIES => {
                    attempts += 1;
                    log::warn!(
                        "Rate limited on {url}, waiting {retry_after}s (attempt {attempts}/{MAX_RATE_LIMIT_RETRIES})"
                    );
                    tokio::time::sleep(Duration::from_secs(retry_after)).await;
                }
                other => return other,
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<String> {
        let parsed = url
            .parse::<Url>()
            .map_err(|e| SpotifyError::Http(format!("invalid URL {url}: {e}")))?;

        let mut request = Request::new(Method::Get, parsed);
        request.insert_header("Authorization", format!("Bearer {}", self.access_token));
        request.insert_header("Accept", "application/json");

        log::debug!("GET {url}");
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| SpotifyError::Http(e.to_string()))?;

        let status = response.status();
        if status == 429 {
            let retry_after = response
                .header("retry-after")
                .and_then(|h| h.get(0))
                .and_then(|v| v.as_str().parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SpotifyError::RateLimit { retry_after });
        }
        if status == 401 || status == 403 {
            return Err(SpotifyError::Auth(format!("status {status} for {url}")));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| SpotifyError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(SpotifyError::Api {
                status: status.into(),
                message: body,
            });
        }

        Ok(body)
    }
}

#[async_trait(?Send)]
impl SpotifyClient for SpotifyHttpClient {
    async fn user_playlist_tracks(
        &self,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<TrackEntryPage> {
        let url = format!(
            "{}/users/{}/playlists/{}/tracks?limit={}",
            self.base_url,
            urlencoding::encode(owner_id),
            urlencoding::encode(playlist_id),
            TRACK_PAGE_LIMIT
        );
        let body = self.get(&url).await?;
        parse_track_page(&body)
    }

    async fn next_track_page(&self, next_url: &str) -> Result<TrackEntryPage> {
        let body = self.get(next_url).await?;
        parse_track_page(&body)
    }

    async fn audio_features(&self, ids: &[String]) -> Result<Vec<Option<AudioFeatures>>> {
        let url = format!(
            "{}/audio-features?ids={}",
            self.base_url,
            urlencoding::encode(&ids.join(","))
        );
        let body = self.get(&url).await?;
        parse_audio_features(&body)
    }

    async fn user_playlists(&self, user_id: &str) -> Result<PlaylistPage> {
        let url = format!(
            "{}/users/{}/playlists?limit={}",
            self.base_url,
            urlencoding::encode(user_id),
            PLAYLIST_PAGE_LIMIT
        );
        let body = self.get(&url).await?;
        parse_playlist_page(&body)
    }

    async fn next_playlist_page(&self, next_url: &str) -> Result<PlaylistPage> {
        let body = self.get(next_url).await?;
        parse_playlist_page(&body)
    }
}
