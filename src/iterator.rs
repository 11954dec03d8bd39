use crate::r#trait::SpotifyClient;
use crate::types::{PlaylistItem, PlaylistSummary};
use crate::Result;

use async_trait::async_trait;
use std::collections::VecDeque;

/// Async iterator trait for paginated service data.
///
/// This trait provides a common interface for walking paginated listings
/// one item at a time. Implementations buffer a single page and follow the
/// service's `next` links as the buffer drains; pagination state lives
/// entirely inside the iterator.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method automatically handles pagination, fetching new pages as
    /// needed. Returns `None` when there are no more items available.
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Total number of items in the underlying listing, if known.
    ///
    /// Not available until the first page has been fetched.
    fn total(&self) -> Option<u32> {
        None
    }
}

/// Iterator over every entry of one playlist's track listing.
pub struct PlaylistTracksIterator<'a, C: SpotifyClient> {
    client: &'a C,
    owner_id: String,
    playlist_id: String,
    buffer: VecDeque<PlaylistItem>,
    next_link: Option<String>,
    total: Option<u32>,
    started: bool,
}

impl<'a, C: SpotifyClient> PlaylistTracksIterator<'a, C> {
    /// Create an iterator over the given playlist's entries.
    pub fn new(client: &'a C, owner_id: impl Into<String>, playlist_id: impl Into<String>) -> Self {
        Self {
            client,
            owner_id: owner_id.into(),
            playlist_id: playlist_id.into(),
            buffer: VecDeque::new(),
            next_link: None,
            total: None,
            started: false,
        }
    }
}

#[async_trait(?Send)]
impl<C: SpotifyClient> AsyncPaginatedIterator<PlaylistItem> for PlaylistTracksIterator<'_, C> {
    async fn next(&mut self) -> Result<Option<PlaylistItem>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            let page = if !self.started {
                self.started = true;
                self.client
                    .user_playlist_tracks(&self.owner_id, &self.playlist_id)
                    .await?
            } else if let Some(next_url) = self.next_link.take() {
                self.client.next_track_page(&next_url).await?
            } else {
                return Ok(None);
            };

            self.next_link = page.next;
            self.total = Some(page.total);
            self.buffer.extend(page.items);
            // An empty page with a next link keeps the loop going.
        }
    }

    fn total(&self) -> Option<u32> {
        self.total
    }
}

/// Iterator over every playlist visible to one user.
pub struct UserPlaylistsIterator<'a, C: SpotifyClient> {
    client: &'a C,
    user_id: String,
    buffer: VecDeque<PlaylistSummary>,
    next_link: Option<String>,
    total: Option<u32>,
    started: bool,
}

impl<'a, C: SpotifyClient> UserPlaylistsIterator<'a, C> {
    /// Create an iterator over the user's playlist listing.
    pub fn new(client: &'a C, user_id: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
            buffer: VecDeque::new(),
            next_link: None,
            total: None,
            started: false,
        }
    }
}

#[async_trait(?Send)]
impl<C: SpotifyClient> AsyncPaginatedIterator<PlaylistSummary> for UserPlaylistsIterator<'_, C> {
    async fn next(&mut self) -> Result<Option<PlaylistSummary>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            let page = if !self.started {
                self.started = true;
                self.client.user_playlists(&self.user_id).await?
            } else if let Some(next_url) = self.next_link.take() {
                self.client.next_playlist_page(&next_url).await?
            } else {
                return Ok(None);
            };

            self.next_link = page.next;
            self.total = Some(page.total);
            self.buffer.extend(page.items);
        }
    }

    fn total(&self) -> Option<u32> {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioFeatures, PlaylistPage, TrackEntryPage};

    struct PagedPlaylistsClient {
        pages: Vec<PlaylistPage>,
    }

    fn summary(id: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: id.to_string(),
            name: format!("playlist {id}"),
            owner_id: "alice".to_string(),
        }
    }

    #[async_trait(?Send)]
    impl SpotifyClient for PagedPlaylistsClient {
        async fn user_playlist_tracks(
            &self,
            _owner_id: &str,
            _playlist_id: &str,
        ) -> Result<TrackEntryPage> {
            unimplemented!()
        }

        async fn next_track_page(&self, _next_url: &str) -> Result<TrackEntryPage> {
            unimplemented!()
        }

        async fn audio_features(&self, _ids: &[String]) -> Result<Vec<Option<AudioFeatures>>> {
            unimplemented!()
        }

        async fn user_playlists(&self, _user_id: &str) -> Result<PlaylistPage> {
            Ok(self.pages[0].clone())
        }

        async fn next_playlist_page(&self, next_url: &str) -> Result<PlaylistPage> {
            let index: usize = next_url.rsplit('/').next().unwrap().parse().unwrap();
            Ok(self.pages[index].clone())
        }
    }

    fn paged_client() -> PagedPlaylistsClient {
        PagedPlaylistsClient {
            pages: vec![
                PlaylistPage {
                    items: vec![summary("a"), summary("b")],
                    next: Some("stub://playlists/1".to_string()),
                    offset: 0,
                    total: 3,
                },
                PlaylistPage {
                    items: vec![summary("c")],
                    next: None,
                    offset: 2,
                    total: 3,
                },
            ],
        }
    }

    #[tokio::test]
    async fn collect_all_walks_every_page_in_order() {
        let client = paged_client();
        let mut iterator = UserPlaylistsIterator::new(&client, "alice");

        let playlists = iterator.collect_all().await.unwrap();

        let ids: Vec<&str> = playlists.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(iterator.total(), Some(3));
    }

    #[tokio::test]
    async fn take_stops_mid_page() {
        let client = paged_client();
        let mut iterator = UserPlaylistsIterator::new(&client, "alice");

        let playlists = iterator.take(2).await.unwrap();
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[1].id, "b");

        // The remainder is still reachable.
        let rest = iterator.collect_all().await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, "c");
    }

    #[tokio::test]
    async fn exhausted_iterator_keeps_returning_none() {
        let client = paged_client();
        let mut iterator = UserPlaylistsIterator::new(&client, "alice");

        iterator.collect_all().await.unwrap();
        assert!(iterator.next().await.unwrap().is_none());
        assert!(iterator.next().await.unwrap().is_none());
    }
}
