//! Interactive selection of the target, liked, and disliked playlists.

use crate::iterator::{AsyncPaginatedIterator, UserPlaylistsIterator};
use crate::r#trait::SpotifyClient;
use crate::types::{PlaylistMap, PlaylistRef};
use crate::{Result, SpotifyError};
use std::io::{BufRead, Write};

const TARGET_PROMPT: &str =
    "Choose a desired playlist to analyze by entering the corresponding number: ";
const LIKE_PROMPT: &str =
    "Choose playlists that you LIKE (enter each playlist number space separated): ";
const DISLIKE_PROMPT: &str =
    "Choose playlists that you DISLIKE (enter each playlist number space separated): ";

/// The operator's answers to the three selection prompts, resolved to
/// playlist references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSelection {
    /// The playlist whose tracks will be scored
    pub target: PlaylistRef,
    /// Playlists labeled as liked
    pub like: Vec<PlaylistRef>,
    /// Playlists labeled as disliked
    pub dislike: Vec<PlaylistRef>,
}

/// Print a numbered listing of every playlist visible to `user_id`,
/// recording ordinal → playlist as pages are consumed.
///
/// Ordinals are 1-based and keep counting across page boundaries, so the
/// number printed next to a playlist always resolves back to it through
/// the returned map.
pub async fn list_playlists<C: SpotifyClient>(
    client: &C,
    user_id: &str,
    output: &mut dyn Write,
) -> Result<PlaylistMap> {
    let mut map = PlaylistMap::new();
    let mut iterator = UserPlaylistsIterator::new(client, user_id);

    writeln!(output, "All of your playlists:")?;
    writeln!(output)?;

    let mut ordinal = 0usize;
    while let Some(playlist) = iterator.next().await? {
        ordinal += 1;
        writeln!(output, "{ordinal:>3} {}", playlist.name)?;
        map.insert(ordinal, playlist.to_ref());
    }

    Ok(map)
}

/// Write `prompt` and read one line, asking again while the answer is empty.
///
/// Only the empty-line case re-prompts; whatever else the operator types is
/// returned as-is for parsing. A closed input stream is an error rather
/// than an endless re-prompt loop.
fn prompt_line(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    prompt: &str,
) -> Result<String> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(SpotifyError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a selection",
            )));
        }

        let answer = line.trim_end_matches(|c| c == '\r' || c == '\n');
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

fn parse_ordinal(token: &str) -> Result<usize> {
    token
        .trim()
        .parse::<usize>()
        .map_err(|_| SpotifyError::Selection(format!("not a playlist number: {token:?}")))
}

fn parse_ordinal_list(line: &str) -> Result<Vec<usize>> {
    line.split_whitespace().map(parse_ordinal).collect()
}

fn resolve(map: &PlaylistMap, ordinal: usize) -> Result<PlaylistRef> {
    map.resolve(ordinal)
        .cloned()
        .ok_or(SpotifyError::UnknownSelection { ordinal })
}

/// List the user's playlists and prompt for the target, liked, and
/// disliked selections.
///
/// Reader and writer are injected so tests can drive the prompts with
/// in-memory buffers; the CLI passes locked stdin and stdout.
pub async fn select_playlists<C: SpotifyClient>(
    client: &C,
    user_id: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<PlaylistSelection> {
    let map = list_playlists(client, user_id, output).await?;

    let target_line = prompt_line(input, output, TARGET_PROMPT)?;
    let like_line = prompt_line(input, output, LIKE_PROMPT)?;
    let dislike_line = prompt_line(input, output, DISLIKE_PROMPT)?;

    let target = resolve(&map, parse_ordinal(&target_line)?)?;
    let like = parse_ordinal_list(&like_line)?
        .into_iter()
        .map(|ordinal| resolve(&map, ordinal))
        .collect::<Result<Vec<_>>>()?;
    let dislike = parse_ordinal_list(&dislike_line)?
        .into_iter()
        .map(|ordinal| resolve(&map, ordinal))
        .collect::<Result<Vec<_>>>()?;

    Ok(PlaylistSelection {
        target,
        like,
        dislike,
    })
}
