use clap::Parser;
use spotify_taste::{
    assemble_dataset, collect_audio_features, fetch_playlist_tracks, select_playlists,
    FeatureTable, PlaylistRef, SpotifyHttpClient,
};
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Build a labeled audio-feature dataset from your playlists
#[derive(Parser)]
#[command(
    name = "spotify-taste",
    about = "Build a labeled audio-feature dataset from your playlists",
    long_about = None
)]
struct Cli {
    /// Spotify user id whose playlists are listed for selection
    user_id: String,

    /// Where to write the labeled like/dislike dataset
    #[arg(long, default_value = "dataset.csv")]
    output: PathBuf,

    /// Where to write the unlabeled features of the playlist to analyze
    #[arg(long, default_value = "target.csv")]
    target_output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Cli::parse();

    let token = match std::env::var("SPOTIFY_ACCESS_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprintln!("❌ Error: no access token");
            eprintln!();
            eprintln!("Please set the following environment variable:");
            eprintln!("  SPOTIFY_ACCESS_TOKEN=your_api_access_token");
            eprintln!();
            eprintln!("Tokens come from your developer console's OAuth flow and");
            eprintln!("typically stay valid for one hour.");
            std::process::exit(1);
        }
    };

    let http = http_client::native::NativeClient::new();
    let client = SpotifyHttpClient::new(Box::new(http), token);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let selection = match select_playlists(&client, &args.user_id, &mut input, &mut output).await {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("❌ Selection failed: {e}");
            std::process::exit(1);
        }
    };

    let like = gather_features(&client, &selection.like).await?;
    let dislike = gather_features(&client, &selection.dislike).await?;
    println!(
        "Collected {} liked and {} disliked tracks",
        like.len(),
        dislike.len()
    );

    let dataset = assemble_dataset(like, dislike);
    dataset.write_csv(File::create(&args.output)?)?;
    println!(
        "✅ Wrote {} labeled rows to {}",
        dataset.len(),
        args.output.display()
    );

    let target = gather_features(&client, std::slice::from_ref(&selection.target)).await?;
    target.write_csv(File::create(&args.target_output)?)?;
    println!(
        "✅ Wrote {} rows for the selected playlist to {}",
        target.len(),
        args.target_output.display()
    );

    Ok(())
}

/// Fetch and feature-annotate every playlist in `playlists`, folding the
/// rows into one table in selection order.
async fn gather_features(
    client: &SpotifyHttpClient,
    playlists: &[PlaylistRef],
) -> spotify_taste::Result<FeatureTable> {
    let mut table = FeatureTable::new();
    for reference in playlists {
        let tracks =
            fetch_playlist_tracks(client, &reference.owner_id, &reference.playlist_id).await?;
        if tracks.skipped > 0 {
            eprintln!(
                "⚠️  Skipped {} entries without track data in playlist {}",
                tracks.skipped, reference.playlist_id
            );
        }
        let features = collect_audio_features(client, &tracks.ids, &tracks.entries).await?;
        table.extend(features);
    }
    Ok(table)
}
