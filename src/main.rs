use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use url::Url;

use spotify2youtube::{Config, TransferOutcome, TransferService};

#[derive(Parser)]
#[command(name = "spotify2youtube")]
#[command(about = "Copy Spotify playlists to YouTube")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your Spotify playlists
    ListPlaylists,

    /// Copy one Spotify playlist into a new private YouTube playlist
    Transfer {
        /// Spotify playlist ID to copy
        playlist_id: String,
    },

    /// Show setup guide
    Setup,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Commands::ListPlaylists => {
            list_playlists().await?;
        }
        Commands::Transfer { playlist_id } => {
            transfer(&playlist_id).await?;
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        println!("{}", "Missing configuration:".red());
        for item in &missing {
            println!("   - {}", item);
        }
        println!(
            "\n{}",
            "Please copy .env.example to .env and fill in your credentials.".yellow()
        );
        std::process::exit(1);
    }

    Ok(config)
}

fn prompt_for_code(platform: &str, auth_url: &str) -> Result<String> {
    println!("\nOpen this URL in your browser to authorize {}:", platform);
    println!("{}\n", auth_url);

    print!("Enter the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut redirect_url = String::new();
    io::stdin().read_line(&mut redirect_url)?;

    extract_code(redirect_url.trim())
}

fn extract_code(redirect_url: &str) -> Result<String> {
    let url = Url::parse(redirect_url).context("Invalid redirect URL")?;
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| anyhow!("No code parameter in redirect URL"))
}

async fn authenticate_source(service: &mut TransferService) -> Result<()> {
    let code = prompt_for_code("Spotify", &service.source_auth_url()?)?;
    service
        .complete_source_auth(&code)
        .await
        .context("Spotify authentication failed")?;
    Ok(())
}

async fn authenticate_destination(service: &mut TransferService) -> Result<()> {
    let code = prompt_for_code("YouTube", &service.destination_auth_url()?)?;
    service
        .complete_destination_auth(&code)
        .await
        .context("YouTube authentication failed")?;
    Ok(())
}

async fn list_playlists() -> Result<()> {
    println!("{}", "Your Spotify Playlists".cyan().bold());
    println!("{}", "=".repeat(50));

    let config = load_config()?;
    let mut service = TransferService::new(&config);

    authenticate_source(&mut service).await?;

    let playlists = service
        .list_source_playlists()
        .await
        .context("Failed to fetch playlists")?;

    if playlists.is_empty() {
        println!("{}", "No playlists found".yellow());
        return Ok(());
    }

    for (i, playlist) in playlists.iter().enumerate() {
        println!(
            "{:2}. {} ({} tracks)",
            i + 1,
            playlist.title.green(),
            playlist.item_count
        );
        println!("     {}", playlist.id.cyan());
    }

    println!(
        "\n{}",
        format!("Total: {} playlists", playlists.len()).cyan()
    );

    Ok(())
}

async fn transfer(playlist_id: &str) -> Result<()> {
    println!("{}", "Spotify to YouTube Playlist Transfer".cyan().bold());
    println!("{}", "=".repeat(50));

    let config = load_config()?;
    let mut service = TransferService::new(&config);

    authenticate_source(&mut service).await?;
    authenticate_destination(&mut service).await?;

    let status = service.auth_status();
    if status.source && status.destination {
        println!("{}", "Both platforms authenticated".green());
    }

    // Ctrl-C stops the per-track loop and keeps the partial report.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message("Transferring tracks...");

    let report = service.transfer(playlist_id, &cancel).await?;

    pb.finish_and_clear();

    println!();
    println!("{}", "=".repeat(50));
    println!("{}", "TRANSFER SUMMARY".bold());
    println!("{}", "=".repeat(50));
    println!(
        "Destination playlist: {} ({})",
        report.destination_playlist.title.green(),
        report.destination_playlist.id
    );
    println!("Tracks processed: {}", report.outcomes.len());
    println!("Added: {}", report.added().to_string().green());
    println!("Skipped (no media): {}", report.skipped().to_string().yellow());
    println!("Failed: {}", report.failed().to_string().red());

    if !report.complete {
        println!(
            "{}",
            "Transfer was cancelled; the playlist is only partially filled.".yellow()
        );
    }

    let failures: Vec<_> = report
        .outcomes
        .iter()
        .enumerate()
        .filter_map(|(i, outcome)| match outcome {
            TransferOutcome::SearchFailed { reason } => Some((i, "search", reason)),
            TransferOutcome::AddFailed { reason } => Some((i, "add", reason)),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        println!("\nFailed tracks:");
        for (index, stage, reason) in failures {
            println!("  #{:3} {} failed: {}", index + 1, stage, reason.red());
        }
    }

    if report.complete {
        println!("\n{}", "Transfer completed!".green());
    }

    Ok(())
}

fn show_setup_guide() {
    println!("{}", "Spotify to YouTube Transfer Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. Spotify API Setup".yellow());
    println!("   - Go to https://developer.spotify.com/dashboard/");
    println!("   - Create a new app");
    println!("   - Copy your Client ID and Client Secret");
    println!("   - Add 'http://127.0.0.1:8080/callback' as a redirect URI");

    println!("\n{}", "2. YouTube API Setup".yellow());
    println!("   - Go to https://console.cloud.google.com/");
    println!("   - Create a project and enable the YouTube Data API v3");
    println!("   - Create OAuth client credentials");
    println!("   - Add 'http://127.0.0.1:8080/youtube/callback' as a redirect URI");

    println!("\n{}", "3. Configuration".yellow());
    println!("   - Create a .env file with:");
    println!("     SPOTIFY_CLIENT_ID=your_spotify_client_id");
    println!("     SPOTIFY_CLIENT_SECRET=your_spotify_client_secret");
    println!("     SPOTIFY_REDIRECT_URI=http://127.0.0.1:8080/callback");
    println!("     YOUTUBE_CLIENT_ID=your_youtube_client_id");
    println!("     YOUTUBE_CLIENT_SECRET=your_youtube_client_secret");
    println!("     YOUTUBE_REDIRECT_URI=http://127.0.0.1:8080/youtube/callback");

    println!("\n{}", "4. Usage".yellow());
    println!("   - spotify2youtube list-playlists      (to see your playlists)");
    println!("   - spotify2youtube transfer <id>       (to copy a playlist)");

    println!("\n{}", "Ready to start transferring!".green());
}
