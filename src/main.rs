use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use playlist_exporter_lib::config::{ExporterConfig, DEFAULT_OUTPUT};
use playlist_exporter_lib::playlist::ExportError;
use playlist_exporter_lib::{run, ExportRequest, ExportSummary};

/// Export metadata for every video in a YouTube playlist to CSV via yt-dlp
#[derive(Parser, Debug)]
#[command(name = "playlist-exporter", version)]
struct Cli {
    /// Playlist URL or ID, e.g. "https://www.youtube.com/playlist?list=PLAYLIST_ID"
    #[arg(allow_hyphen_values = true)]
    playlist_url: Option<String>,

    /// CSV file to write
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

impl Cli {
    /// `None` when no playlist was given; the caller prints usage and exits 0.
    fn into_request(self) -> Option<ExportRequest> {
        let playlist_url = self.playlist_url?;
        Some(ExportRequest {
            playlist_url,
            output: self.output,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("playlist_exporter_lib=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    println!("YouTube Playlist Metadata Exporter");
    println!("----------------------------------");

    let Some(request) = cli.into_request() else {
        println!("Please provide a YouTube playlist URL as an argument.");
        println!("Example: playlist-exporter \"https://www.youtube.com/playlist?list=PLAYLIST_ID\"");
        println!();
        println!("{}", Cli::command().render_usage());
        return;
    };

    let config = ExporterConfig::from_env();

    match run(&request, &config).await {
        Ok(summary) => println!("{}", success_message(&summary)),
        Err(e) if !e.is_fatal() => println!("{}", e),
        Err(e) => {
            report_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}

fn success_message(summary: &ExportSummary) -> String {
    let mut message = format!(
        "Playlist data successfully exported to: {}",
        summary.output.display()
    );
    if summary.skipped > 0 {
        message.push_str(&format!(
            " ({} unreadable lines skipped)",
            summary.skipped
        ));
    }
    message
}

fn report_error(err: &ExportError) {
    match err {
        ExportError::ToolNotFound(_) => {
            println!("Error: {}.", err);
            println!("Please install it from https://github.com/yt-dlp/yt-dlp");
        }
        _ => println!("An error occurred: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_takes_usage_path() {
        let cli = Cli::try_parse_from(["playlist-exporter"]).unwrap();
        assert_eq!(cli.playlist_url, None);
        assert!(cli.into_request().is_none());
    }

    #[test]
    fn test_output_defaults_to_playlist_videos_csv() {
        let cli = Cli::try_parse_from(["playlist-exporter", "PL123"]).unwrap();
        let request = cli.into_request().unwrap();
        assert_eq!(request.playlist_url, "PL123");
        assert_eq!(request.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(request.output, PathBuf::from("playlist_videos.csv"));
    }

    #[test]
    fn test_second_positional_sets_output() {
        let cli = Cli::try_parse_from([
            "playlist-exporter",
            "https://www.youtube.com/playlist?list=PL123",
            "out/videos.csv",
        ])
        .unwrap();
        let request = cli.into_request().unwrap();
        assert_eq!(request.playlist_url, "https://www.youtube.com/playlist?list=PL123");
        assert_eq!(request.output, PathBuf::from("out/videos.csv"));
    }

    #[test]
    fn test_hyphen_leading_locator_is_accepted() {
        let cli = Cli::try_parse_from(["playlist-exporter", "-PLabc"]).unwrap();
        let request = cli.into_request().unwrap();
        assert_eq!(request.playlist_url, "-PLabc");
        assert_eq!(request.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(Cli::try_parse_from(["playlist-exporter", "a", "b.csv", "c"]).is_err());
    }

    #[test]
    fn test_success_message_reports_skipped_lines() {
        let mut summary = ExportSummary {
            videos: 2,
            skipped: 0,
            output: PathBuf::from("/tmp/playlist_videos.csv"),
        };
        assert_eq!(
            success_message(&summary),
            "Playlist data successfully exported to: /tmp/playlist_videos.csv"
        );

        summary.skipped = 3;
        assert_eq!(
            success_message(&summary),
            "Playlist data successfully exported to: /tmp/playlist_videos.csv (3 unreadable lines skipped)"
        );
    }
}
