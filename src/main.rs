use tourguide::config::Config;
use tourguide::host::{ConsoleSurface, TerminalMapView};
use tourguide::models::{Direction, Mode};
use tourguide::services::position::{GeolocationPlatform, NoGeolocation, TrackReplay};
use tourguide::services::presenter::NotificationPresenter;
use tourguide::services::registry::PoiRegistry;
use tourguide::services::session::{Command, SessionHandle, SessionStatus, StatusMessage};
use tourguide::TourGuideSession;

use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: tourguide [--help]

Tourist guide with proximity notifications for famous places.

Commands (one per line on stdin):
  n | s | e | w     Step the simulated position (also up/down/left/right)
  toggle            Switch between live and simulated position
  live | sim        Select a position source
  status            Show position, banner and visible notifications
  quit              End the session

Environment variables:
  TOURGUIDE_MODE                  live | simulated (default: simulated)
  TOURGUIDE_PLACES_PATH           JSON file replacing the built-in places
  TOURGUIDE_TRACK_PATH            JSON track replayed as the live GPS
  TOURGUIDE_TRACK_INTERVAL_MS     Delay between replayed samples (default: 1000)
  TOURGUIDE_ZOOM                  Map zoom level (default: 16)
  TOURGUIDE_NATIVE_NOTIFICATIONS  default | granted | denied
  TOURGUIDE_SCENE_PATH            Write the map scene as GeoJSON here"
    );
}

fn print_status(status: &SessionStatus) {
    println!("Mode: {}", status.mode);
    match &status.position {
        Some(sample) => {
            println!("Lat: {:.6}", sample.location.lat);
            println!("Lng: {:.6}", sample.location.lng);
            if let Some(acc) = sample.accuracy_label() {
                println!("Accuracy: {} meters", acc);
            }
        }
        None => println!("Waiting for position..."),
    }
    match &status.message {
        Some(StatusMessage::Persistent(text)) => println!("Error: {}", text),
        Some(StatusMessage::Transient(text)) => println!("Warning: {}", text),
        None => {}
    }
    for notice in &status.notices {
        println!("* {} ({})", notice.title, notice.message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if env::args().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourguide=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    let registry = match &config.places_path {
        Some(path) => PoiRegistry::from_file(path)?,
        None => PoiRegistry::builtin()?,
    };
    tracing::info!("Tracking {} famous places", registry.len());

    let platform: Arc<dyn GeolocationPlatform> = match &config.track_path {
        Some(path) => {
            tracing::info!("Live position replays {}", path.display());
            Arc::new(TrackReplay::from_file(path, config.track_interval)?)
        }
        None => {
            tracing::info!("No track configured; live position is unavailable");
            Arc::new(NoGeolocation)
        }
    };

    let presenter = NotificationPresenter::new()
        .with_surface(Arc::new(ConsoleSurface::new(config.native_notifications)));
    let map = Box::new(TerminalMapView::new(config.scene_path.clone()));

    let session = TourGuideSession::new(
        Arc::new(registry),
        platform,
        presenter,
        map,
        config.mode,
        config.zoom,
    );
    let (handle, task) = SessionHandle::spawn(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let command = match input {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "toggle" | "t" => Command::ToggleMode,
            "live" => Command::SetMode(Mode::Live),
            "sim" | "simulated" => Command::SetMode(Mode::Simulated),
            "status" => {
                if let Some(status) = handle.status().await {
                    print_status(&status);
                }
                continue;
            }
            other => match other.parse::<Direction>() {
                Ok(direction) => Command::Step(direction),
                Err(e) => {
                    eprintln!("{}. Run with --help for usage.", e);
                    continue;
                }
            },
        };
        if !handle.send(command).await {
            break;
        }
    }

    handle.send(Command::Shutdown).await;
    task.await?;
    Ok(())
}
