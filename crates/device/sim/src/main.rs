//! Simulated device: the send form and history screen as subcommands.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr as _;
use notify_core::{NotificationRecord, RemoteMessage, Screen};
use notify_device::{
    Alerter, Delivery, Device, DeviceConfig, IntakePipeline, Navigator, RelayClient, router,
};
use notify_push::FixedTokenSource;
use notify_storage::{KeyValueStore, SqliteStorage};
use tokio::io::AsyncBufReadExt as _;

#[derive(Parser)]
#[command(name = "notify-device")]
#[command(about = "Simulated device for the notification relay", long_about = None)]
struct Cli {
    /// Payload of the notification that launched the app (JSON)
    #[arg(long, global = true)]
    launch: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show this device's push token
    Token {
        /// Token the transport rotated to
        #[arg(long)]
        refresh: Option<String>,
    },

    /// Send a notification to this device through the relay
    Send {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
    },

    /// Show the notification history, newest first
    History,

    /// Delete the notification at a history position
    Delete { index: usize },

    /// Delete all notifications
    Clear,

    /// Show the badge count
    Badge,

    /// Simulate a delivery while the app is on screen
    Deliver {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        screen: Option<String>,
    },

    /// Simulate tapping a notification while the app is in the background
    Open {
        #[arg(long)]
        screen: Option<String>,
    },

    /// Read deliveries as JSON lines from stdin
    Listen,

    /// Show the current screen, or switch to the named route
    Screen { route: Option<String> },
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DeviceConfig::from_env();

    let storage =
        SqliteStorage::new(&config.database_url).wrap_err("failed to initialize storage")?;
    storage
        .run_migrations()
        .wrap_err("failed to run migrations")?;

    let tokens = match config.device_token {
        Some(token) => FixedTokenSource::granted(token),
        None => FixedTokenSource::unavailable(),
    };

    let launch = cli
        .launch
        .as_deref()
        .map(RemoteMessage::from_json)
        .transpose()
        .wrap_err("invalid --launch payload")?;

    let device = Device::start(
        storage,
        tokens,
        RelayClient::new(&config.relay_url),
        launch.as_ref(),
    )
    .await;
    let intake = device.intake(|title: &str, body: &str| println!("[{title}] {body}"));

    match cli.command {
        Commands::Token { refresh } => {
            if let Some(token) = refresh {
                device.refresh_token(token).await;
            }
            let token = device.tokens().cached().await;
            if token.is_empty() {
                println!("(no token)");
            } else {
                println!("{token}");
            }
        }
        Commands::Send { title, body } => match device.send(&title, &body).await {
            Ok(receipt) => println!("Success: Notification sent ({})", receipt.response),
            Err(e) => {
                println!("Error: {e}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::History => print_history(&device.history().await?),
        Commands::Delete { index } => match device.delete(index).await {
            Ok(remaining) => print_history(&remaining),
            Err(e) => {
                println!("Error: {e}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Clear => {
            device.clear().await?;
            print_history(&[]);
        }
        Commands::Badge => println!("{}", device.inbox().badge().label()),
        Commands::Deliver {
            title,
            body,
            screen,
        } => {
            let mut message = RemoteMessage::new(title, body);
            message.data.screen = screen;
            intake.handle(Delivery::Foreground(message)).await;
            println!("{}", device.inbox().badge().label());
        }
        Commands::Open { screen } => {
            let mut message = RemoteMessage::default();
            message.data.screen = screen;
            intake.handle(Delivery::Opened(message)).await;
            println!("{}", device.navigator().current());
        }
        Commands::Listen => {
            let screens = watch_screens(device.navigator());
            listen(&intake).await?;
            screens.abort();
            println!("{}", device.inbox().badge().label());
            println!("{}", device.navigator().current());
        }
        Commands::Screen { route } => {
            if let Some(route) = route {
                let Some(screen) = Screen::from_route_name(&route) else {
                    println!("Error: unknown route {route:?}");
                    return Ok(ExitCode::FAILURE);
                };
                router::navigate(screen, None);
            }
            println!("{}", device.navigator().current());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_history(records: &[NotificationRecord]) {
    if records.is_empty() {
        println!("No notifications to show.");
        return;
    }

    for (index, record) in records.iter().enumerate() {
        println!("{index:>3}  {}", record.title);
        println!("     {}", record.body);
    }
}

/// Print every screen change while deliveries are processed.
fn watch_screens(navigator: &Navigator) -> tokio::task::JoinHandle<()> {
    let mut screens = navigator.subscribe();
    tokio::spawn(async move {
        while screens.changed().await.is_ok() {
            let screen = screens.borrow_and_update().screen;
            println!("-> {screen}");
        }
    })
}

/// Feed JSON-line deliveries from stdin through the intake pipeline.
async fn listen<S, A>(intake: &IntakePipeline<S, A>) -> color_eyre::eyre::Result<()>
where
    S: KeyValueStore,
    A: Alerter,
{
    let (tx, rx) = tokio::sync::mpsc::channel(16);

    let reader = tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Delivery>(&line) {
                Ok(delivery) => {
                    if tx.send(delivery).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "skipping malformed delivery"),
            }
        }

        Ok::<_, std::io::Error>(())
    });

    intake.run(rx).await;

    reader
        .await
        .wrap_err("stdin reader failed")?
        .wrap_err("failed to read deliveries")?;

    Ok(())
}
