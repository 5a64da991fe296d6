mod common;
mod config;
mod invitation;
mod storage;
mod ui;
mod view;

use anyhow::Context as _;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::time::Duration;

use config::AppConfig;
use invitation::{Countdown, CopyOutcome, Osc52Clipboard, SystemClipboard, copy_text};
use storage::{GuestbookStore, MemorySlots, SlotStorage, SqliteSlots};
use ui::{GuestbookForm, InvitationApp};

#[derive(Parser)]
#[command(
    name = "invitation_guestbook",
    version,
    about = "Event invitation with a persistent guestbook"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Keep the guestbook in memory only
    #[arg(long)]
    ephemeral: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Page URL the invitation was opened with (reads `?to=`)
    #[arg(long, global = true)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Mode {
    /// Read or write the guestbook
    Guestbook {
        #[command(subcommand)]
        action: GuestbookAction,
    },
    /// Print the greeting and guestbook as HTML
    Render,
    /// Show the time left until the event
    Countdown {
        /// Keep ticking once per second
        #[arg(long)]
        watch: bool,
    },
    /// Copy the gift account number to the clipboard
    CopyAccount,
}

#[derive(Subcommand)]
enum GuestbookAction {
    /// Sign the guestbook
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Print entries, newest first
    List,
    /// Delete every entry
    Clear,
}

type Store = GuestbookStore<Box<dyn SlotStorage>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let recipient = cli.url.as_deref().and_then(invitation::recipient_from_url);

    match cli.mode {
        None => {
            let store = open_store(&app_config, cli.ephemeral)?;
            run_invitation(store, recipient, &app_config)
        }
        Some(Mode::Guestbook { action }) => {
            let mut store = open_store(&app_config, cli.ephemeral)?;
            run_guestbook(&mut store, action, recipient)
        }
        Some(Mode::Render) => {
            let store = open_store(&app_config, cli.ephemeral)?;
            let rendered = view::render_guestbook(&store.list());
            println!("{}", view::render_greeting(recipient.as_deref()));
            println!(r#"<div id="gbMeta">{}</div>"#, rendered.meta);
            println!(r#"<div id="gbList">{}</div>"#, rendered.html);
            Ok(())
        }
        Some(Mode::Countdown { watch }) => run_countdown(event_time(&app_config)?, watch).await,
        Some(Mode::CopyAccount) => {
            let mut primary = SystemClipboard;
            let mut fallback = Osc52Clipboard;
            match copy_text(&mut primary, &mut fallback, &app_config.account_number) {
                CopyOutcome::Copied => println!("Nomor rekening disalin"),
                CopyOutcome::Manual(message) => eprintln!("{message}"),
            }
            Ok(())
        }
    }
}

fn open_store(app_config: &AppConfig, ephemeral: bool) -> anyhow::Result<Store> {
    let slots: Box<dyn SlotStorage> = if ephemeral {
        log::info!("Using in-memory guestbook");
        Box::new(MemorySlots::with_quota(app_config.quota_bytes))
    } else {
        let slots = SqliteSlots::open(
            &app_config.database_path,
            &app_config.origin,
            app_config.quota_bytes,
        )
        .with_context(|| format!("opening {}", app_config.database_path))?;
        log::info!(
            "Guestbook slots for origin `{}` at {}",
            slots.origin(),
            app_config.database_path
        );
        Box::new(slots)
    };
    Ok(GuestbookStore::new(slots, app_config.store_key.clone()))
}

fn event_time(app_config: &AppConfig) -> anyhow::Result<DateTime<FixedOffset>> {
    invitation::parse_event_time(&app_config.event_time)
        .with_context(|| format!("invalid event_time `{}`", app_config.event_time))
}

fn run_guestbook(
    store: &mut Store,
    action: GuestbookAction,
    recipient: Option<String>,
) -> anyhow::Result<()> {
    match action {
        GuestbookAction::Add { name, message } => {
            let mut form = GuestbookForm::prefilled(recipient.as_deref());
            if let Some(name) = name {
                form.name = name;
            }
            form.message = message;
            match form.submit(store)? {
                Some(entry) => println!("{} ({})", entry.name, view::format_time(entry.timestamp)),
                None => log::warn!("Name and message must not be blank; nothing saved"),
            }
        }
        GuestbookAction::List => {
            let entries = store.list();
            println!("{}", view::count_label(entries.len()));
            if entries.is_empty() {
                println!("{}", view::EMPTY_PLACEHOLDER);
            }
            for entry in entries {
                println!(
                    "[{}] {}: {}",
                    view::format_time(entry.timestamp),
                    entry.name,
                    entry.message
                );
            }
        }
        GuestbookAction::Clear => store.clear()?,
    }
    Ok(())
}

async fn run_countdown(event: DateTime<FixedOffset>, watch: bool) -> anyhow::Result<()> {
    if !watch {
        println!("{}", Countdown::at(event, Utc::now()));
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let countdown = Countdown::at(event, Utc::now());
        println!("{countdown}");
        if countdown.is_over() {
            return Ok(());
        }
    }
}

fn run_invitation(
    store: Store,
    recipient: Option<String>,
    app_config: &AppConfig,
) -> anyhow::Result<()> {
    let event_time = event_time(app_config)?;
    let account_number = app_config.account_number.clone();
    let options = eframe::NativeOptions::default();

    log::info!("Opening invitation for {event_time}");

    eframe::run_native(
        "Undangan",
        options,
        Box::new(move |cc| {
            Ok(Box::new(InvitationApp::new(
                cc,
                store,
                recipient,
                event_time,
                account_number,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("invitation window failed: {err}"))
}
