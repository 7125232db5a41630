//! reel-rs command-line driver.

use clap::Parser;
use reel_rs::{
    AppStore, MemoryStore, Persistence, SqliteStore, bootstrap,
    clock::SystemClock,
    config::{Cli, Command, Config, StorageBackend},
    models::{ContentItem, ContentKind, PaymentMethod, PaymentMethodKind},
    payment::{PaymentRequest, PaymentSimulator},
    selectors,
    store::{filters::FilterState, progress::ProgressUpdate},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    let command = cli.command.unwrap_or(Command::Catalog { kind: None });
    if let Command::Init { force } = command {
        return cmd_init(force);
    }

    let mut store = open_store(&config)?;
    bootstrap(&mut store);

    match command {
        Command::Init { .. } => Ok(()),
        Command::Catalog { kind } => cmd_catalog(&store, kind),
        Command::Login { email, password } => cmd_login(&mut store, &email, &password),
        Command::Logout => {
            if store.logout() {
                println!("Signed out.");
            } else {
                println!("Not signed in.");
            }
            Ok(())
        }
        Command::Watch {
            content_id,
            position,
            duration,
            season,
            episode,
        } => cmd_watch(
            &mut store,
            &content_id,
            position,
            duration,
            season.as_deref(),
            episode.as_deref(),
        ),
        Command::Continue => cmd_continue(&store),
        Command::Recommend => cmd_recommend(&store),
        Command::Search { query } => cmd_search(&mut store, &query),
        Command::Subscribe { plan } => cmd_subscribe(store, &config, plan).await,
        Command::Notifications { read_all } => cmd_notifications(&mut store, read_all),
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&store.settings.settings)?);
            Ok(())
        }
    }
}

/// Open the configured storage backend.
fn open_store(config: &Config) -> anyhow::Result<AppStore> {
    let persistence = match config.storage.backend {
        StorageBackend::Memory => Persistence::new(Arc::new(MemoryStore::new())),
        StorageBackend::Sqlite => {
            Persistence::new(Arc::new(SqliteStore::open(&config.storage.path)?))
        }
    };

    tracing::debug!(backend = ?config.storage.backend, "Opened storage");
    Ok(AppStore::new(config, persistence, Arc::new(SystemClock)))
}

/// Write a default config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());

    let config = Config::default();
    let _store = SqliteStore::open(&config.storage.path)?;
    println!("Initialized storage: {}", config.storage.path.display());

    println!("\nThen run: reel-rs login you@example.com");

    Ok(())
}

fn print_items(title: &str, ids: &[String], store: &AppStore) {
    println!("{}", title);
    for id in ids {
        if let Some(item) = store.catalog.content(id) {
            print_item(item);
        }
    }
    println!();
}

fn print_item(item: ContentItem<'_>) {
    println!(
        "  {:<6} {:<24} {:>4.1}  {}",
        item.id(),
        item.title(),
        item.rating(),
        item.genres().join(", ")
    );
}

/// List highlight rows, or one kind of content.
fn cmd_catalog(store: &AppStore, kind: Option<String>) -> anyhow::Result<()> {
    if let Some(kind) = kind {
        let Some(kind) = ContentKind::parse(&kind) else {
            anyhow::bail!("Unknown content kind: {}", kind);
        };
        let mut filters = FilterState::default();
        filters.set_kind(Some(kind));
        for item in selectors::apply_filters(&store.catalog.all(), &filters) {
            print_item(item);
        }
        return Ok(());
    }

    if let Some(item) = store.catalog.featured.as_deref().and_then(|id| store.catalog.content(id)) {
        println!("Featured: {}\n", item.title());
    }
    print_items("Trending", &store.catalog.trending, store);
    print_items("Top Rated", &store.catalog.top_rated, store);
    print_items("New Releases", &store.catalog.new_releases, store);
    Ok(())
}

/// Sign in.
fn cmd_login(store: &mut AppStore, email: &str, password: &str) -> anyhow::Result<()> {
    let Some(user) = store.login(email, password) else {
        anyhow::bail!("Email and password must not be empty");
    };
    let plan = store
        .subscription
        .current_plan()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "none".to_string());
    println!("Signed in as {} ({}), plan: {}", user.name, user.id, plan);
    Ok(())
}

fn require_login(store: &AppStore) -> anyhow::Result<()> {
    if !store.user.is_authenticated() {
        anyhow::bail!("Not signed in. Run: reel-rs login <email>");
    }
    Ok(())
}

/// Record playback progress.
fn cmd_watch(
    store: &mut AppStore,
    content_id: &str,
    position: f64,
    duration: Option<f64>,
    season: Option<&str>,
    episode: Option<&str>,
) -> anyhow::Result<()> {
    require_login(store)?;

    let runtime_minutes = match (store.catalog.content(content_id), season.zip(episode)) {
        (None, _) => anyhow::bail!("Unknown content: {}", content_id),
        (Some(ContentItem::Series(s)), Some((season, episode))) => match s.episode(season, episode) {
            Some(e) => e.duration,
            None => anyhow::bail!("Unknown episode: {} {}", season, episode),
        },
        (Some(ContentItem::Movie(m)), _) => m.duration,
        (Some(ContentItem::Series(s)), None) => s.duration,
        (Some(ContentItem::Game(_)), _) => anyhow::bail!("Games have no playback progress"),
    };

    if !store.can_access(content_id) {
        anyhow::bail!("Your plan does not include {}. Run: reel-rs subscribe basic", content_id);
    }

    let entry = store.record_progress(ProgressUpdate {
        content_id,
        season_id: season,
        episode_id: episode,
        current_time: position,
        duration: duration.unwrap_or(f64::from(runtime_minutes) * 60.0),
    });

    println!(
        "{}: {:.0}% watched{}",
        entry.entry_key(),
        entry.fraction() * 100.0,
        if entry.completed { " (completed)" } else { "" }
    );
    Ok(())
}

/// List in-progress titles.
fn cmd_continue(store: &AppStore) -> anyhow::Result<()> {
    let entries = store.continue_watching();
    if entries.is_empty() {
        println!("Nothing in progress.");
    }
    for entry in entries {
        let title = store
            .catalog
            .content(&entry.content_id)
            .map(|i| i.title())
            .unwrap_or(entry.content_id.as_str());
        println!(
            "  {:<24} {:>3.0}%  {}",
            title,
            entry.fraction() * 100.0,
            entry.last_watched.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

/// Show recommendations.
fn cmd_recommend(store: &AppStore) -> anyhow::Result<()> {
    for r in store.recommendations() {
        println!(
            "  {:<6} {:<24} score {:.2} ({} shared genres)",
            r.item.id(),
            r.item.title(),
            r.score,
            r.shared_genres
        );
    }
    Ok(())
}

/// Search the catalog.
fn cmd_search(store: &mut AppStore, query: &str) -> anyhow::Result<()> {
    let results = store.search(query);
    if results.is_empty() {
        println!("No results for \"{}\".", query);
    }
    for id in &results {
        if let Some(item) = store.catalog.content(id) {
            print_item(item);
        }
    }
    Ok(())
}

/// Buy a plan through the simulated checkout.
async fn cmd_subscribe(store: AppStore, config: &Config, plan: String) -> anyhow::Result<()> {
    require_login(&store)?;

    let method = store
        .subscription
        .default_payment_method()
        .cloned()
        .unwrap_or_else(|| PaymentMethod {
            id: reel_rs::models::new_id(),
            kind: PaymentMethodKind::Card,
            label: "Visa".to_string(),
            last4: Some("4242".to_string()),
            is_default: true,
        });

    let shared = store.into_shared();
    let simulator = PaymentSimulator::from_config(&config.payments);
    println!("Processing payment...");

    let transaction = simulator
        .run(
            &shared,
            PaymentRequest {
                plan_id: plan,
                method,
                save_method: true,
            },
        )
        .await?;

    println!(
        "Payment {} completed: ${:.2}",
        transaction.id,
        f64::from(transaction.amount_cents) / 100.0
    );
    Ok(())
}

/// Show notifications.
fn cmd_notifications(store: &mut AppStore, read_all: bool) -> anyhow::Result<()> {
    println!("{} unread\n", store.notifications.unread_count);
    for n in &store.notifications.items {
        println!(
            "  {} {:<30} {}",
            if n.is_read { " " } else { "*" },
            n.title,
            n.message
        );
    }
    if read_all && store.mark_all_notifications_read() {
        println!("\nMarked all as read.");
    }
    Ok(())
}
