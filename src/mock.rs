//! Built-in demo data loaded at startup.

use crate::models::{
    Achievement, ContentSection, Episode, Game, Movie, Notification, NotificationKind, Plan,
    PlanLimits, PlanTier, Reel, Season, Series, SectionKind,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn movie(
    id: &str,
    title: &str,
    genres: &[&str],
    rating: f64,
    released: NaiveDate,
    duration: u32,
    cast: &[&str],
    director: &str,
    views: u64,
    is_premium: bool,
) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} is streaming now.", title),
        genres: strings(genres),
        rating,
        release_date: released,
        duration,
        maturity_rating: "PG-13".to_string(),
        cast: strings(cast),
        director: Some(director.to_string()),
        views,
        is_premium,
    }
}

/// Demo movies.
pub fn movies() -> Vec<Movie> {
    vec![
        movie("m1", "The Long Night", &["Drama"], 8.4, date(2023, 11, 3), 128, &["Ava Stone", "Leo Marsh"], "Nina Park", 1_250_000, false),
        movie("m2", "Cold Harbor", &["Drama", "Thriller"], 7.8, date(2024, 2, 16), 114, &["Leo Marsh", "Ida Vance"], "Tom Reyes", 980_000, false),
        movie("m3", "Signal Lost", &["Thriller"], 7.0, date(2024, 6, 21), 101, &["Mara Quinn"], "Ola Berg", 640_000, false),
        movie("m4", "Starfall", &["Sci-Fi", "Adventure"], 8.9, date(2024, 9, 6), 142, &["Kai Brooks", "Ava Stone"], "Nina Park", 2_100_000, true),
        movie("m5", "Laugh Track", &["Comedy"], 6.5, date(2022, 7, 1), 95, &["Benji Cole"], "Sam Ito", 430_000, false),
        movie("m6", "Deep Blue", &["Documentary"], 8.1, date(2021, 4, 22), 88, &["Narrated by Ruth Hale"], "Jon Aster", 300_000, false),
        movie("m7", "Red Line", &["Action", "Thriller"], 7.4, date(2025, 1, 10), 117, &["Kai Brooks"], "Tom Reyes", 1_700_000, true),
        movie("m8", "Paper Hearts", &["Romance", "Drama"], 7.1, date(2023, 2, 14), 109, &["Ida Vance", "Benji Cole"], "Sam Ito", 520_000, false),
    ]
}

fn season(series_id: &str, number: u32, episodes: u32, duration: u32) -> Season {
    let season_id = format!("{}-s{}", series_id, number);
    Season {
        episodes: (1..=episodes)
            .map(|n| Episode {
                id: format!("{}-e{}", season_id, n),
                number: n,
                title: format!("Episode {}", n),
                duration,
            })
            .collect(),
        id: season_id,
        number,
    }
}

/// Demo series.
pub fn series() -> Vec<Series> {
    vec![
        Series {
            id: "s1".to_string(),
            title: "Northern Lights".to_string(),
            description: "A small town keeps a large secret.".to_string(),
            genres: strings(&["Drama", "Mystery"]),
            rating: 8.7,
            release_date: date(2022, 10, 7),
            duration: 52,
            maturity_rating: "TV-MA".to_string(),
            cast: strings(&["Ruth Hale", "Leo Marsh"]),
            seasons: vec![season("s1", 1, 8, 52), season("s1", 2, 8, 55)],
            views: 3_400_000,
            is_premium: true,
        },
        Series {
            id: "s2".to_string(),
            title: "Office Hours".to_string(),
            description: "Workplace comedy at a failing startup.".to_string(),
            genres: strings(&["Comedy"]),
            rating: 7.6,
            release_date: date(2023, 3, 3),
            duration: 24,
            maturity_rating: "TV-14".to_string(),
            cast: strings(&["Benji Cole", "Mara Quinn"]),
            seasons: vec![season("s2", 1, 10, 24)],
            views: 1_100_000,
            is_premium: false,
        },
        Series {
            id: "s3".to_string(),
            title: "Orbit".to_string(),
            description: "The first crew to live on Europa.".to_string(),
            genres: strings(&["Sci-Fi", "Thriller"]),
            rating: 8.2,
            release_date: date(2024, 11, 15),
            duration: 47,
            maturity_rating: "TV-14".to_string(),
            cast: strings(&["Kai Brooks"]),
            seasons: vec![season("s3", 1, 6, 47)],
            views: 2_000_000,
            is_premium: true,
        },
    ]
}

/// Demo games.
pub fn games() -> Vec<Game> {
    let game = |id: &str, title: &str, genres: &[&str], rating: f64, released: NaiveDate, views: u64, is_premium: bool| Game {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Play {} in the cloud.", title),
        genres: strings(genres),
        rating,
        release_date: released,
        platforms: strings(&["web", "tv", "mobile"]),
        views,
        is_premium,
    };

    vec![
        game("g1", "Neon Drift", &["Racing", "Action"], 7.9, date(2023, 8, 18), 450_000, false),
        game("g2", "Puzzle Garden", &["Puzzle"], 8.3, date(2024, 4, 5), 820_000, false),
        game("g3", "Void Runner", &["Sci-Fi", "Action"], 8.6, date(2025, 3, 28), 1_300_000, true),
    ]
}

/// Demo clips.
pub fn reels() -> Vec<Reel> {
    let reel = |id: &str, content_id: &str, title: &str, likes: u64, views: u64| Reel {
        id: id.to_string(),
        content_id: content_id.to_string(),
        title: title.to_string(),
        likes,
        views,
        shares: likes / 10,
        comments: likes / 20,
    };

    vec![
        reel("r1", "m4", "Starfall: the launch", 12_400, 98_000),
        reel("r2", "s1", "Northern Lights S2 teaser", 8_900, 61_000),
        reel("r3", "m7", "Red Line chase scene", 15_200, 130_000),
        reel("r4", "g3", "Void Runner speedrun", 4_100, 27_000),
    ]
}

/// Subscription plans, cheapest first.
pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "free".to_string(),
            name: "Free".to_string(),
            tier: PlanTier::Free,
            price_cents: 0,
            limits: PlanLimits::free(),
        },
        Plan {
            id: "basic".to_string(),
            name: "Basic".to_string(),
            tier: PlanTier::Basic,
            price_cents: 899,
            limits: PlanLimits {
                max_streams: 1,
                max_resolution: 720,
                max_downloads: 5,
                watch_parties: false,
                ads: false,
            },
        },
        Plan {
            id: "standard".to_string(),
            name: "Standard".to_string(),
            tier: PlanTier::Standard,
            price_cents: 1399,
            limits: PlanLimits {
                max_streams: 2,
                max_resolution: 1080,
                max_downloads: 20,
                watch_parties: true,
                ads: false,
            },
        },
        Plan {
            id: "premium".to_string(),
            name: "Premium".to_string(),
            tier: PlanTier::Premium,
            price_cents: 1999,
            limits: PlanLimits {
                max_streams: 4,
                max_resolution: 2160,
                max_downloads: 100,
                watch_parties: true,
                ads: false,
            },
        },
    ]
}

/// Badge definitions, all locked.
pub fn achievements() -> Vec<Achievement> {
    let badge = |id: &str, title: &str, description: &str, points: u32, target: u32| Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        points,
        progress: 0,
        target,
        unlocked_at: None,
    };

    vec![
        badge("first-watch", "First Watch", "Start watching your first title", 10, 1),
        badge("binge-watcher", "Binge Watcher", "Watch 10 different titles", 50, 10),
        badge("completionist", "Completionist", "Finish 5 titles", 75, 5),
        badge("social-butterfly", "Social Butterfly", "Add 5 friends", 25, 5),
        badge("critic", "Critic", "Write 3 reviews", 30, 3),
        badge("party-host", "Party Host", "Host a watch party", 40, 1),
    ]
}

/// Welcome notifications, newest first.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let note = |id: &str, kind: NotificationKind, title: &str, message: &str, age_hours: i64, content_id: Option<&str>| Notification {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        is_read: false,
        timestamp: now - Duration::hours(age_hours),
        content_id: content_id.map(str::to_string),
    };

    vec![
        note("welcome-new-release", NotificationKind::NewContent, "Red Line is here", "The new action thriller just dropped.", 2, Some("m7")),
        note("welcome-recommendation", NotificationKind::Recommendation, "Because you like drama", "Try Northern Lights.", 20, Some("s1")),
        note("welcome", NotificationKind::System, "Welcome", "Thanks for joining. Enjoy the free plan.", 48, None),
    ]
}

/// Home-page rows. Derived rows are filled by the store.
pub fn sections(now: DateTime<Utc>) -> Vec<ContentSection> {
    let row = |id: &str, title: &str, kind: SectionKind, content_ids: &[&str], order: u32| ContentSection {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        content_ids: strings(content_ids),
        max_items: 20,
        last_updated: now,
        is_visible: true,
        order,
    };

    vec![
        row("continue-watching", "Continue Watching", SectionKind::ContinueWatching, &[], 0),
        row("trending", "Trending Now", SectionKind::Trending, &[], 1),
        row("recommended", "Recommended for You", SectionKind::Recommended, &[], 2),
        row("new-releases", "New Releases", SectionKind::NewReleases, &[], 3),
        row("staff-picks", "Staff Picks", SectionKind::Curated, &["m1", "s1", "m6", "g2"], 4),
        row("sci-fi", "Sci-Fi", SectionKind::Genre, &["m4", "s3", "g3"], 5),
    ]
}
