#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the SCS Conecta district data engine.
//!
//! ```text
//! scs_conecta dashboard
//! scs_conecta events [--zone scs-1] [--category cultural] [--night]
//! scs_conecta snapshot [--zone scs-1] [--check-ins 4]
//! scs_conecta share <event-id>
//! scs_conecta route --interest coffee --interest art [--minutes 120]
//! scs_conecta vote <post-id> up
//! ```
//!
//! Every command reads the bundled fixtures unless `--fixtures <dir>` is
//! given, evaluates time-relative rules at `--now` (default: the local
//! clock) and prints a table, or JSON with `--json`.

mod context;
mod render;

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use scs_conecta_community::{CommentBook, JsonFileStore, Theme, ThemeState, Vote, VoteBook};
use scs_conecta_district_models::{
    AlertKind, AlertStatus, BusinessKind, BusinessStatus, Event, EventCategory, HighlightLevel,
    Post, PostCategory, ReactivationPotential, ZoneId,
};
use scs_conecta_engine::DistrictDataEngine;
use scs_conecta_engine_models::{
    AlertFilter, BusinessFilter, CommunityStats, EventFilter, FilterValue, PostQuery, PostSort,
    PropertyFilter, RouteRequest, TimeStatus,
};
use scs_conecta_fixtures::DistrictRepository as _;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "scs_conecta",
    about = "Query events, businesses, safety and vacancy data for Setor Comercial Sul"
)]
struct Cli {
    /// Engine config file (TOML). Falls back to $SCS_CONECTA_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with fixture TOML files overriding the bundled ones
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Reference time, e.g. 2025-12-20T21:00 (default: now)
    #[arg(long, global = true)]
    now: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Community state file used by comment, vote and theme
    #[arg(long, global = true, default_value = "scs_conecta_state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Management dashboard: counts, occupancy and engagement
    Dashboard,
    /// List events with their relative-time status
    Events {
        /// Zone id (or "all")
        #[arg(long, default_value = "all")]
        zone: String,
        /// Event category
        #[arg(long, default_value = "all")]
        category: String,
        /// Highlight level
        #[arg(long, default_value = "all")]
        highlight: String,
        /// Audience tag, repeatable; any match passes
        #[arg(long)]
        audience: Vec<String>,
        /// Support-need tag, repeatable; any match passes
        #[arg(long)]
        support: Vec<String>,
        /// Only events starting at or after the nighttime hour
        #[arg(long)]
        night: bool,
    },
    /// List tracked businesses and whether they are open now
    Businesses {
        #[arg(long, default_value = "all")]
        zone: String,
        #[arg(long, default_value = "all")]
        kind: String,
        #[arg(long, default_value = "all")]
        status: String,
        /// Only businesses that advertise nighttime opening
        #[arg(long)]
        open_at_night: bool,
    },
    /// List safety alerts
    Alerts {
        #[arg(long, default_value = "all")]
        zone: String,
        #[arg(long, default_value = "all")]
        kind: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Safety panel figures
    Safety,
    /// Vacancy figures and vacant properties
    Vacancy {
        #[arg(long, default_value = "all")]
        zone: String,
        /// Minimum reactivation potential (low, medium, high, very-high)
        #[arg(long)]
        min_potential: Option<String>,
        /// Suggested use, repeatable; any match passes
        #[arg(long = "use")]
        uses: Vec<String>,
    },
    /// Predicted risk per zone
    Risk,
    /// Rule-based management recommendations
    Recommend,
    /// Social-media content for an event
    Share {
        /// Event id
        event_id: String,
    },
    /// Suggest a walking route through the zones
    Route {
        /// Starting point label
        #[arg(long)]
        start: Option<String>,
        /// Interest, repeatable; one stop per interest
        #[arg(long)]
        interest: Vec<String>,
        /// Free-text description used when no interests are given
        #[arg(long)]
        description: Option<String>,
        /// Minutes available for the whole route
        #[arg(long, default_value = "120")]
        minutes: u32,
    },
    /// What is happening right now
    Snapshot {
        /// Zone id; the whole district when absent
        #[arg(long)]
        zone: Option<String>,
        /// Check-ins reported by visitors
        #[arg(long, default_value = "0")]
        check_ins: u64,
    },
    /// Forum posts
    Forum {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        zone: String,
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
        /// popular or recent
        #[arg(long, default_value = "popular")]
        sort: String,
    },
    /// Publication totals per channel
    Channels,
    /// Show or add comments on an event, business or alert
    Comment {
        /// Entity type (e.g. evento, comercio, alerta)
        kind: String,
        /// Entity id
        entity_id: String,
        /// Comment text; lists the thread when absent
        #[arg(long)]
        text: Option<String>,
        /// Author display name
        #[arg(long, default_value = "Visitor")]
        author: String,
        /// Like the comment with this id instead of posting
        #[arg(long, conflicts_with = "text")]
        like: Option<String>,
    },
    /// Toggle your vote on a forum post
    Vote {
        /// Post id
        post_id: String,
        /// up or down
        direction: String,
    },
    /// Show, set or toggle the display theme
    Theme {
        /// light or dark
        #[arg(long)]
        set: Option<String>,
        /// Switch to the other theme
        #[arg(long, conflicts_with = "set")]
        toggle: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRow<'a> {
    #[serde(flatten)]
    event: &'a Event,
    time_status: TimeStatus,
    time_label: String,
}

#[derive(Serialize)]
struct ForumRow<'a> {
    post: &'a Post,
    score: i64,
}

#[derive(Serialize)]
struct ForumOutput<'a> {
    posts: Vec<ForumRow<'a>>,
    stats: CommunityStats,
}

fn forum_json<'a>(rows: &[(&'a Post, i64)], stats: CommunityStats) -> ForumOutput<'a> {
    ForumOutput {
        posts: rows
            .iter()
            .map(|&(post, score)| ForumRow { post, score })
            .collect(),
        stats,
    }
}

fn tag_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = context::load_config(cli.config.as_deref())?;
    let repo = context::load_repository(cli.fixtures.as_deref())?;
    let now: NaiveDateTime = context::resolve_now(cli.now.as_deref())?;
    let dataset = repo.dataset();
    let engine = DistrictDataEngine::new(dataset, &config);
    log::debug!("Evaluating at {now}");

    match cli.command {
        Commands::Dashboard => {
            let stats = engine.dashboard();
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("{}", render::dashboard(&stats, dataset));
            }
        }
        Commands::Events {
            zone,
            category,
            highlight,
            audience,
            support,
            night,
        } => {
            let filter = EventFilter {
                zone: FilterValue::<ZoneId>::parse_lenient(&zone),
                category: FilterValue::<EventCategory>::parse_lenient(&category),
                highlight: FilterValue::<HighlightLevel>::parse_lenient(&highlight),
                audience: tag_set(audience),
                support_needs: tag_set(support),
                min_start_hour: night.then_some(config.nighttime_start_hour),
            };
            let events = engine.events(&filter);
            let rows: Vec<(&Event, TimeStatus)> = events
                .into_iter()
                .map(|e| (e, engine.classify_event(e, now)))
                .collect();
            if cli.json {
                let json: Vec<EventRow> = rows
                    .iter()
                    .map(|(event, status)| EventRow {
                        event,
                        time_status: *status,
                        time_label: status.label(),
                    })
                    .collect();
                print_json(&json)?;
            } else {
                println!("{}", render::events(&rows, dataset));
            }
        }
        Commands::Businesses {
            zone,
            kind,
            status,
            open_at_night,
        } => {
            let filter = BusinessFilter {
                zone: FilterValue::<ZoneId>::parse_lenient(&zone),
                kind: FilterValue::<BusinessKind>::parse_lenient(&kind),
                status: FilterValue::<BusinessStatus>::parse_lenient(&status),
                open_at_night: open_at_night.then_some(true),
            };
            let businesses = engine.businesses(&filter);
            if cli.json {
                print_json(&businesses)?;
            } else {
                println!("{}", render::businesses(&businesses, dataset, now));
            }
        }
        Commands::Alerts { zone, kind, status } => {
            let filter = AlertFilter {
                zone: FilterValue::<ZoneId>::parse_lenient(&zone),
                kind: FilterValue::<AlertKind>::parse_lenient(&kind),
                status: FilterValue::<AlertStatus>::parse_lenient(&status),
            };
            let alerts = engine.alerts(&filter);
            if cli.json {
                print_json(&alerts)?;
            } else {
                println!("{}", render::alerts(&alerts, dataset));
            }
        }
        Commands::Safety => {
            let stats = engine.safety(now);
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("{}", render::safety(&stats, dataset));
            }
        }
        Commands::Vacancy {
            zone,
            min_potential,
            uses,
        } => {
            let min_potential = min_potential.and_then(|raw| {
                raw.parse::<ReactivationPotential>()
                    .inspect_err(|_| log::warn!("Ignoring unrecognized --min-potential '{raw}'"))
                    .ok()
            });
            let filter = PropertyFilter {
                zone: FilterValue::<ZoneId>::parse_lenient(&zone),
                min_potential,
                uses: tag_set(uses),
            };
            let stats = engine.vacancy(now);
            let properties = engine.properties(&filter);
            if cli.json {
                print_json(&serde_json::json!({
                    "stats": stats,
                    "properties": properties,
                }))?;
            } else {
                println!("{}", render::vacancy(&stats, &properties, dataset));
            }
        }
        Commands::Risk => {
            let risks = engine.zone_risks(now);
            if cli.json {
                print_json(&risks)?;
            } else {
                println!("{}", render::risk(&risks, dataset));
            }
        }
        Commands::Recommend => {
            let recs = engine.recommendations();
            if cli.json {
                print_json(&recs)?;
            } else {
                println!("{}", render::recommendations(&recs, dataset));
            }
        }
        Commands::Share { event_id } => {
            let content = engine.share_event(&event_id)?;
            if cli.json {
                print_json(&content)?;
            } else {
                println!("{}", render::share(&content));
            }
        }
        Commands::Route {
            start,
            interest,
            description,
            minutes,
        } => {
            let request = RouteRequest {
                start,
                interests: interest,
                description,
                minutes_available: minutes,
            };
            let stops = engine.plan_route(&request)?;
            if cli.json {
                print_json(&stops)?;
            } else {
                println!("{}", render::route(&stops));
            }
        }
        Commands::Snapshot { zone, check_ins } => {
            let zone = zone
                .map(|z| ZoneId::new(z.trim()))
                .filter(|z| !z.as_str().is_empty());
            if let Some(zone) = &zone
                && !dataset.zones.iter().any(|z| &z.id == zone)
            {
                log::warn!("Zone '{zone}' is not in the zone registry");
            }
            let snap = engine.snapshot(zone.as_ref(), now, check_ins);
            if cli.json {
                print_json(&snap)?;
            } else {
                println!("{}", render::snapshot(&snap, dataset));
                println!("\nRefresh every {}s for live updates.", config.refresh_interval_secs);
            }
        }
        Commands::Forum {
            category,
            zone,
            search,
            sort,
        } => {
            let query = PostQuery {
                category: FilterValue::<PostCategory>::parse_lenient(&category),
                zone: FilterValue::<ZoneId>::parse_lenient(&zone),
                search,
                sort: sort.parse::<PostSort>().unwrap_or_else(|_| {
                    log::warn!("Unknown sort '{sort}', using popular");
                    PostSort::Popular
                }),
            };
            let posts = engine.posts(&query);
            let mut store = JsonFileStore::open(&cli.state)?;
            let votes = VoteBook::new(&mut store);
            let rows = posts
                .into_iter()
                .map(|post| Ok((post, votes.score(post)?)))
                .collect::<Result<Vec<_>, scs_conecta_community::StoreError>>()?;
            if cli.json {
                print_json(&forum_json(&rows, engine.community_stats()))?;
            } else {
                println!("{}", render::forum(&rows));
                let stats = engine.community_stats();
                println!(
                    "\n{} post(s), {} upvote(s), {} comment(s), {} author(s)",
                    stats.posts, stats.upvotes, stats.comments, stats.authors
                );
            }
        }
        Commands::Channels => {
            let stats = engine.channel_stats();
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("{}", render::channels(&stats, &dataset.channel_metrics));
            }
        }
        Commands::Comment {
            kind,
            entity_id,
            text,
            author,
            like,
        } => {
            let mut store = JsonFileStore::open(&cli.state)?;
            let mut book = CommentBook::new(&mut store);
            if let Some(text) = text {
                match book.add(&kind, &entity_id, &author, &text, now)? {
                    Some(comment) => log::info!("Added comment {}", comment.id),
                    None => eprintln!("Comment text is empty, nothing added."),
                }
            } else if let Some(comment_id) = like {
                if book.like(&kind, &entity_id, &comment_id)?.is_none() {
                    eprintln!("Comment not found: {comment_id}");
                    std::process::exit(1);
                }
            }

            let thread = book.comments(&kind, &entity_id)?;
            if cli.json {
                print_json(&thread)?;
            } else {
                let id = scs_conecta_community::comments::thread_id(&kind, &entity_id);
                println!("{}", render::comments(&id, &thread));
            }
        }
        Commands::Vote { post_id, direction } => {
            let Some(post) = dataset.posts.iter().find(|p| p.id == post_id) else {
                eprintln!("Post not found: {post_id}");
                std::process::exit(1);
            };
            let vote = direction
                .parse::<Vote>()
                .map_err(|_| format!("Unknown vote '{direction}', expected up or down"))?;
            let mut store = JsonFileStore::open(&cli.state)?;
            let mut votes = VoteBook::new(&mut store);
            let current = votes.toggle(&post_id, vote)?;
            let score = votes.score(post)?;
            if cli.json {
                print_json(&serde_json::json!({
                    "postId": post_id,
                    "vote": current,
                    "score": score,
                }))?;
            } else {
                let current = current.map_or_else(|| "none".to_string(), |v| v.to_string());
                println!("{post_id}: vote {current}, score {score}");
            }
        }
        Commands::Theme { set, toggle } => {
            let mut store = JsonFileStore::open(&cli.state)?;
            let mut state = ThemeState::new(&mut store);
            let theme = if let Some(raw) = set {
                let theme = raw
                    .parse::<Theme>()
                    .map_err(|_| format!("Unknown theme '{raw}', expected light or dark"))?;
                state.set(theme)?;
                theme
            } else if toggle {
                state.toggle()?
            } else {
                state.current()?
            };
            if cli.json {
                print_json(&theme)?;
            } else {
                println!("{theme}");
            }
        }
    }

    Ok(())
}
