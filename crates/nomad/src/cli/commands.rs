//! # CLI Layer
//!
//! The **only** place in the workspace that:
//! - Knows about stdout and stderr
//! - Installs a `tracing` subscriber
//! - Formats output for human consumption
//!
//! Each handler calls into [`NomadApi`] and returns the text to print, so the
//! handlers stay testable without capturing stdout.

use super::render;
use super::setup::{
    CityFilterArgs, Cli, Commands, EventCommands, IdSetCommands, ProfileCommands,
    ReviewCommands, ReviewOrder,
};
use anyhow::{bail, Result};
use clap::Parser;
use nomadapp::api::NomadApi;
use nomadapp::filters::{FilterParams, REGIONS};
use nomadapp::init::{initialize, NomadContext};
use nomadapp::model::{City, ReviewDraft, ReviewPatch};
use nomadapp::store::{IdSetStore, KvBackend, ReviewSeed};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize(cli.data.clone())?;
    debug!(command = ?cli.command, data_dir = %ctx.data_dir.display(), "dispatching");
    let output = dispatch(&ctx, cli.command, cli.json)?;
    print!("{}", output);
    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "nomadapp=debug,nomad=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(ctx: &NomadContext, command: Option<Commands>, json: bool) -> Result<String> {
    let api = &ctx.api;
    match command.unwrap_or_else(|| Commands::Cities(CityFilterArgs::default())) {
        Commands::Cities(args) => {
            let params = filter_params(&args, ctx);
            let cities = api.filter_cities(&ctx.cities, &params);
            output(json, &cities, || render::render_cities(&cities))
        }
        Commands::Regions => {
            let regions: Vec<RegionView> = REGIONS
                .iter()
                .map(|region| RegionView {
                    key: region.key,
                    label: region.label,
                    provinces: region.provinces,
                })
                .collect();
            output(json, &regions, || render::render_regions(REGIONS))
        }
        Commands::Favorite { action } => {
            id_set_command(&api.favorites(), action, &ctx.cities, json, "favorites")
        }
        Commands::Bookmark { action } => {
            id_set_command(&api.bookmarks(), action, &ctx.cities, json, "bookmarks")
        }
        Commands::Event { action } => event_command(api, action, json),
        Commands::Review { action } => review_command(ctx, action, json),
        Commands::Profile { action } => profile_command(api, action, json),
        Commands::Stats => {
            let user_id = api.profile().get().id;
            let stats = api.activity_stats(&user_id, ctx.cities.iter().map(|city| &city.id));
            output(json, &stats, || render::render_stats(&stats))
        }
    }
}

#[derive(Serialize)]
struct RegionView {
    key: &'static str,
    label: &'static str,
    provinces: &'static [&'static str],
}

#[derive(Serialize)]
struct Membership<'a> {
    id: &'a str,
    member: bool,
}

#[derive(Serialize)]
struct Deletion<'a> {
    id: &'a str,
    deleted: bool,
}

#[derive(Serialize)]
struct Average<'a> {
    city_id: &'a str,
    average: f64,
    count: usize,
}

fn output<T, F>(json: bool, value: &T, text: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        Ok(render::to_json(value)?)
    } else {
        Ok(text())
    }
}

/// Query string first, then the configured default sort, then explicit flags.
fn filter_params(args: &CityFilterArgs, ctx: &NomadContext) -> FilterParams {
    let query = args.query.as_deref().unwrap_or_default();
    let mut params = FilterParams::from_query(query);
    params.sort_by = FilterParams::query_sort(query).unwrap_or_else(|| ctx.config.default_sort());

    if let Some(search) = &args.search {
        params.search = search.clone();
    }
    if !args.region.is_empty() {
        params.regions = args.region.clone();
    }
    if let Some(min) = args.cost_min {
        params.cost_range.min = min;
    }
    if let Some(max) = args.cost_max {
        params.cost_range.max = max;
    }
    if let Some(speed) = args.speed {
        params.min_speed = speed;
    }
    if let Some(sort) = args.sort {
        params.sort_by = sort;
    }
    params.show_favorites |= args.favorites;
    params.show_bookmarks |= args.bookmarks;
    params
}

fn id_set_command<B: KvBackend>(
    store: &IdSetStore<B>,
    action: IdSetCommands,
    cities: &[City],
    json: bool,
    label: &str,
) -> Result<String> {
    match action {
        IdSetCommands::List => {
            let ids = store.list();
            output(json, &ids, || {
                render::render_city_ids(&ids, cities, &format!("No {} yet.", label))
            })
        }
        IdSetCommands::Add { city } => {
            store.add(&city);
            membership(json, &city, true, || format!("Added {} to {}", city, label))
        }
        IdSetCommands::Remove { city } => {
            store.remove(&city);
            membership(json, &city, false, || format!("Removed {} from {}", city, label))
        }
        IdSetCommands::Toggle { city } => {
            let member = store.toggle(&city);
            membership(json, &city, member, || {
                if member {
                    format!("Added {} to {}", city, label)
                } else {
                    format!("Removed {} from {}", city, label)
                }
            })
        }
    }
}

fn event_command<B: KvBackend, S: ReviewSeed>(
    api: &NomadApi<B, S>,
    action: EventCommands,
    json: bool,
) -> Result<String> {
    let events = api.participations();
    match action {
        EventCommands::List => {
            let ids = events.list();
            output(json, &ids, || render::render_ids(&ids, "No events joined."))
        }
        EventCommands::Join { event } => {
            events.add(&event);
            membership(json, &event, true, || format!("Joined {}", event))
        }
        EventCommands::Leave { event } => {
            events.remove(&event);
            membership(json, &event, false, || format!("Left {}", event))
        }
        EventCommands::Toggle { event } => {
            let member = events.toggle(&event);
            membership(json, &event, member, || {
                if member {
                    format!("Joined {}", event)
                } else {
                    format!("Left {}", event)
                }
            })
        }
    }
}

fn membership(
    json: bool,
    id: &str,
    member: bool,
    message: impl FnOnce() -> String,
) -> Result<String> {
    output(json, &Membership { id, member }, || render::success(&message()))
}

fn review_command(ctx: &NomadContext, action: ReviewCommands, json: bool) -> Result<String> {
    let api = &ctx.api;
    match action {
        ReviewCommands::List { city, by } => {
            let reviews = match by {
                ReviewOrder::Date => api.reviews().by_date(&city),
                ReviewOrder::Rating => api.reviews().by_rating(&city),
            };
            output(json, &reviews, || render::render_reviews(&reviews))
        }
        ReviewCommands::Add {
            city,
            rating,
            title,
            content,
        } => {
            ensure_known_city(ctx, &city)?;
            let profile = api.profile().get();
            let draft = ReviewDraft::today(profile.id, profile.name, city, rating, title, content);
            let review = api.add_review(draft)?;
            output(json, &review, || {
                render::success(&format!("Review {} saved", review.id))
            })
        }
        ReviewCommands::Update {
            city,
            id,
            rating,
            title,
            content,
        } => {
            let patch = ReviewPatch {
                title,
                content,
                rating,
            };
            if patch.is_empty() {
                bail!("Nothing to update: pass --rating, --title or --content");
            }
            match api.update_review(&city, &id, &patch)? {
                Some(review) => output(json, &review, || {
                    render::success(&format!("Review {} updated", review.id))
                }),
                None => bail!("No local review {} for {}", id, city),
            }
        }
        ReviewCommands::Remove { city, id } => {
            let removed = api.reviews().remove(&city, &id);
            output(json, &Deletion { id: &id, deleted: removed }, || {
                if removed {
                    render::success(&format!("Review {} deleted", id))
                } else {
                    render::notice(&format!("No local review {} for {}", id, city))
                }
            })
        }
        ReviewCommands::Average { city } => {
            let reviews = api.reviews();
            let average = Average {
                city_id: &city,
                average: reviews.average_rating(&city),
                count: reviews.list(&city).len(),
            };
            output(json, &average, || {
                render::render_average(&city, average.average, average.count)
            })
        }
    }
}

/// With no city catalog loaded any id is accepted.
fn ensure_known_city(ctx: &NomadContext, city_id: &str) -> Result<()> {
    if !ctx.cities.is_empty() && !ctx.cities.iter().any(|city| city.id == city_id) {
        bail!("Unknown city: {}", city_id);
    }
    Ok(())
}

fn profile_command<B: KvBackend, S: ReviewSeed>(
    api: &NomadApi<B, S>,
    action: Option<ProfileCommands>,
    json: bool,
) -> Result<String> {
    let profile = api.profile();
    match action.unwrap_or(ProfileCommands::Show) {
        ProfileCommands::Show => {}
        ProfileCommands::SetName { name } => profile.set_name(&name),
        ProfileCommands::SetBio { bio } => profile.set_bio(&bio),
        ProfileCommands::SetAvatar { url } => profile.set_avatar(&url),
    }
    let current = profile.get();
    output(json, &current, || render::render_profile(&current))
}
