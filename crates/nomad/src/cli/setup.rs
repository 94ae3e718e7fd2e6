use clap::{Args, Parser, Subcommand, ValueEnum};
use nomadapp::filters::SortKey;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "nomad", bin_name = "nomad", version = get_version())]
#[command(about = "Browse cities and keep your nomad notes locally", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $NOMAD_DATA_DIR, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cities matching a filter
    #[command(alias = "ls")]
    Cities(CityFilterArgs),

    /// List the selectable regions
    Regions,

    /// Manage favorite cities
    #[command(alias = "fav")]
    Favorite {
        #[command(subcommand)]
        action: IdSetCommands,
    },

    /// Manage bookmarked cities
    #[command(alias = "bm")]
    Bookmark {
        #[command(subcommand)]
        action: IdSetCommands,
    },

    /// Manage event participation
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },

    /// Read and write city reviews
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },

    /// Show or edit your profile (default: show)
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommands>,
    },

    /// Summary of your activity
    Stats,
}

#[derive(Args, Debug, Default)]
pub struct CityFilterArgs {
    /// Match name, province or description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Region keys, comma separated (see `nomad regions`)
    #[arg(short, long, value_delimiter = ',')]
    pub region: Vec<String>,

    /// Lowest acceptable minimum monthly cost
    #[arg(long, value_name = "AMOUNT")]
    pub cost_min: Option<f64>,

    /// Highest acceptable minimum monthly cost
    #[arg(long, value_name = "AMOUNT")]
    pub cost_max: Option<f64>,

    /// Minimum internet speed in Mbps
    #[arg(long, value_name = "MBPS")]
    pub speed: Option<u32>,

    /// overall, cheap, fast, active, quality or reviews
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Only favorite cities
    #[arg(long)]
    pub favorites: bool,

    /// Only bookmarked cities
    #[arg(long)]
    pub bookmarks: bool,

    /// Start from a query string such as "regions=jeju&sort=cheap"
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum IdSetCommands {
    /// List saved city ids
    #[command(alias = "ls")]
    List,
    /// Save a city
    Add { city: String },
    /// Unsave a city
    #[command(alias = "rm")]
    Remove { city: String },
    /// Save if not saved, unsave otherwise
    Toggle { city: String },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List joined event ids
    #[command(alias = "ls")]
    List,
    /// Join an event
    Join { event: String },
    /// Leave an event
    Leave { event: String },
    /// Join if not joined, leave otherwise
    Toggle { event: String },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReviewOrder {
    /// Newest first
    #[default]
    Date,
    /// Highest rating first
    Rating,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// List reviews of a city
    #[command(alias = "ls")]
    List {
        city: String,
        #[arg(long, value_enum, default_value_t = ReviewOrder::Date)]
        by: ReviewOrder,
    },
    /// Write a review
    Add {
        city: String,
        /// 1 to 5
        #[arg(short, long, default_value_t = 0)]
        rating: u8,
        #[arg(short, long, default_value = "")]
        title: String,
        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Edit one of your reviews
    Update {
        city: String,
        id: String,
        #[arg(short, long)]
        rating: Option<u8>,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete one of your reviews
    #[command(alias = "rm")]
    Remove { city: String, id: String },
    /// Average rating of a city
    Average { city: String },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the profile
    Show,
    /// Change the display name
    SetName { name: String },
    /// Change the bio
    SetBio { bio: String },
    /// Change the avatar URL
    SetAvatar { url: String },
}
