//! # CLI Behavior
//!
//! This is **one possible UI client** for nomad. It is the only place that
//! knows about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution
//!
//! Running `nomad` with no subcommand lists every city with the default
//! filter, the same as `nomad cities`.
//!
//! ## Filters
//!
//! `nomad cities` accepts either individual flags or a whole query string:
//!
//! - `nomad cities --search 서울 --region seoul,jeju --sort cheap`
//! - `nomad cities --query "regions=gyeongsan&costMax=3&sort=fast"`
//!
//! Flags given together with `--query` override the matching query values.
//! Without `--sort` or a `sort=` value, the configured `default_sort` applies.
//!
//! ## Output
//!
//! Text output is coloured for humans; `--json` prints the same data as JSON
//! for scripts. Log messages go to stderr and are silent below `warn` unless
//! `--verbose` or `RUST_LOG` says otherwise.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap, version string
//! - `commands`: Context setup and per-command handlers
//! - `render`: Text and JSON output

mod commands;
mod render;
pub mod setup;

pub use commands::run;
