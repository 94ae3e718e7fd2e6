//! # Nomad CLI
//!
//! A terminal client for the `nomadapp` data layer. The binary is thin: the
//! CLI lives in `src/cli/`, and this file only calls `cli::run()` and turns an
//! error into an exit code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal and JSON rendering (render.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  nomadapp (NomadApi, filters, stores)                       │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
