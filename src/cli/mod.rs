//! Command-line interface for bingewatcher.

mod commands;

use clap::{Parser, Subcommand};

use crate::entities::show::ShowStatus;

/// Bingewatcher - personal show tracker
/// Follows your watchlist and surfaces newly released episodes
#[derive(Parser)]
#[command(name = "bingewatcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a show to your watchlist
    #[command(alias = "a")]
    Add {
        /// Name of the show
        name: String,

        /// Link to the show's IMDb page
        imdb_link: String,

        /// Watching status
        #[arg(short, long, default_value = "watching", value_parser = parse_status)]
        status: ShowStatus,

        /// Number of the last watched episode
        #[arg(short, long)]
        last_watched: Option<i32>,

        /// Your rating for the show, 0-10
        #[arg(short, long)]
        rating: Option<f32>,

        /// Poll this show for new episodes (defaults from status)
        #[arg(short, long)]
        notify: Option<bool>,
    },

    /// Update a tracked show
    #[command(alias = "u")]
    Update {
        /// Name of the show to update
        name: String,

        /// Rename the show
        #[arg(long)]
        new_name: Option<String>,

        /// Update the last watched episode; pending episodes up to this
        /// number are cleared
        #[arg(short, long)]
        last_watched: Option<i32>,

        /// Update your rating
        #[arg(short, long)]
        rating: Option<f32>,

        /// Override the notify flag
        #[arg(short, long)]
        notify: Option<bool>,

        /// Update the watching status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<ShowStatus>,
    },

    /// Remove a show from the watchlist
    #[command(alias = "rm")]
    Remove {
        /// Name of the show to remove
        name: String,
    },

    /// List tracked shows
    #[command(alias = "c")]
    Catalog,

    /// Sync followed shows, then list pending new episodes
    #[command(alias = "ls", alias = "l")]
    List,

    /// Run a sync pass without listing
    Sync,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

fn parse_status(s: &str) -> Result<ShowStatus, String> {
    match s {
        "plan_to_watch" => Ok(ShowStatus::PlanToWatch),
        "watching" => Ok(ShowStatus::Watching),
        "on_hold" => Ok(ShowStatus::OnHold),
        "dropped" => Ok(ShowStatus::Dropped),
        "watched" => Ok(ShowStatus::Watched),
        _ => Err(format!(
            "unknown status '{s}' (expected plan_to_watch, watching, on_hold, dropped or watched)"
        )),
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parser_accepts_all_variants() {
        assert_eq!(parse_status("plan_to_watch"), Ok(ShowStatus::PlanToWatch));
        assert_eq!(parse_status("watching"), Ok(ShowStatus::Watching));
        assert_eq!(parse_status("on_hold"), Ok(ShowStatus::OnHold));
        assert_eq!(parse_status("dropped"), Ok(ShowStatus::Dropped));
        assert_eq!(parse_status("watched"), Ok(ShowStatus::Watched));
        assert!(parse_status("binging").is_err());
    }
}
