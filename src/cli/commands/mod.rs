//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod ai;
pub mod chat;
pub mod compare;
pub mod list;
pub mod recommend;
pub mod referee;
pub mod risks;
pub mod search;
pub mod show;

use crate::app::AppContext;
use crate::error::Result;
use crate::knowledge::TechnologyProfile;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Recommend(args) => recommend::run(ctx, args),
        Commands::Compare(args) => compare::run(ctx, args),
        Commands::Risks(args) => risks::run(ctx, args),
        Commands::Referee(args) => referee::run(ctx, args),
        Commands::Chat(args) => chat::run(ctx, args),
        Commands::Ai(args) => ai::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzzy search the knowledge base
    Search(search::SearchArgs),

    /// Show one technology profile
    Show(show::ShowArgs),

    /// List technologies, optionally by category
    List(list::ListArgs),

    /// Recommend a stack for project constraints
    Recommend(recommend::RecommendArgs),

    /// Compare technologies side by side
    Compare(compare::CompareArgs),

    /// Assess the risks of a selection
    Risks(risks::RisksArgs),

    /// Neutral verdict on a selection
    Referee(referee::RefereeArgs),

    /// Ask a question about technology choices
    Chat(chat::ChatArgs),

    /// Manage the optional AI credential
    Ai(ai::AiArgs),
}

/// One-line listing used by search and list.
pub(crate) fn profile_line(profile: &TechnologyProfile) -> String {
    format!("{} ({}) - {}", profile.name, profile.id, profile.category)
}
