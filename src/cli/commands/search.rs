//! stackref search - Fuzzy search the knowledge base

use clap::Args;
use serde::Serialize;

use super::profile_line;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Maximum number of results (defaults to search.default_limit)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchHit<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    score: f64,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.search.default_limit);
    let matches = ctx.advisor.index().search_scored(&args.query, limit);

    if ctx.robot_mode {
        let hits: Vec<SearchHit<'_>> = matches
            .iter()
            .map(|m| SearchHit {
                id: &m.profile.id,
                name: &m.profile.name,
                category: &m.profile.category,
                score: m.score,
            })
            .collect();
        return emit_robot(&robot_ok(serde_json::json!({
            "query": args.query,
            "results": hits,
        })));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Search: {}", args.query));
    if matches.is_empty() {
        layout.push_line("No matching technologies.");
    }
    for m in &matches {
        layout.push_line(format!("{:>5.2}  {}", m.score, profile_line(m.profile)));
    }
    emit_human(layout);
    Ok(())
}
