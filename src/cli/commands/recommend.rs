//! stackref recommend - Recommend a stack for project constraints
//!
//! Prints the rule-based shortlist and, separately, the search-driven
//! matches with their reasoning. The two lists are computed independently.

use clap::Args;

use crate::app::AppContext;
use crate::cli::ConstraintArgs;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Skip the AI narrative even when a credential is configured
    #[arg(long)]
    pub offline: bool,
}

pub fn run(ctx: &AppContext, args: &RecommendArgs) -> Result<()> {
    let constraints = args.constraints.to_constraints()?;
    if !args.offline {
        ctx.restore_ai();
    }

    let shortlist = ctx.advisor.recommend_for_constraints(constraints.as_ref());
    let matches = ctx
        .advisor
        .recommend_by_query(&constraints.clone().unwrap_or_default());

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "constraints": constraints,
            "shortlist": shortlist,
            "search": matches,
        })));
    }

    let mut layout = HumanLayout::new();
    layout.title("Recommended stack");
    if let Some(constraints) = constraints.as_ref().filter(|c| !c.is_empty()) {
        layout.kv("Constraints", &constraints.summary()).blank();
    }
    for id in &shortlist {
        let name = ctx
            .advisor
            .get_technology(id)
            .map_or(id.as_str(), |p| p.name.as_str());
        layout.bullet(&format!("{name} ({id})"));
    }

    if !matches.recommended.is_empty() {
        layout.blank().section("Search matches");
        for profile in &matches.recommended {
            layout.bullet(&format!("{} - {}", profile.name, profile.description));
        }
    }
    if !matches.reasoning.is_empty() {
        layout.blank().section("Reasoning").bullets(&matches.reasoning);
    }
    if let Some(text) = &matches.ai_recommendations {
        layout.blank().section("AI recommendation").push_line(text.clone());
    }

    emit_human(layout);
    Ok(())
}
