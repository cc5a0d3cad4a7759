//! stackref list - List technologies

use clap::Args;

use super::profile_line;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::knowledge::TechnologyProfile;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only categories containing this text (case-insensitive)
    #[arg(long, short)]
    pub category: Option<String>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let profiles: Vec<&TechnologyProfile> = match &args.category {
        Some(category) => ctx.advisor.technologies_by_category(category),
        None => ctx.advisor.list_technologies().iter().collect(),
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "count": profiles.len(),
            "technologies": profiles,
        })));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Technologies ({})", profiles.len()));
    for profile in &profiles {
        layout.bullet(&profile_line(profile));
    }
    emit_human(layout);
    Ok(())
}
