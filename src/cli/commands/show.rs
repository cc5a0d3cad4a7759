//! stackref show - Show one technology profile

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::compare::{RiskLevel, StackMetrics};
use crate::error::{Result, StackError};
use crate::knowledge::TechnologyProfile;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Technology id (e.g. react, postgresql)
    pub id: String,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let id = args.id.trim().to_lowercase();
    let profile = ctx
        .advisor
        .get_technology(&id)
        .ok_or_else(|| StackError::NotFound(args.id.clone()))?;
    debug!(target: "show", id = %profile.id, "showing profile");

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "technology": profile,
            "metrics": StackMetrics::of(profile),
            "risk": RiskLevel::of(profile),
        })));
    }

    emit_human(profile_layout(profile));
    Ok(())
}

fn profile_layout(profile: &TechnologyProfile) -> HumanLayout {
    let metrics = StackMetrics::of(profile);
    let mut layout = HumanLayout::new();
    layout
        .title(&profile.name)
        .push_line(profile.description.clone())
        .blank()
        .kv("ID", &profile.id)
        .kv("Category", &profile.category)
        .kv("Learning curve", &format!("{} ({}%)", profile.learning_curve, metrics.learning_curve))
        .kv("Scalability", &format!("{} ({}%)", profile.scalability, metrics.scalability))
        .kv("Community", &format!("{} ({}%)", profile.community, metrics.community))
        .kv("Performance", &format!("{} ({}%)", profile.performance, metrics.performance))
        .kv("Maturity", profile.maturity.as_str())
        .kv("Risk", RiskLevel::of(profile).badge())
        .kv("Tags", &profile.tags.join(", "));

    let lists: [(&str, &[String]); 7] = [
        ("Use cases", &profile.use_cases),
        ("Pros", &profile.pros),
        ("Cons", &profile.cons),
        ("Best practices", &profile.best_practices),
        ("Common pitfalls", &profile.common_pitfalls),
        ("Ecosystem", &profile.ecosystem),
        ("Alternatives", &profile.alternatives),
    ];
    for (heading, items) in lists {
        if items.is_empty() {
            continue;
        }
        layout.blank().section(heading).bullets(items);
    }
    if !profile.real_world_examples.is_empty() {
        layout
            .blank()
            .kv("Used by", &profile.real_world_examples.join(", "));
    }
    layout
}
