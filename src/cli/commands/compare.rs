//! stackref compare - Compare technologies side by side

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::compare::ComparisonResult;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Technology ids to compare
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Attach an AI insight when a credential is configured
    #[arg(long)]
    pub insights: bool,
}

pub fn run(ctx: &AppContext, args: &CompareArgs) -> Result<()> {
    let ids: Vec<String> = args.ids.iter().map(|id| id.trim().to_lowercase()).collect();
    let result = if args.insights && ctx.restore_ai() {
        ctx.advisor.compare_with_insights(&ids)
    } else {
        ctx.advisor.compare_technologies(&ids)
    };

    let unknown: Vec<&String> = ids
        .iter()
        .filter(|id| ctx.advisor.get_technology(id).is_none())
        .collect();

    if ctx.robot_mode {
        let mut response = robot_ok(&result);
        for id in unknown {
            response = response.with_warning(format!("unknown technology: {id}"));
        }
        return emit_robot(&response);
    }

    let mut layout = HumanLayout::new();
    for id in unknown {
        layout.push_line(format!("Skipping unknown technology: {id}"));
    }
    comparison_layout(&mut layout, &result);
    emit_human(layout);
    Ok(())
}

fn comparison_layout(layout: &mut HumanLayout, result: &ComparisonResult) {
    if result.stacks.is_empty() {
        layout.push_line("Nothing to compare.");
        return;
    }

    let names: Vec<&str> = result.stacks.iter().map(|s| s.name.as_str()).collect();
    layout.title(&format!("Compare: {}", names.join(" vs ")));

    for stack in &result.stacks {
        layout.section(&stack.name);
        if let Some(metrics) = result.metrics.get(&stack.id) {
            layout
                .kv("Learning curve", &format!("{}%", metrics.learning_curve))
                .kv("Scalability", &format!("{}%", metrics.scalability))
                .kv("Community", &format!("{}%", metrics.community))
                .kv("Performance", &format!("{}%", metrics.performance));
        }
        if let Some(risk) = result.risk.get(&stack.id) {
            layout.kv("Risk", risk.badge());
        }
        if let Some(strengths) = result.strengths.get(&stack.id) {
            layout.push_line("Strengths:").bullets(strengths);
        }
        if let Some(weaknesses) = result.weaknesses.get(&stack.id) {
            layout.push_line("Weaknesses:").bullets(weaknesses);
        }
        if let Some(best_for) = result.best_for.get(&stack.id) {
            layout.kv("Best for", &best_for.join(", "));
        }
        layout.blank();
    }

    if !result.recommendations.is_empty() {
        layout.section("Recommendations").bullets(&result.recommendations);
    }
    if let Some(insights) = &result.ai_insights {
        layout.blank().section("AI insights").push_line(insights.clone());
    }
}
