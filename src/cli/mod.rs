//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::error::Result;
use crate::recommend::{
    Budget, Experience, ProjectConstraints, ProjectType, ScaleNeed, TeamSize, Timeline,
};

pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "stackref", version, about = "Tech Stack Referee", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit JSON envelopes on stdout instead of human output
    #[arg(long, global = true, env = "STACKREF_ROBOT")]
    pub robot: bool,

    /// Explicit config file (skips global and project config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub const fn output_mode(&self) -> OutputMode {
        if self.robot {
            OutputMode::Robot
        } else {
            OutputMode::Human
        }
    }
}

/// Project constraint flags shared by recommend, risks, referee and chat.
#[derive(Args, Debug, Clone, Default)]
pub struct ConstraintArgs {
    /// web-app, mobile, api or full-stack
    #[arg(long = "type", value_name = "TYPE")]
    pub project_type: Option<ProjectType>,

    /// small, medium or large
    #[arg(long)]
    pub team: Option<TeamSize>,

    /// short, medium or long
    #[arg(long)]
    pub timeline: Option<Timeline>,

    /// low, medium or high
    #[arg(long)]
    pub scale: Option<ScaleNeed>,

    /// low, moderate or high
    #[arg(long)]
    pub budget: Option<Budget>,

    /// beginner, intermediate or expert
    #[arg(long)]
    pub experience: Option<Experience>,

    /// Technologies the team already knows (repeat or comma-separate)
    #[arg(long = "knows", value_delimiter = ',', value_name = "TECH")]
    pub technologies: Vec<String>,

    /// Constraints as a JSON object; flags override its fields
    #[arg(long, value_name = "JSON")]
    pub constraints_json: Option<String>,
}

impl ConstraintArgs {
    /// Merged constraints, or `None` when nothing was supplied.
    pub fn to_constraints(&self) -> Result<Option<ProjectConstraints>> {
        let mut constraints = match &self.constraints_json {
            Some(raw) => serde_json::from_str::<ProjectConstraints>(raw)?,
            None => ProjectConstraints::default(),
        };
        if self.project_type.is_some() {
            constraints.project_type = self.project_type;
        }
        if self.team.is_some() {
            constraints.team_size = self.team;
        }
        if self.timeline.is_some() {
            constraints.timeline = self.timeline;
        }
        if self.scale.is_some() {
            constraints.scalability = self.scale;
        }
        if self.budget.is_some() {
            constraints.budget = self.budget;
        }
        if self.experience.is_some() {
            constraints.experience = self.experience;
        }
        for tech in &self.technologies {
            let tech = tech.trim();
            if !tech.is_empty() && !constraints.knows(tech) {
                constraints.technologies.push(tech.to_string());
            }
        }

        let supplied = self.constraints_json.is_some() || !constraints.is_empty();
        Ok(supplied.then_some(constraints))
    }
}
