//! Project constraints supplied per recommendation request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StackError;

macro_rules! constraint_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StackError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let value = value.trim().to_lowercase();
                match value.as_str() {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(StackError::Config(format!(
                        "invalid {} {value:?} (expected {})",
                        stringify!($name),
                        [$($label),+].join("|")
                    ))),
                }
            }
        }
    };
}

constraint_enum!(
    /// Shape of the project being planned.
    ProjectType {
        WebApp => "web-app",
        Mobile => "mobile",
        Api => "api",
        FullStack => "full-stack",
    }
);

constraint_enum!(TeamSize {
    Small => "small",
    Medium => "medium",
    Large => "large",
});

constraint_enum!(Timeline {
    Short => "short",
    Medium => "medium",
    Long => "long",
});

constraint_enum!(
    /// Expected scale of the finished system.
    ScaleNeed {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

constraint_enum!(Budget {
    Low => "low",
    Moderate => "moderate",
    High => "high",
});

constraint_enum!(Experience {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Expert => "expert",
});

/// Self-reported project constraints. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<TeamSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalability: Option<ScaleNeed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
    /// Free-form tags of technologies the team already knows.
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl ProjectConstraints {
    /// Case-insensitive membership test on `technologies`.
    pub fn knows(&self, technology: &str) -> bool {
        self.technologies
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(technology))
    }

    pub fn knows_any(&self, technologies: &[&str]) -> bool {
        technologies.iter().any(|t| self.knows(t))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// One-line summary used in prompts and human output.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(value) = self.project_type {
            parts.push(format!("project type: {value}"));
        }
        if let Some(value) = self.team_size {
            parts.push(format!("team size: {value}"));
        }
        if let Some(value) = self.timeline {
            parts.push(format!("timeline: {value}"));
        }
        if let Some(value) = self.scalability {
            parts.push(format!("scalability: {value}"));
        }
        if let Some(value) = self.budget {
            parts.push(format!("budget: {value}"));
        }
        if let Some(value) = self.experience {
            parts.push(format!("experience: {value}"));
        }
        if !self.technologies.is_empty() {
            parts.push(format!("known technologies: {}", self.technologies.join(", ")));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("full-stack".parse::<ProjectType>().unwrap(), ProjectType::FullStack);
        assert_eq!(" Beginner ".parse::<Experience>().unwrap(), Experience::Beginner);
        assert_eq!("moderate".parse::<Budget>().unwrap(), Budget::Moderate);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = "desktop".parse::<ProjectType>().unwrap_err();
        assert!(err.to_string().contains("web-app|mobile|api|full-stack"));
    }

    #[test]
    fn test_json_round_trip_uses_labels() {
        let json = r#"{"projectType":"web-app","scalability":"high","technologies":["Python"]}"#;
        let constraints: ProjectConstraints = serde_json::from_str(json).unwrap();
        assert_eq!(constraints.project_type, Some(ProjectType::WebApp));
        assert_eq!(constraints.scalability, Some(ScaleNeed::High));
        assert!(constraints.knows("python"));
        assert!(constraints.team_size.is_none());
    }

    #[test]
    fn test_summary_lists_present_fields() {
        let constraints = ProjectConstraints {
            project_type: Some(ProjectType::Api),
            budget: Some(Budget::Low),
            technologies: vec!["go".to_string()],
            ..Default::default()
        };
        assert_eq!(
            constraints.summary(),
            "project type: api, budget: low, known technologies: go"
        );
        assert!(ProjectConstraints::default().is_empty());
    }
}
