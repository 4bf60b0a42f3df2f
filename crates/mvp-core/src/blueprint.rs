//! Blueprint template
//!
//! The plan shown in the review stage. It is a fixed template: the idea text
//! is echoed back but does not shape the plan.

use serde::Serialize;

/// Ideas offered as starting points on the capture stage
pub const EXAMPLE_IDEAS: [&str; 4] = [
    "A site where freelancers sell services",
    "A pet-sharing community",
    "A marketplace for local food delivery",
    "A social platform for book lovers",
];

/// Suggestions listed when AI assist is on
pub const IMPROVEMENT_SUGGESTIONS: [&str; 4] = [
    "Add user roles (admin, customer, vendor)",
    "Include payment processing",
    "Add mobile app features",
    "Include social login options",
];

/// A page of the generated app
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// A data model of the generated app
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataModelSpec {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

/// Structural plan for an idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub idea: String,
    pub pages: Vec<PageSpec>,
    pub data_models: Vec<DataModelSpec>,
    pub features: Vec<&'static str>,
}

impl Blueprint {
    /// Plan for `idea`
    #[must_use]
    pub fn for_idea(idea: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            pages: vec![
                PageSpec {
                    name: "Landing Page",
                    description: "Homepage with hero section and features",
                },
                PageSpec {
                    name: "User Registration",
                    description: "Sign up and login functionality",
                },
                PageSpec {
                    name: "User Dashboard",
                    description: "Main user interface and controls",
                },
                PageSpec {
                    name: "Profile Management",
                    description: "User profile and settings",
                },
            ],
            data_models: vec![
                DataModelSpec {
                    name: "User",
                    fields: &["id", "email", "username", "created_at"],
                },
                DataModelSpec {
                    name: "Service",
                    fields: &["id", "title", "description", "price", "user_id"],
                },
                DataModelSpec {
                    name: "Booking",
                    fields: &["id", "user_id", "service_id", "date", "status"],
                },
            ],
            features: vec![
                "User Authentication (Email/Password)",
                "Database Integration",
                "Responsive Design",
                "Admin Dashboard",
                "Search & Filtering",
                "Payment Processing Setup",
            ],
        }
    }
}

/// Capability highlighted on the preview stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFeature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Capabilities every generated MVP ships with
#[must_use]
pub fn preview_features() -> Vec<PreviewFeature> {
    vec![
        PreviewFeature {
            title: "User Management",
            description: "Registration, login, profiles",
        },
        PreviewFeature {
            title: "Service Listings",
            description: "Browse and search services",
        },
        PreviewFeature {
            title: "Payment Ready",
            description: "Payment integration setup",
        },
        PreviewFeature {
            title: "Analytics Dashboard",
            description: "Track performance metrics",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ignores_idea_content() {
        let a = Blueprint::for_idea("A pet-sharing community");
        let b = Blueprint::for_idea("A marketplace for local food delivery");

        assert_eq!(a.pages, b.pages);
        assert_eq!(a.data_models, b.data_models);
        assert_eq!(a.features, b.features);
        assert_eq!(a.idea, "A pet-sharing community");
    }

    #[test]
    fn template_shape() {
        let plan = Blueprint::for_idea("x");
        assert_eq!(plan.pages.len(), 4);
        assert_eq!(plan.data_models.len(), 3);
        assert_eq!(plan.features.len(), 6);
        assert_eq!(preview_features().len(), 4);
    }

    #[test]
    fn example_ideas_all_get_the_template() {
        let template = Blueprint::for_idea("x");
        for idea in EXAMPLE_IDEAS {
            let plan = Blueprint::for_idea(idea);
            assert_eq!(plan.idea, idea);
            assert_eq!(plan.pages, template.pages);
        }
    }
}
