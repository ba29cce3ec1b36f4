//! Post category taxonomy
//!
//! Each post type carries its own category set; `Other` is the single
//! category shared by both sets.

use serde::{Deserialize, Serialize};

use crate::types::post::PostType;

/// Category assigned to a post (by the server-side classifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    // good_thing categories
    School,
    Friends,
    Family,
    Hobby,
    Achievement,
    Nature,
    Food,

    // ideal_world categories
    Environment,
    Peace,
    Education,
    HumanRights,
    Technology,
    Health,
    Community,

    Other,
}

impl PostCategory {
    /// Wire value used in query parameters and JSON bodies
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Friends => "friends",
            Self::Family => "family",
            Self::Hobby => "hobby",
            Self::Achievement => "achievement",
            Self::Nature => "nature",
            Self::Food => "food",
            Self::Environment => "environment",
            Self::Peace => "peace",
            Self::Education => "education",
            Self::HumanRights => "human_rights",
            Self::Technology => "technology",
            Self::Health => "health",
            Self::Community => "community",
            Self::Other => "other",
        }
    }

    /// The post type this category belongs to.
    ///
    /// `Other` appears in both per-type sets; it maps to `GoodThing` here to
    /// keep the function total.
    #[must_use]
    pub fn post_type(&self) -> PostType {
        match self {
            Self::School
            | Self::Friends
            | Self::Family
            | Self::Hobby
            | Self::Achievement
            | Self::Nature
            | Self::Food
            | Self::Other => PostType::GoodThing,
            Self::Environment
            | Self::Peace
            | Self::Education
            | Self::HumanRights
            | Self::Technology
            | Self::Health
            | Self::Community => PostType::IdealWorld,
        }
    }

    /// Selectable categories for the given post type
    #[must_use]
    pub fn categories_for(post_type: PostType) -> &'static [PostCategory] {
        match post_type {
            PostType::GoodThing => &[
                Self::School,
                Self::Friends,
                Self::Family,
                Self::Hobby,
                Self::Achievement,
                Self::Nature,
                Self::Food,
                Self::Other,
            ],
            PostType::IdealWorld => &[
                Self::Environment,
                Self::Peace,
                Self::Education,
                Self::HumanRights,
                Self::Technology,
                Self::Health,
                Self::Community,
                Self::Other,
            ],
        }
    }
}
