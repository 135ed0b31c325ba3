//! Score classification shared by every formatter

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreClass {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreClass {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreClass::Excellent,
            60..=79 => ScoreClass::Good,
            40..=59 => ScoreClass::Fair,
            _ => ScoreClass::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "excellent",
            ScoreClass::Good => "good",
            ScoreClass::Fair => "fair",
            ScoreClass::Poor => "poor",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "star",
            ScoreClass::Good => "thumbs-up",
            ScoreClass::Fair => "exclamation-circle",
            ScoreClass::Poor => "times-circle",
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "Excellent Match!",
            ScoreClass::Good => "Good Match",
            ScoreClass::Fair => "Fair Match",
            ScoreClass::Poor => "Needs Improvement",
        }
    }

    /// Terminal stand-in for `icon`
    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "⭐",
            ScoreClass::Good => "👍",
            ScoreClass::Fair => "⚠️",
            ScoreClass::Poor => "❌",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub class: ScoreClass,
    pub label: &'static str,
    pub icon: &'static str,
    pub phrase: &'static str,
}

pub fn classify(score: u8) -> Classification {
    let class = ScoreClass::from_score(score);
    Classification {
        class,
        label: class.label(),
        icon: class.icon(),
        phrase: class.phrase(),
    }
}
