//! Human-readable explanation and reason strings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::restaurant::RestaurantRecord;

/// Language used for assistant text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ta")]
    Tamil,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ta" | "tamil" => Ok(Locale::Tamil),
            other => Err(format!("unsupported locale `{other}`")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Tamil => write!(f, "ta"),
        }
    }
}

fn rating_text(r: &RestaurantRecord) -> String {
    r.rating
        .map(|rating| rating.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

impl Locale {
    pub fn matched_explanation(&self, message: &str) -> String {
        match self {
            Locale::English => format!(
                "You asked for: \"{message}\". Here are a few places that fit your mood and taste:"
            ),
            Locale::Tamil => format!(
                "நீங்கள் கேட்டது: \"{message}\".\nஉங்கள் மனநிலையும் உணவு விருப்பத்தையும் பொருத்து சில நல்ல இடங்கள் இதோ:"
            ),
        }
    }

    pub fn fallback_explanation(&self) -> String {
        match self {
            Locale::English => {
                "Nothing matched that directly, but here are some popular places nearby:".to_string()
            }
            Locale::Tamil => {
                "கேட்ட மாதிரி நேரடியான இடம் கிடைக்கல. ஆனா உங்க அருகில இருக்க சில பிரபலமான இடங்கள் இதோ:"
                    .to_string()
            }
        }
    }

    pub fn matched_reason(&self, r: &RestaurantRecord) -> String {
        let (name, area, cuisine) = (r.name(), r.area(), r.cuisine());
        match self {
            Locale::English => {
                format!("{name} in {area} is a {cuisine} place that fits what you're craving.")
            }
            Locale::Tamil => format!(
                "{name} {area} பகுதியில் இருக்கும் {cuisine} இடம். உங்க current mood & விருப்பத்துக்கு செம்ம match ஆகும்."
            ),
        }
    }

    pub fn fallback_reason(&self, r: &RestaurantRecord) -> String {
        let (name, area) = (r.name(), r.area());
        match self {
            Locale::English => format!("{name} is a popular spot in {area}."),
            Locale::Tamil => format!("{name} {area} பகுதியில் பிரபலமான இடம்."),
        }
    }

    pub fn surprise_message(&self, r: &RestaurantRecord) -> String {
        let (name, area, rating) = (r.name(), r.area(), rating_text(r));
        match self {
            Locale::English => {
                format!("Surprise! Try {name} today. It's a favourite in {area}, rating {rating}.")
            }
            Locale::Tamil => format!(
                "Surprise! இன்று {name} try பண்ணிக்கோங்க. {area} பகுதியில் ரொம்பப் பிரபலமா இருக்குது, rating {rating}."
            ),
        }
    }
}
