use crate::model::ConditionCategory;

/// Emoji drawn for a condition. Emoji carry their own color in a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: &'static str,
}

pub const FALLBACK_GLYPH: Glyph = Glyph { symbol: "🌡️" };

const GLYPHS: [(ConditionCategory, Glyph); 7] = [
    (ConditionCategory::Clear, Glyph { symbol: "☀️" }),
    (ConditionCategory::Clouds, Glyph { symbol: "☁️" }),
    (ConditionCategory::Rain, Glyph { symbol: "🌧️" }),
    (ConditionCategory::Drizzle, Glyph { symbol: "🌦️" }),
    (ConditionCategory::Thunderstorm, Glyph { symbol: "⛈️" }),
    (ConditionCategory::Snow, Glyph { symbol: "❄️" }),
    (ConditionCategory::Mist, Glyph { symbol: "🌫️" }),
];

/// Glyph for a condition; anything not in the table gets [`FALLBACK_GLYPH`].
pub fn glyph(category: ConditionCategory) -> Glyph {
    GLYPHS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, g)| *g)
        .unwrap_or(FALLBACK_GLYPH)
}

/// Background gradients, named in the screen header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Shown when there is no weather to theme by.
    Default,
    ClearDay,
    ClearNight,
    CloudyDay,
    CloudyNight,
    Rainy,
    Stormy,
    Snowy,
    Misty,
    Overcast,
    Night,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::ClearDay => "clear day",
            Theme::ClearNight => "clear night",
            Theme::CloudyDay => "cloudy day",
            Theme::CloudyNight => "cloudy night",
            Theme::Rainy => "rain",
            Theme::Stormy => "storm",
            Theme::Snowy => "snow",
            Theme::Misty => "mist",
            Theme::Overcast => "overcast",
            Theme::Night => "night",
        }
    }

    /// `[from, via, to]` gradient stops.
    pub fn gradient(&self) -> [&'static str; 3] {
        match self {
            Theme::Default => ["sky-800", "cyan-700", "emerald-500"],
            Theme::ClearDay => ["sky-400", "amber-300", "orange-400"],
            Theme::ClearNight => ["indigo-950", "blue-900", "slate-800"],
            Theme::CloudyDay => ["slate-400", "gray-500", "slate-600"],
            Theme::CloudyNight => ["slate-800", "gray-900", "zinc-900"],
            Theme::Rainy => ["slate-700", "blue-800", "cyan-900"],
            Theme::Stormy => ["gray-900", "purple-900", "slate-800"],
            Theme::Snowy => ["slate-100", "sky-200", "blue-300"],
            Theme::Misty => ["gray-400", "slate-400", "zinc-500"],
            Theme::Overcast => ["slate-500", "cyan-800", "teal-700"],
            Theme::Night => ["slate-900", "indigo-900", "gray-900"],
        }
    }
}

pub fn theme_for(category: ConditionCategory, is_night: bool) -> Theme {
    match (category, is_night) {
        (ConditionCategory::Clear, false) => Theme::ClearDay,
        (ConditionCategory::Clear, true) => Theme::ClearNight,
        (ConditionCategory::Clouds, false) => Theme::CloudyDay,
        (ConditionCategory::Clouds, true) => Theme::CloudyNight,
        (ConditionCategory::Rain | ConditionCategory::Drizzle, _) => Theme::Rainy,
        (ConditionCategory::Thunderstorm, _) => Theme::Stormy,
        (ConditionCategory::Snow, _) => Theme::Snowy,
        (ConditionCategory::Mist, _) => Theme::Misty,
        (ConditionCategory::Other, false) => Theme::Overcast,
        (ConditionCategory::Other, true) => Theme::Night,
    }
}
