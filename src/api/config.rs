use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::core::NumberFormat;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Line colors for the monthly trend datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPalette {
    pub expenses: String,
    pub income: String,
    pub savings: String,
}

impl Default for SeriesPalette {
    fn default() -> Self {
        Self {
            expenses: "rgba(255, 99, 132, 1)".to_owned(),
            income: "rgba(4, 162, 235, 1)".to_owned(),
            savings: "rgba(255, 205, 86, 1)".to_owned(),
        }
    }
}

/// Color tokens handed to the charts, as CSS color strings.
///
/// Charts never look colors up themselves; hosts resolve a theme once and
/// pass the resulting [`ResolvedTheme`] colors in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub background: String,
    /// Axis lines and label text.
    pub foreground: String,
    /// Bar fill.
    pub accent: String,
    /// Unfilled part of the donut ring.
    pub track: String,
    #[serde(default)]
    pub series: SeriesPalette,
    /// Host-specific named tokens, kept in declaration order.
    #[serde(default)]
    pub extra: IndexMap<String, String>,
}

impl ChartTheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: "#fffbfe".to_owned(),
            foreground: "#1c1b1f".to_owned(),
            accent: "#75c2be".to_owned(),
            track: "#e8def8".to_owned(),
            series: SeriesPalette::default(),
            extra: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: "#1c1b1f".to_owned(),
            foreground: "#e6e1e5".to_owned(),
            accent: "#75c2be".to_owned(),
            track: "#332d41".to_owned(),
            series: SeriesPalette::default(),
            extra: IndexMap::new(),
        }
    }

    /// Parses every token; the first invalid one is reported by name.
    pub fn resolve(&self) -> ChartResult<ResolvedTheme> {
        let parse = |name: &str, value: &str| {
            Color::parse_css(value)
                .map_err(|_| ChartError::InvalidConfig(format!("theme color `{name}` is invalid: `{value}`")))
        };

        let mut extra = IndexMap::with_capacity(self.extra.len());
        for (name, value) in &self.extra {
            extra.insert(name.clone(), parse(name, value)?);
        }

        Ok(ResolvedTheme {
            background: parse("background", &self.background)?,
            foreground: parse("foreground", &self.foreground)?,
            accent: parse("accent", &self.accent)?,
            track: parse("track", &self.track)?,
            expenses: parse("series.expenses", &self.series.expenses)?,
            income: parse("series.income", &self.series.income)?,
            savings: parse("series.savings", &self.series.savings)?,
            extra,
        })
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub track: Color,
    pub expenses: Color,
    pub income: Color,
    pub savings: Color,
    pub extra: IndexMap<String, Color>,
}

impl ResolvedTheme {
    #[must_use]
    pub fn token(&self, name: &str) -> Option<Color> {
        self.extra.get(name).copied()
    }
}

/// Explicit dashboard configuration replacing ambient theme/session lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the aggregates API, without trailing slash.
    pub api_base: String,
    #[serde(default)]
    pub number_format: NumberFormat,
    #[serde(default)]
    pub theme: ChartTheme,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl DashboardConfig {
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            number_format: NumberFormat::default(),
            theme: ChartTheme::default(),
            animation: AnimationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Joins `path` onto the API base, normalizing slashes.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse dashboard config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize dashboard config: {e}"))
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.api_base.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "api_base must not be empty".to_owned(),
            ));
        }
        self.theme.resolve().map(|_| ())
    }
}
