//! Routes (service lines).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RouteId;

/// Service category of a route, derived from the colour the network paints
/// it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteCategory {
    /// High-frequency trunk lines.
    Trunk,
    /// Ordinary all-stops lines.
    Regular,
    /// Limited-stop express lines.
    Express,
    /// Night service.
    LateNight,
}

impl RouteCategory {
    /// Map a route colour (`RRGGBB`, case-insensitive, optional `#`) to a
    /// category. Unknown colours are regular lines.
    ///
    /// ```
    /// use transit_graph::domain::RouteCategory;
    ///
    /// assert_eq!(RouteCategory::from_color("97BF0D"), RouteCategory::Trunk);
    /// assert_eq!(RouteCategory::from_color("#e04503"), RouteCategory::Express);
    /// assert_eq!(RouteCategory::from_color("FFFFFF"), RouteCategory::Regular);
    /// ```
    pub fn from_color(color: &str) -> Self {
        let color = color.trim().trim_start_matches('#');
        match color.to_ascii_uppercase().as_str() {
            "97BF0D" => RouteCategory::Trunk,
            "E04503" => RouteCategory::Express,
            "1A171B" | "003888" => RouteCategory::LateNight,
            _ => RouteCategory::Regular,
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteCategory::Trunk => "trunk",
            RouteCategory::Regular => "regular",
            RouteCategory::Express => "express",
            RouteCategory::LateNight => "late night",
        };
        f.write_str(name)
    }
}

/// A service line. Many trips share one route.
///
/// Two routes with the same public `number` are treated as the same line
/// when arcs are deduplicated, even if the feed gives them distinct ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id: RouteId,
    number: String,
    name: String,
    category: RouteCategory,
}

impl Route {
    pub fn new(
        id: RouteId,
        number: impl Into<String>,
        name: impl Into<String>,
        category: RouteCategory,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            name: name.into(),
            category,
        }
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    /// Public line number, the key used for route distinctness.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> RouteCategory {
        self.category
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.number, self.name, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_night_colours() {
        assert_eq!(RouteCategory::from_color("1a171b"), RouteCategory::LateNight);
        assert_eq!(RouteCategory::from_color("003888"), RouteCategory::LateNight);
    }

    #[test]
    fn route_display() {
        let route = Route::new(
            RouteId::from("800-1"),
            "800",
            "Pointe-de-Sainte-Foy",
            RouteCategory::Trunk,
        );
        assert_eq!(route.to_string(), "800 Pointe-de-Sainte-Foy (trunk)");
        assert_eq!(route.number(), "800");
        assert_eq!(route.id().as_str(), "800-1");
    }
}
