//! Screen routes.

/// Routing hint that selects the history screen.
pub const HISTORY_ROUTE: &str = "Notification";

/// Route name of the home screen.
pub const HOME_ROUTE: &str = "Home";

/// Screens the device UI can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Screen {
    /// Send form and badge affordance.
    #[default]
    Home,
    /// Notification history list.
    History,
}

impl Screen {
    /// Route name used on the wire and in navigation.
    pub fn route_name(self) -> &'static str {
        match self {
            Self::Home => HOME_ROUTE,
            Self::History => HISTORY_ROUTE,
        }
    }

    /// Look up a screen by route name.
    pub fn from_route_name(name: &str) -> Option<Self> {
        match name {
            HOME_ROUTE => Some(Self::Home),
            HISTORY_ROUTE => Some(Self::History),
            _ => None,
        }
    }

    /// Resolve a delivery routing hint.
    ///
    /// Only the history sentinel routes; every other hint is ignored.
    pub fn from_routing_hint(hint: Option<&str>) -> Option<Self> {
        match hint {
            Some(HISTORY_ROUTE) => Some(Self::History),
            _ => None,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_hint() {
        assert_eq!(
            Screen::from_routing_hint(Some("Notification")),
            Some(Screen::History)
        );
        assert_eq!(Screen::from_routing_hint(Some("Home")), None);
        assert_eq!(Screen::from_routing_hint(Some("notification")), None);
        assert_eq!(Screen::from_routing_hint(None), None);
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Screen::from_route_name("Home"), Some(Screen::Home));
        assert_eq!(Screen::from_route_name("Notification"), Some(Screen::History));
        assert_eq!(Screen::History.to_string(), "Notification");
    }
}
