//! Dashboard locations and navigation.
//!
//! Routes are declared as a tree of [`RouteEntry`] values (leaves and labelled
//! groups). Matching works on the flattened list; navigation works on the
//! tree.

use serde::Serialize;

/// Which page a location renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Dashboard,
    Events,
    Event,
    Generations,
    Generation,
    Enhancements,
    Enhancement,
    Manifests,
    Manifest,
    Help,
    NotFound,
}

/// A single routable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoute {
    /// Pattern such as `/events/:id`, or `*` for the catch-all.
    pub path: &'static str,
    pub page: PageKind,
    /// Routes without a label are reachable but hidden from navigation.
    pub label: Option<&'static str>,
    /// Separator after this entry in navigation.
    pub divider: bool,
}

impl AppRoute {
    pub fn new(path: &'static str, page: PageKind) -> Self {
        Self {
            path,
            page,
            label: None,
            divider: false,
        }
    }

    pub fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_divider(mut self) -> Self {
        self.divider = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRouteGroup {
    pub label: &'static str,
    pub routes: Vec<AppRoute>,
    /// `None` expands the group when one of its routes is active.
    pub default_expanded: Option<bool>,
    pub divider: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    Leaf(AppRoute),
    Group(AppRouteGroup),
}

impl RouteEntry {
    fn divider(&self) -> bool {
        match self {
            RouteEntry::Leaf(route) => route.divider,
            RouteEntry::Group(group) => group.divider,
        }
    }
}

/// The dashboard's route table, in navigation order.
pub fn app_routes() -> Vec<RouteEntry> {
    use PageKind::*;

    [
        AppRoute::new("/", Dashboard).labelled("Dashboard").with_divider(),
        AppRoute::new("/events", Events).labelled("Events"),
        AppRoute::new("/events/:id", Event),
        AppRoute::new("/generations", Generations).labelled("Generations"),
        AppRoute::new("/generations/:id", Generation),
        AppRoute::new("/requests", Generations),
        AppRoute::new("/requests/:id", Generation),
        AppRoute::new("/enhancements", Enhancements).labelled("Enhancements"),
        AppRoute::new("/enhancements/:id", Enhancement),
        AppRoute::new("/manifests", Manifests)
            .labelled("Manifests")
            .with_divider(),
        AppRoute::new("/manifests/:id", Manifest),
        AppRoute::new("/help", Help).labelled("Help"),
        AppRoute::new("*", NotFound),
    ]
    .into_iter()
    .map(RouteEntry::Leaf)
    .collect()
}

/// Every route in declaration order, groups expanded in place.
pub fn flatten_routes(entries: &[RouteEntry]) -> Vec<&AppRoute> {
    entries
        .iter()
        .flat_map(|entry| match entry {
            RouteEntry::Leaf(route) => std::slice::from_ref(route).iter(),
            RouteEntry::Group(group) => group.routes.iter(),
        })
        .collect()
}

/// Whether a navigation entry for `route_path` is highlighted at `current_path`.
///
/// The root only matches itself; every other route matches itself and the
/// paths below it, on a segment boundary.
pub fn is_route_active(route_path: &str, current_path: &str) -> bool {
    if route_path == "/" {
        current_path == "/"
    } else {
        current_path == route_path
            || current_path
                .strip_prefix(route_path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavItem {
    Link(NavLink),
    Group {
        label: String,
        expanded: bool,
        items: Vec<NavLink>,
    },
    Divider,
}

fn nav_link(route: &AppRoute, current_path: &str) -> Option<NavLink> {
    route.label.map(|label| NavLink {
        label: label.to_string(),
        path: route.path.to_string(),
        active: is_route_active(route.path, current_path),
    })
}

/// Side navigation for `current_path`: labelled leaves, groups, dividers.
pub fn navigation(entries: &[RouteEntry], current_path: &str) -> Vec<NavItem> {
    let mut items = Vec::new();

    for entry in entries {
        let item = match entry {
            RouteEntry::Leaf(route) => nav_link(route, current_path).map(NavItem::Link),
            RouteEntry::Group(group) => {
                let links: Vec<NavLink> = group
                    .routes
                    .iter()
                    .filter_map(|route| nav_link(route, current_path))
                    .collect();
                let any_active = group
                    .routes
                    .iter()
                    .any(|route| is_route_active(route.path, current_path));
                Some(NavItem::Group {
                    label: group.label.to_string(),
                    expanded: group.default_expanded.unwrap_or(any_active),
                    items: links,
                })
            }
        };

        // Unlabelled leaves contribute neither a link nor a divider.
        if let Some(item) = item {
            items.push(item);
            if entry.divider() {
                items.push(NavItem::Divider);
            }
        }
    }

    items
}

/// A dashboard location: path plus raw query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    /// Splits `"/events?page=2"` into path and query. Fragments are dropped.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let location = location.split('#').next().unwrap_or_default();
        let (path, query) = location.split_once('?').unwrap_or((location, ""));

        let path = path.trim_end_matches('/');
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            path,
            query: query.to_string(),
        }
    }

    /// Same path with a different query string.
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            path: self.path.clone(),
            query: query.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Result of matching a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
    pub page: PageKind,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Percent-decodes a captured path segment. Invalid UTF-8 keeps the raw text.
fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::debug!("Keeping undecodable path segment '{}': {}", segment, e);
            segment.to_string()
        }
    }
}

fn match_pattern(pattern: &str, path: &str) -> Option<Option<String>> {
    if pattern == "*" {
        return Some(None);
    }

    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut id = None;
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if expected.starts_with(':') {
            id = Some(decode_segment(actual));
        } else if expected != actual {
            return None;
        }
    }
    Some(id)
}

/// Matches `path` against the flattened table; first match wins.
///
/// Falls back to the not-found page when nothing, not even a catch-all,
/// matches.
pub fn resolve(entries: &[RouteEntry], path: &str) -> RouteMatch {
    let path = Location::parse(path).path;

    flatten_routes(entries)
        .into_iter()
        .find_map(|route| {
            match_pattern(route.path, &path).map(|id| RouteMatch {
                page: route.page,
                pattern: route.path.to_string(),
                id,
            })
        })
        .unwrap_or_else(|| RouteMatch {
            page: PageKind::NotFound,
            pattern: "*".to_string(),
            id: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_app(path: &str) -> RouteMatch {
        resolve(&app_routes(), path)
    }

    #[test]
    fn test_resolve_list_and_detail_routes() {
        assert_eq!(resolve_app("/").page, PageKind::Dashboard);
        assert_eq!(resolve_app("/events").page, PageKind::Events);
        assert_eq!(resolve_app("/generations").page, PageKind::Generations);
        assert_eq!(resolve_app("/enhancements").page, PageKind::Enhancements);
        assert_eq!(resolve_app("/manifests").page, PageKind::Manifests);
        assert_eq!(resolve_app("/help").page, PageKind::Help);

        let event = resolve_app("/events/E0AAAA");
        assert_eq!(event.page, PageKind::Event);
        assert_eq!(event.id.as_deref(), Some("E0AAAA"));

        let manifest = resolve_app("/manifests/M1?page=2");
        assert_eq!(manifest.page, PageKind::Manifest);
        assert_eq!(manifest.id.as_deref(), Some("M1"));
    }

    #[test]
    fn test_requests_alias_generations() {
        assert_eq!(resolve_app("/requests").page, PageKind::Generations);
        let generation = resolve_app("/requests/G42/");
        assert_eq!(generation.page, PageKind::Generation);
        assert_eq!(generation.id.as_deref(), Some("G42"));
        assert_eq!(generation.pattern, "/requests/:id");
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(resolve_app("/nope").page, PageKind::NotFound);
        assert_eq!(resolve_app("/events/E1/extra").page, PageKind::NotFound);
        assert_eq!(resolve(&[], "/events").page, PageKind::NotFound);
    }

    #[test]
    fn test_flatten_expands_groups_in_place() {
        let entries = vec![
            RouteEntry::Leaf(AppRoute::new("/", PageKind::Dashboard)),
            RouteEntry::Group(AppRouteGroup {
                label: "Records",
                routes: vec![
                    AppRoute::new("/events", PageKind::Events).labelled("Events"),
                    AppRoute::new("/events/:id", PageKind::Event),
                ],
                default_expanded: None,
                divider: true,
            }),
            RouteEntry::Leaf(AppRoute::new("/help", PageKind::Help)),
        ];

        let paths: Vec<&str> = flatten_routes(&entries).iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/", "/events", "/events/:id", "/help"]);
        assert_eq!(resolve(&entries, "/events/7").page, PageKind::Event);
    }

    #[test]
    fn test_route_activity() {
        assert!(is_route_active("/", "/"));
        assert!(!is_route_active("/", "/events"));
        assert!(is_route_active("/events", "/events/E1"));
        assert!(!is_route_active("/events", "/generations"));
        assert!(is_route_active("/events", "/events"));
        assert!(!is_route_active("/events", "/eventsX"));
        assert!(!is_route_active("/manifests", "/manifests-archive/M1"));
    }

    #[test]
    fn test_captured_ids_are_percent_decoded() {
        assert_eq!(resolve_app("/events/a%20b").id.as_deref(), Some("a b"));
        assert_eq!(
            resolve_app("/manifests/sha256%3Aabc").id.as_deref(),
            Some("sha256:abc")
        );
        assert_eq!(resolve_app("/events/a+b").id.as_deref(), Some("a+b"));
        assert_eq!(resolve_app("/events/%FF").id.as_deref(), Some("%FF"));
    }

    #[test]
    fn test_navigation_items() {
        let nav = navigation(&app_routes(), "/generations/G1");
        let labels: Vec<String> = nav
            .iter()
            .map(|item| match item {
                NavItem::Link(link) => link.label.clone(),
                NavItem::Group { label, .. } => label.clone(),
                NavItem::Divider => "---".to_string(),
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Dashboard",
                "---",
                "Events",
                "Generations",
                "Enhancements",
                "Manifests",
                "---",
                "Help"
            ]
        );

        let active: Vec<&str> = nav
            .iter()
            .filter_map(|item| match item {
                NavItem::Link(link) if link.active => Some(link.label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(active, vec!["Generations"]);
    }

    #[test]
    fn test_navigation_group_expansion() {
        let entries = vec![RouteEntry::Group(AppRouteGroup {
            label: "Records",
            routes: vec![AppRoute::new("/events", PageKind::Events).labelled("Events")],
            default_expanded: None,
            divider: false,
        })];

        let expanded = |path: &str| match &navigation(&entries, path)[0] {
            NavItem::Group { expanded, .. } => *expanded,
            other => panic!("expected group, got {:?}", other),
        };
        assert!(expanded("/events"));
        assert!(!expanded("/help"));
    }

    #[test]
    fn test_location_parse_and_display() {
        let location = Location::parse("/events/?page=2&pageSize=20#top");
        assert_eq!(location.path, "/events");
        assert_eq!(location.query, "page=2&pageSize=20");
        assert_eq!(location.to_string(), "/events?page=2&pageSize=20");

        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("generations").path, "/generations");
        assert_eq!(Location::parse("/help").to_string(), "/help");
    }
}
