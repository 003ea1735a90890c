use std::{collections::BTreeMap, fmt};

use abi::{Booking, Property};

pub type RouteParams = BTreeMap<String, String>;

/// Builds an entity-aware label from route params and data the caller has
/// already fetched. Resolvers never fetch anything themselves.
pub type LabelResolver = fn(&RouteParams, &EntityData<'_>) -> String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// `None` for the current page
    pub href: Option<String>,
    pub is_current_page: bool,
}

/// Entities available to label resolvers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityData<'a> {
    pub properties: &'a [Property],
    pub booking: Option<&'a Booking>,
}

#[derive(Clone)]
struct Route {
    pattern: &'static str,
    label: &'static str,
    resolve: Option<LabelResolver>,
}

/// Route pattern to label lookup. Patterns use `:name` segments for params.
#[derive(Clone)]
pub struct RouteTable {
    root_label: String,
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
            routes: Vec::new(),
        }
    }

    pub fn route(mut self, pattern: &'static str, label: &'static str) -> Self {
        self.routes.push(Route {
            pattern,
            label,
            resolve: None,
        });
        self
    }

    pub fn dynamic(
        mut self,
        pattern: &'static str,
        label: &'static str,
        resolve: LabelResolver,
    ) -> Self {
        self.routes.push(Route {
            pattern,
            label,
            resolve: Some(resolve),
        });
        self
    }

    /// Routes of the admin console.
    pub fn admin_console() -> Self {
        Self::new("Rentopia")
            .route("/", "Home")
            .route("/dashboard", "Dashboard")
            .route("/dashboard/bookings", "Bookings")
            .route("/admin", "Admin")
            .route("/admin/properties", "Properties")
            .route("/admin/properties/add", "Add Property")
            .route("/admin/properties/settings", "Property Settings")
            .route("/admin/bookings", "Bookings")
            .route("/admin/bookings/add", "Add Booking")
            .route("/admin/service-providers", "Service Providers")
            .route("/admin/settings", "Settings")
            .dynamic("/admin/properties/:id", "Property Details", property_label)
            .dynamic("/admin/properties/:id/edit", "Edit Property", edit_property_label)
            .dynamic("/admin/bookings/:id", "Booking Details", booking_label)
            .dynamic("/admin/bookings/:id/edit", "Edit Booking", edit_booking_label)
            .route("/auth", "Authentication")
            .route("/auth/login", "Login")
            .route("/auth/register", "Register")
            .route("/empty-state", "Getting Started")
    }

    /// Trail from the root to `pathname`. Exact patterns win over `:param`
    /// patterns; unknown segments are capitalised.
    pub fn breadcrumbs(&self, pathname: &str, data: &EntityData<'_>) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: self.root_label.clone(),
            href: Some("/".to_string()),
            is_current_page: false,
        }];

        let segments: Vec<&str> = split(pathname).collect();
        let mut current = String::new();
        for (i, segment) in segments.iter().enumerate() {
            current.push('/');
            current.push_str(segment);
            let is_last = i + 1 == segments.len();

            crumbs.push(Breadcrumb {
                label: self.label_for(&current, segment, data),
                href: if is_last { None } else { Some(current.clone()) },
                is_current_page: is_last,
            });
        }
        crumbs
    }

    fn label_for(&self, path: &str, segment: &str, data: &EntityData<'_>) -> String {
        if let Some(route) = self.routes.iter().find(|r| r.pattern == path) {
            return route.label.to_string();
        }
        for route in &self.routes {
            if let Some(params) = match_route(path, route.pattern) {
                return match route.resolve {
                    Some(resolve) => resolve(&params, data),
                    None => route.label.to_string(),
                };
            }
        }
        capitalize(segment)
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("root_label", &self.root_label)
            .field("patterns", &self.routes.iter().map(|r| r.pattern).collect::<Vec<_>>())
            .finish()
    }
}

/// Params of `path` under `pattern`, if it matches.
pub fn match_route(path: &str, pattern: &str) -> Option<RouteParams> {
    let path: Vec<&str> = split(path).collect();
    let pattern: Vec<&str> = split(pattern).collect();
    if path.len() != pattern.len() {
        return None;
    }
    let mut params = RouteParams::new();
    for (seg, pat) in path.iter().zip(&pattern) {
        match pat.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), seg.to_string());
            }
            None if pat == seg => {}
            None => return None,
        }
    }
    Some(params)
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn param<'p>(params: &'p RouteParams) -> &'p str {
    params.get("id").map(String::as_str).unwrap_or_default()
}

fn find_property<'a>(params: &RouteParams, data: &EntityData<'a>) -> Option<&'a Property> {
    let id = param(params);
    data.properties.iter().find(|p| p.id == id)
}

fn find_booking<'a>(params: &RouteParams, data: &EntityData<'a>) -> Option<&'a Booking> {
    data.booking.filter(|b| b.id == param(params))
}

fn property_label(params: &RouteParams, data: &EntityData<'_>) -> String {
    match find_property(params, data) {
        Some(property) => property.name.clone(),
        None => format!("Property {}", param(params)),
    }
}

fn edit_property_label(params: &RouteParams, data: &EntityData<'_>) -> String {
    match find_property(params, data) {
        Some(property) => format!("Edit {}", property.name),
        None => format!("Edit Property {}", param(params)),
    }
}

fn booking_label(params: &RouteParams, data: &EntityData<'_>) -> String {
    match find_booking(params, data) {
        Some(booking) => format!("Booking - {}", booking.guest_name),
        None => format!("Booking {}", param(params)),
    }
}

fn edit_booking_label(params: &RouteParams, data: &EntityData<'_>) -> String {
    match find_booking(params, data) {
        Some(booking) => format!("Edit - {}", booking.guest_name),
        None => format!("Edit Booking {}", param(params)),
    }
}
