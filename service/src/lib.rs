mod auth;
mod bookings;
mod breadcrumbs;
mod client;
mod error;
mod fallback;
mod properties;
pub mod render;
mod state;

use abi::Config;
use tracing::{debug, warn};

pub use auth::AuthService;
pub use bookings::{BookingService, BookingSource};
pub use breadcrumbs::{match_route, Breadcrumb, EntityData, LabelResolver, RouteParams, RouteTable};
pub use client::ApiClient;
pub use error::Error;
pub use fallback::{DegradedReason, Fetched, FallbackBookings};
pub use properties::{PropertyService, PropertySource};
pub use state::{AppState, AuthState};

/// Booking reads for the calendar: the REST service wrapped in the degraded
/// mode fallback, with fixtures when the config names a fixture file.
pub fn calendar_bookings(
    config: &Config,
    state: &AppState,
) -> Result<FallbackBookings<BookingService>, Error> {
    if !state.auth.is_authenticated() {
        debug!("no stored session, bookings are requested without a token");
    }
    let client = ApiClient::new(&config.api)?.with_token(state.auth.token.clone());
    let bookings = FallbackBookings::new(BookingService::new(client));
    let fixtures = match config.fallback.fixtures_path() {
        Some(path) => FallbackBookings::<BookingService>::load_fixtures(&path).unwrap_or_else(|e| {
            warn!("cannot load fixtures from {}: {}", path.display(), e);
            Vec::new()
        }),
        None => Vec::new(),
    };
    Ok(bookings.with_fixtures(fixtures))
}
