use abi::{Booking, BookingQuery, BookingsResponse, Pager};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::{ApiClient, Error};

const BOOKINGS: &str = "/bookings";

/// Where bookings come from. The REST backend in production, fakes in tests.
#[async_trait]
pub trait BookingSource: Send + Sync {
    /// one page of bookings matching the query
    async fn list(&self, query: &BookingQuery) -> Result<BookingsResponse, Error>;
    /// get booking by id
    async fn get(&self, id: &str) -> Result<Booking, Error>;
    /// create a booking, the backend assigns the id
    async fn create(&self, booking: &Booking) -> Result<Booking, Error>;
    /// replace a booking
    async fn update(&self, id: &str, booking: &Booking) -> Result<Booking, Error>;
    /// delete booking
    async fn delete(&self, id: &str) -> Result<(), Error>;

    /// Bookings of a property overlapping the month that contains `day`.
    async fn for_month(&self, property_id: &str, day: NaiveDate) -> Result<Vec<Booking>, Error> {
        let query = BookingQuery::for_month_of(property_id, day)?;
        Ok(self.list(&query).await?.bookings)
    }

    /// Walk every page of a query.
    async fn list_all(&self, query: &BookingQuery) -> Result<Vec<Booking>, Error> {
        let mut pager = Pager::new(query.limit);
        let mut all = Vec::new();
        loop {
            let page_query = BookingQuery {
                limit: pager.limit(),
                offset: pager.offset(),
                ..query.clone()
            };
            let page = self.list(&page_query).await?;
            let fetched = page.bookings.len();
            all.extend(page.bookings);
            if !pager.has_next(&page.pagination) || fetched == 0 {
                return Ok(all);
            }
            pager.next_page();
        }
    }
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    booking: Booking,
}

/// [`BookingSource`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct BookingService {
    client: ApiClient,
}

impl BookingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingSource for BookingService {
    async fn list(&self, query: &BookingQuery) -> Result<BookingsResponse, Error> {
        let pairs = query.to_query_pairs();
        info!("list bookings {:?}", pairs);
        self.client.get(BOOKINGS, &pairs).await
    }

    async fn get(&self, id: &str) -> Result<Booking, Error> {
        let envelope: BookingEnvelope = self
            .client
            .get(&format!("{}/{}", BOOKINGS, id), &[])
            .await?;
        Ok(envelope.booking)
    }

    async fn create(&self, booking: &Booking) -> Result<Booking, Error> {
        booking.validate()?;
        self.client.post(BOOKINGS, booking).await
    }

    async fn update(&self, id: &str, booking: &Booking) -> Result<Booking, Error> {
        booking.validate()?;
        self.client.put(&format!("{}/{}", BOOKINGS, id), booking).await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client.delete(&format!("{}/{}", BOOKINGS, id)).await
    }
}
