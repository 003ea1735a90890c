use serde::{Deserialize, Serialize};

use crate::{Booking, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}

impl PaginationMeta {
    /// Meta for a complete, single-page result.
    pub fn single_page(total: usize, limit: u32, offset: u32) -> Self {
        Self {
            total: total as u64,
            limit,
            offset,
            has_more: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookingsResponse {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub pagination: PaginationMeta,
}

/// Offset based page cursor for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    limit: u32,
    offset: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A zero limit falls back to the default page size.
    pub fn new(limit: u32) -> Self {
        Self {
            limit: if limit == 0 { DEFAULT_PAGE_SIZE } else { limit },
            offset: 0,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// 1-based
    pub fn current_page(&self) -> u32 {
        self.offset / self.limit + 1
    }

    /// Pages below 1 are treated as page 1.
    pub fn go_to_page(&mut self, page: u32) {
        self.offset = page.saturating_sub(1).saturating_mul(self.limit);
    }

    pub fn next_page(&mut self) {
        self.offset = self.offset.saturating_add(self.limit);
    }

    pub fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(self.limit);
    }

    /// Changing the page size goes back to the first page.
    pub fn set_page_size(&mut self, limit: u32) {
        *self = Self::new(limit);
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self, meta: &PaginationMeta) -> bool {
        meta.has_more
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_should_walk_pages() {
        let mut pager = Pager::new(20);
        assert_eq!(pager.current_page(), 1);
        assert!(!pager.has_prev());

        pager.next_page();
        pager.next_page();
        assert_eq!(pager.offset(), 40);
        assert_eq!(pager.current_page(), 3);

        pager.prev_page();
        assert_eq!(pager.current_page(), 2);

        pager.go_to_page(5);
        assert_eq!(pager.offset(), 80);

        pager.go_to_page(0);
        assert_eq!(pager.offset(), 0);
        pager.prev_page();
        assert_eq!(pager.offset(), 0);
    }

    #[test]
    fn set_page_size_resets_offset() {
        let mut pager = Pager::default();
        pager.next_page();
        pager.set_page_size(10);
        assert_eq!(pager.limit(), 10);
        assert_eq!(pager.offset(), 0);
        pager.set_page_size(0);
        assert_eq!(pager.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn response_should_deserialize() {
        let json = r#"{"bookings":[],"pagination":{"total":0,"limit":50,"offset":0,"hasMore":false}}"#;
        let resp: BookingsResponse = serde_json::from_str(json).unwrap();
        assert!(resp.bookings.is_empty());
        assert!(!Pager::default().has_next(&resp.pagination));
    }

    #[test]
    fn one_malformed_booking_does_not_sink_the_page() {
        let json = r#"{
            "bookings": [
                {"id": "good", "propertyId": "p1", "guestName": "Ada",
                 "checkInDate": "2024-03-10", "checkOutDate": "2024-03-13", "totalAmount": 545},
                {"id": "bad", "propertyId": "p1", "guestName": "Bob",
                 "checkInDate": null, "checkOutDate": 7, "totalAmount": null}
            ],
            "pagination": {"total": 2, "limit": 50, "offset": 0, "hasMore": false}
        }"#;
        let resp: BookingsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.bookings.len(), 2);
        assert_eq!(resp.bookings[0].nights().unwrap(), 3);
        assert!(resp.bookings[1].stay().is_err());
        assert_eq!(resp.bookings[1].total_amount, 0.0);
    }
}
