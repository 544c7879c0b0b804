use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use tokio::sync::OnceCell;

use crate::errors::{BookingError, StoreError};
use crate::models::{Booking, BookingStatus, StayInterval, StoredBooking, HEADER};
use crate::services::dates::parse_date;
use crate::store::{BookingStore, ValueInputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    NotAvailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "AVAILABLE",
            Availability::NotAvailable => "NOT_AVAILABLE",
        }
    }
}

/// Guest details as relayed by the dialogue layer, dates still as spoken text.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub room_type: String,
    pub contact: String,
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn new(name: &str, check_in: &str, check_out: &str) -> Self {
        Self {
            name: name.to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            guests: String::new(),
            room_type: String::new(),
            contact: String::new(),
            status: BookingStatus::Confirmed,
        }
    }
}

/// Availability checks and booking creation over a single room pool.
///
/// `create_booking` does not re-check overlap: callers check availability
/// first, and two callers racing between the check and the append can both
/// book the same nights.
pub struct BookingEngine {
    store: Arc<dyn BookingStore>,
    table: String,
    timeout: Duration,
    provisioned: OnceCell<()>,
    reference_date: Option<NaiveDate>,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn BookingStore>, table: impl Into<String>, timeout: Duration) -> Self {
        Self {
            store,
            table: table.into(),
            timeout,
            provisioned: OnceCell::new(),
            reference_date: None,
        }
    }

    /// Pins "today" for relative dates such as "next Friday".
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Reference date for relative expressions.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn parse_stay(&self, check_in: &str, check_out: &str) -> Result<StayInterval, BookingError> {
        let today = self.today();
        let check_in = parse_date(check_in, today)?;
        let check_out = parse_date(check_out, today)?;

        if check_out <= check_in {
            return Err(BookingError::Validation(
                "check_out must be after check_in".to_string(),
            ));
        }
        Ok(StayInterval {
            check_in,
            check_out,
        })
    }

    async fn with_timeout<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }

    async fn provision(&self) -> Result<(), StoreError> {
        self.provisioned
            .get_or_try_init(|| async {
                self.with_timeout(self.store.ensure_table(&self.table, &HEADER))
                    .await
            })
            .await?;
        Ok(())
    }

    pub async fn check_availability(
        &self,
        check_in: &str,
        check_out: &str,
    ) -> Result<Availability, BookingError> {
        let candidate = self.parse_stay(check_in, check_out)?;

        self.provision().await?;
        let rows = self
            .with_timeout(self.store.read_all_rows(&self.table))
            .await?;

        if rows.len() <= 1 {
            return Ok(Availability::Available);
        }

        for row in &rows[1..] {
            let existing = StoredBooking::from_row(row);
            let Some(occupied) = existing.occupied() else {
                continue;
            };
            if candidate.overlaps(&occupied) {
                tracing::info!(
                    booking_id = %existing.booking_id,
                    check_in = %existing.check_in,
                    check_out = %existing.check_out,
                    "overlap found with existing booking"
                );
                return Ok(Availability::NotAvailable);
            }
        }

        Ok(Availability::Available)
    }

    pub async fn create_booking(&self, new: NewBooking) -> Result<Booking, BookingError> {
        let stay = self.parse_stay(&new.check_in, &new.check_out)?;

        let booking = Booking {
            booking_id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            check_in: stay.check_in,
            check_out: stay.check_out,
            guests: new.guests,
            room_type: new.room_type,
            contact: new.contact,
            status: new.status,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        self.provision().await?;
        self.with_timeout(self.store.append_row(
            &self.table,
            &booking.to_row(),
            ValueInputMode::UserEntered,
        ))
        .await?;

        tracing::info!(
            booking_id = %booking.booking_id,
            name = %booking.name,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            "appended booking"
        );

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::errors::DateParseError;
    use crate::store::memory::MemoryStore;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn engine_with(store: Arc<dyn BookingStore>) -> BookingEngine {
        BookingEngine::new(store, "bookings", Duration::from_secs(5))
            .with_reference_date(reference())
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn seeded(rows: &[&[&str]]) -> BookingEngine {
        let mut all = vec![row(&HEADER)];
        all.extend(rows.iter().map(|r| row(r)));
        engine_with(Arc::new(MemoryStore::with_rows("bookings", all)))
    }

    fn confirmed_oct_10_to_15() -> BookingEngine {
        seeded(&[&[
            "b-1", "Anil", "2025-10-10", "2025-10-15", "2", "deluxe", "", "CONFIRMED", "",
        ]])
    }

    #[tokio::test]
    async fn test_empty_store_is_available() {
        let engine = engine_with(Arc::new(MemoryStore::new()));
        let result = engine
            .check_availability("2025-10-10", "2025-10-12")
            .await
            .unwrap();
        assert_eq!(result, Availability::Available);
    }

    #[tokio::test]
    async fn test_first_access_writes_header() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_with(store.clone());
        engine
            .check_availability("2025-10-10", "2025-10-12")
            .await
            .unwrap();

        let rows = store.read_all_rows("bookings").await.unwrap();
        assert_eq!(rows, vec![row(&HEADER)]);
    }

    #[tokio::test]
    async fn test_overlap_is_not_available() {
        let engine = confirmed_oct_10_to_15();
        let result = engine
            .check_availability("2025-10-12", "2025-10-14")
            .await
            .unwrap();
        assert_eq!(result, Availability::NotAvailable);
    }

    #[tokio::test]
    async fn test_touching_boundaries_are_available() {
        let engine = confirmed_oct_10_to_15();
        let after = engine
            .check_availability("2025-10-15", "2025-10-20")
            .await
            .unwrap();
        let before = engine
            .check_availability("2025-10-05", "2025-10-10")
            .await
            .unwrap();
        assert_eq!(after, Availability::Available);
        assert_eq!(before, Availability::Available);
    }

    #[tokio::test]
    async fn test_zero_length_stay_is_rejected() {
        let engine = confirmed_oct_10_to_15();
        let err = engine
            .check_availability("2025-10-10", "2025-10-10")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        assert_eq!(err.to_string(), "check_out must be after check_in");
    }

    #[tokio::test]
    async fn test_reversed_stay_is_rejected() {
        let engine = engine_with(Arc::new(MemoryStore::new()));
        let err = engine
            .check_availability("2025-10-12", "2025-10-10")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_cancelled_rows_never_block() {
        let engine = seeded(&[
            &["b-1", "Anil", "2025-10-10", "2025-10-15", "", "", "", "CANCELLED", ""],
            &["b-2", "Sita", "2025-10-10", "2025-10-15", "", "", "", "", ""],
            &["b-3", "Ravi", "2025-10-10", "2025-10-15", "", "", "", "pending", ""],
        ]);
        let result = engine
            .check_availability("2025-10-11", "2025-10-13")
            .await
            .unwrap();
        assert_eq!(result, Availability::Available);
    }

    #[tokio::test]
    async fn test_lowercase_confirmed_blocks() {
        let engine = seeded(&[&[
            "b-1", "Anil", "2025-10-10", "2025-10-15", "", "", "", "confirmed", "",
        ]]);
        let result = engine
            .check_availability("2025-10-11", "2025-10-13")
            .await
            .unwrap();
        assert_eq!(result, Availability::NotAvailable);
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let engine = seeded(&[
            &["b-1", "Anil", "10/10/2025", "15/10/2025", "", "", "", "CONFIRMED", ""],
            &["b-2"],
            &[],
        ]);
        let result = engine
            .check_availability("2025-10-11", "2025-10-13")
            .await
            .unwrap();
        assert_eq!(result, Availability::Available);
    }

    #[tokio::test]
    async fn test_bad_date_text_is_a_parse_error() {
        let engine = engine_with(Arc::new(MemoryStore::new()));
        let err = engine
            .check_availability("someday", "2025-10-12")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::DateParse(DateParseError::Unrecognized(ref t)) if t == "someday"
        ));

        let err = engine.check_availability("2025-10-12", "").await.unwrap_err();
        assert!(matches!(err, BookingError::DateParse(DateParseError::Missing)));
    }

    #[tokio::test]
    async fn test_create_booking_appends_row() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_with(store.clone());

        let mut new = NewBooking::new("Priya", "15 October 2025", "20 October 2025");
        new.guests = "2".to_string();
        new.room_type = "suite".to_string();
        new.contact = "priya@example.com".to_string();
        let booking = engine.create_booking(new).await.unwrap();

        assert_eq!(booking.check_in, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
        assert_eq!(booking.check_out, NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(booking.created_at.ends_with('Z'));
        assert!(uuid::Uuid::parse_str(&booking.booking_id).is_ok());

        let rows = store.read_all_rows("bookings").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row(&HEADER));
        assert_eq!(rows[1], booking.to_row());
        assert_eq!(rows[1][2], "2025-10-15");
    }

    #[tokio::test]
    async fn test_create_booking_rejects_reversed_dates() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine_with(store.clone());
        let err = engine
            .create_booking(NewBooking::new("Priya", "2025-10-20", "2025-10-15"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        assert!(store.read_all_rows("bookings").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_booking_ids_are_unique() {
        let engine = engine_with(Arc::new(MemoryStore::new()));
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let booking = engine
                .create_booking(NewBooking::new("Guest", "2025-11-01", "2025-11-02"))
                .await
                .unwrap();
            assert!(ids.insert(booking.booking_id));
        }
    }

    #[tokio::test]
    async fn test_created_booking_blocks_same_range() {
        let engine = engine_with(Arc::new(MemoryStore::new()));
        engine
            .create_booking(NewBooking::new("Priya", "15 October 2025", "20 October 2025"))
            .await
            .unwrap();

        let same = engine
            .check_availability("15 October 2025", "20 October 2025")
            .await
            .unwrap();
        let disjoint = engine
            .check_availability("2025-11-01", "2025-11-03")
            .await
            .unwrap();
        assert_eq!(same, Availability::NotAvailable);
        assert_eq!(disjoint, Availability::Available);
    }

    #[tokio::test]
    async fn test_relative_dates_use_reference() {
        let engine = engine_with(Arc::new(MemoryStore::new()));
        let booking = engine
            .create_booking(NewBooking::new("Kabir", "kal", "parso"))
            .await
            .unwrap();
        assert_eq!(booking.check_in, NaiveDate::from_ymd_opt(2025, 10, 2).unwrap());
        assert_eq!(booking.check_out, NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
    }

    struct StalledStore;

    #[async_trait]
    impl BookingStore for StalledStore {
        async fn ensure_table(&self, _table: &str, _header: &[&str]) -> Result<(), StoreError> {
            std::future::pending().await
        }

        async fn read_all_rows(&self, _table: &str) -> Result<Vec<Vec<String>>, StoreError> {
            std::future::pending().await
        }

        async fn append_row(
            &self,
            _table: &str,
            _values: &[String],
            _mode: ValueInputMode,
        ) -> Result<(), StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_store_times_out() {
        let engine = BookingEngine::new(Arc::new(StalledStore), "bookings", Duration::from_millis(50))
            .with_reference_date(reference());
        let err = engine
            .check_availability("2025-10-10", "2025-10-12")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Store(StoreError::Timeout(_))));
    }

    /// Fails provisioning a set number of times, then behaves like an empty store.
    struct FlakyStore {
        failures_left: AtomicUsize,
        inner: MemoryStore,
    }

    #[async_trait]
    impl BookingStore for FlakyStore {
        async fn ensure_table(&self, table: &str, header: &[&str]) -> Result<(), StoreError> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(StoreError::Config("sheet unreachable".to_string()));
            }
            self.inner.ensure_table(table, header).await
        }

        async fn read_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
            self.inner.read_all_rows(table).await
        }

        async fn append_row(
            &self,
            table: &str,
            values: &[String],
            mode: ValueInputMode,
        ) -> Result<(), StoreError> {
            self.inner.append_row(table, values, mode).await
        }
    }

    #[tokio::test]
    async fn test_failed_provisioning_is_retried() {
        let engine = engine_with(Arc::new(FlakyStore {
            failures_left: AtomicUsize::new(1),
            inner: MemoryStore::new(),
        }));

        let first = engine.check_availability("2025-10-10", "2025-10-12").await;
        assert!(matches!(first, Err(BookingError::Store(StoreError::Config(_)))));

        let second = engine
            .check_availability("2025-10-10", "2025-10-12")
            .await
            .unwrap();
        assert_eq!(second, Availability::Available);
    }
}
