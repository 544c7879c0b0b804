use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column order of the bookings worksheet.
pub const HEADER: [&str; 9] = [
    "booking_id",
    "name",
    "check_in",
    "check_out",
    "guests",
    "room_type",
    "contact",
    "status",
    "created_at",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub booking_id: String,
    pub name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: String,
    pub room_type: String,
    pub contact: String,
    pub status: BookingStatus,
    pub created_at: String,
}

impl Booking {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.booking_id.clone(),
            self.name.clone(),
            format_date(&self.check_in),
            format_date(&self.check_out),
            self.guests.clone(),
            self.room_type.clone(),
            self.contact.clone(),
            self.status.as_str().to_string(),
            self.created_at.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Pending => "PENDING",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Case-insensitive. Unknown or blank cells map to `None`, which never
    /// blocks availability.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "PENDING" => Some(BookingStatus::Pending),
            "CANCELLED" | "CANCELED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// A stay as a half-open interval: the check-out night is not occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayInterval {
    pub fn overlaps(&self, other: &StayInterval) -> bool {
        !(self.check_out <= other.check_in || self.check_in >= other.check_out)
    }
}

/// A worksheet row as read back from the store. Cells are kept as text since
/// rows may have been edited by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredBooking {
    pub booking_id: String,
    pub name: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub room_type: String,
    pub contact: String,
    pub status: String,
    pub created_at: String,
}

impl StoredBooking {
    /// Short rows are padded with empty cells; extra cells are ignored.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            booking_id: cell(0),
            name: cell(1),
            check_in: cell(2),
            check_out: cell(3),
            guests: cell(4),
            room_type: cell(5),
            contact: cell(6),
            status: cell(7),
            created_at: cell(8),
        }
    }

    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::parse(&self.status)
    }

    /// The interval this row holds against new stays, if any. Only confirmed
    /// rows whose dates read back as ISO dates occupy the room pool.
    pub fn occupied(&self) -> Option<StayInterval> {
        if self.status() != Some(BookingStatus::Confirmed) {
            return None;
        }
        let check_in = parse_stored_date(&self.check_in)?;
        let check_out = parse_stored_date(&self.check_out)?;
        Some(StayInterval {
            check_in,
            check_out,
        })
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn stay(a: &str, b: &str) -> StayInterval {
        StayInterval {
            check_in: d(a),
            check_out: d(b),
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_overlap_half_open() {
        let existing = stay("2025-10-10", "2025-10-15");
        assert!(stay("2025-10-12", "2025-10-14").overlaps(&existing));
        assert!(stay("2025-10-08", "2025-10-11").overlaps(&existing));
        assert!(stay("2025-10-01", "2025-10-30").overlaps(&existing));
        assert!(!stay("2025-10-15", "2025-10-20").overlaps(&existing));
        assert!(!stay("2025-10-05", "2025-10-10").overlaps(&existing));
    }

    #[test]
    fn test_to_row_matches_header() {
        let booking = Booking {
            booking_id: "abc".to_string(),
            name: "Asha".to_string(),
            check_in: d("2025-10-15"),
            check_out: d("2025-10-20"),
            guests: "2".to_string(),
            room_type: "deluxe".to_string(),
            contact: "+919800000000".to_string(),
            status: BookingStatus::Confirmed,
            created_at: "2025-10-01T10:00:00.000000Z".to_string(),
        };
        let cells = booking.to_row();
        assert_eq!(cells.len(), HEADER.len());
        assert_eq!(cells[2], "2025-10-15");
        assert_eq!(cells[3], "2025-10-20");
        assert_eq!(cells[7], "CONFIRMED");

        let stored = StoredBooking::from_row(&cells);
        assert_eq!(stored.occupied(), Some(stay("2025-10-15", "2025-10-20")));
    }

    #[test]
    fn test_short_row_is_padded() {
        let stored = StoredBooking::from_row(&row(&["id-1", "Ravi", "2025-10-10"]));
        assert_eq!(stored.check_in, "2025-10-10");
        assert_eq!(stored.check_out, "");
        assert_eq!(stored.status, "");
        assert!(stored.occupied().is_none());
    }

    #[test]
    fn test_status_case_insensitive() {
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse(" Confirmed "), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("CANCELLED"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse(""), None);
        assert_eq!(BookingStatus::parse("tentative"), None);
    }

    #[test]
    fn test_non_confirmed_rows_do_not_occupy() {
        let cancelled = StoredBooking::from_row(&row(&[
            "id", "Ravi", "2025-10-10", "2025-10-15", "", "", "", "CANCELLED", "",
        ]));
        assert!(cancelled.occupied().is_none());

        let blank = StoredBooking::from_row(&row(&[
            "id", "Ravi", "2025-10-10", "2025-10-15", "", "", "", "", "",
        ]));
        assert!(blank.occupied().is_none());
    }

    #[test]
    fn test_unparseable_dates_do_not_occupy() {
        let stored = StoredBooking::from_row(&row(&[
            "id", "Ravi", "10/10/2025", "next week", "", "", "", "CONFIRMED", "",
        ]));
        assert!(stored.occupied().is_none());
    }
}
