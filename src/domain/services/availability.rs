use chrono::{DateTime, Duration, Utc};
use crate::domain::models::booking::Booking;
use crate::domain::models::room::{Room, RoomView};
use crate::error::AppError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Half-open overlap test between an existing stay `[existing_in, existing_out)`
/// and a requested stay `[query_in, query_out)`. A stay that ends on the day
/// another begins does not overlap it.
///
/// Every repository query that counts conflicting bookings uses the same
/// condition: `check_in < :query_out AND check_out > :query_in`.
pub fn overlaps(
    existing_in: DateTime<Utc>,
    existing_out: DateTime<Utc>,
    query_in: DateTime<Utc>,
    query_out: DateTime<Utc>,
) -> bool {
    existing_in < query_out && existing_out > query_in
}

/// Number of non-cancelled bookings on `room_id` that overlap the window.
pub fn count_active_overlapping(
    bookings: &[Booking],
    room_id: &str,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> i64 {
    bookings
        .iter()
        .filter(|b| b.room_id == room_id && b.is_active())
        .filter(|b| overlaps(b.check_in, b.check_out, check_in, check_out))
        .count() as i64
}

/// Highest number of active bookings of `room_id` held at the same instant.
/// The maximum is always reached at some booking's check-in.
pub fn peak_concurrent(bookings: &[Booking], room_id: &str) -> i64 {
    let active: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.room_id == room_id && b.is_active())
        .collect();

    active
        .iter()
        .map(|start| {
            active
                .iter()
                .filter(|b| b.check_in <= start.check_in && b.check_out > start.check_in)
                .count() as i64
        })
        .max()
        .unwrap_or(0)
}

/// Free units of a room type. Zero or negative means not bookable.
pub fn available_slots(total_count: i32, active_overlapping: i64) -> i64 {
    total_count as i64 - active_overlapping
}

/// Whole nights billed for a stay, rounding partial days up.
pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Rejects empty or inverted stays and returns the night count otherwise.
pub fn validate_range(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<i64, AppError> {
    if check_out <= check_in {
        return Err(AppError::InvalidRange("Check-out must be after check-in".into()));
    }
    Ok(nights(check_in, check_out))
}

/// Window used for availability figures when the caller did not ask about specific dates.
pub fn default_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(1))
}

/// Projects rooms into views carrying their free slot count for the window.
/// `active_bookings` may contain bookings of other rooms or outside the window.
pub fn room_views(
    rooms: &[Room],
    active_bookings: &[Booking],
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Vec<RoomView> {
    rooms
        .iter()
        .map(|room| {
            let taken = count_active_overlapping(active_bookings, &room.id, check_in, check_out);
            RoomView::new(room, available_slots(room.total_count, taken))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::domain::models::booking::{BookingRequest, BookingStatus, NewBookingParams};
    use crate::domain::models::room::{NewRoomParams, RoomType};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    fn booking(room_id: &str, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Booking {
        Booking::new(NewBookingParams {
            request: BookingRequest {
                hotel_id: "h1".into(),
                room_id: room_id.into(),
                email: "guest@example.com".into(),
                full_name: "Guest".into(),
                phone: "555".into(),
                check_in,
                check_out,
                payment_method: None,
                payment_account_number: None,
                notes: None,
            },
            user_id: None,
            total_price: 0.0,
        })
    }

    #[test]
    fn test_overlap_is_half_open() {
        assert!(overlaps(day(2), day(5), day(4), day(6)));
        assert!(!overlaps(day(2), day(4), day(4), day(6)));
        assert!(!overlaps(day(6), day(8), day(4), day(6)));
        assert!(overlaps(day(1), day(10), day(4), day(6)));
        assert!(overlaps(day(4), day(6), day(4), day(6)));
    }

    #[test]
    fn test_cancelled_and_foreign_bookings_are_ignored() {
        let mut cancelled = booking("r1", day(2), day(5));
        cancelled.status = BookingStatus::Cancelled.as_str().to_string();

        let bookings = vec![
            booking("r1", day(2), day(5)),
            cancelled,
            booking("r2", day(2), day(5)),
            booking("r1", day(5), day(7)),
        ];

        assert_eq!(count_active_overlapping(&bookings, "r1", day(3), day(5)), 1);
        assert_eq!(count_active_overlapping(&bookings, "r1", day(4), day(6)), 2);
    }

    #[test]
    fn test_peak_concurrent_counts_simultaneous_stays() {
        let mut cancelled = booking("r1", day(1), day(9));
        cancelled.status = BookingStatus::Cancelled.as_str().to_string();

        let bookings = vec![
            booking("r1", day(1), day(3)),
            booking("r1", day(2), day(5)),
            booking("r1", day(3), day(6)),
            booking("r1", day(4), day(5)),
            booking("r2", day(4), day(5)),
            cancelled,
        ];

        // [2,5), [3,6) and [4,5) all hold day 4; [1,3) has ended by day 3.
        assert_eq!(peak_concurrent(&bookings, "r1"), 3);
        assert_eq!(peak_concurrent(&bookings, "r2"), 1);
        assert_eq!(peak_concurrent(&bookings, "r3"), 0);
    }

    #[test]
    fn test_peak_concurrent_back_to_back_stays() {
        let bookings = vec![booking("r1", day(1), day(3)), booking("r1", day(3), day(5))];
        assert_eq!(peak_concurrent(&bookings, "r1"), 1);
    }

    #[test]
    fn test_available_slots_can_go_negative() {
        assert_eq!(available_slots(3, 1), 2);
        assert_eq!(available_slots(1, 1), 0);
        assert_eq!(available_slots(1, 2), -1);
    }

    #[test]
    fn test_nights_round_up() {
        assert_eq!(nights(day(1), day(3)), 2);
        assert_eq!(nights(day(1), day(1) + Duration::hours(30)), 2);
        assert_eq!(nights(day(1), day(1) + Duration::hours(1)), 1);
        assert_eq!(nights(day(3), day(1)), 0);
    }

    #[test]
    fn test_validate_range_rejects_empty_stay() {
        assert!(matches!(validate_range(day(3), day(3)), Err(AppError::InvalidRange(_))));
        assert!(matches!(validate_range(day(4), day(3)), Err(AppError::InvalidRange(_))));
        assert_eq!(validate_range(day(1), day(3)).unwrap(), 2);
    }

    #[test]
    fn test_room_views_use_window() {
        let room = Room::new(NewRoomParams {
            hotel_id: "h1".into(),
            room_type: RoomType::Deluxe,
            description: None,
            price: 100.0,
            capacity: None,
            total_count: Some(2),
        });
        let bookings = vec![booking(&room.id, day(2), day(4))];

        let during = room_views(std::slice::from_ref(&room), &bookings, day(3), day(5));
        assert_eq!(during[0].available_slots, 1);
        assert_eq!(during[0].facilities, vec!["Wifi", "AC", "Parking", "Breakfast"]);

        let after = room_views(std::slice::from_ref(&room), &bookings, day(4), day(6));
        assert_eq!(after[0].available_slots, 2);
    }
}
