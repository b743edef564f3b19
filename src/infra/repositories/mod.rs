/// Substring pattern for `LIKE`/`ILIKE ... ESCAPE '\\'` that matches `value` literally.
pub fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub mod sqlite_booking_repo;
pub mod sqlite_hotel_repo;
pub mod sqlite_room_repo;
pub mod sqlite_user_repo;

pub mod postgres_booking_repo;
pub mod postgres_hotel_repo;
pub mod postgres_room_repo;
pub mod postgres_user_repo;

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Lisbon"), "%Lisbon%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }
}
