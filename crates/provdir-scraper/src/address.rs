//! Splitting `"street, city, ST 12345"` address text into components.

use provdir_core::ParsedAddress;

/// Splits `full_address` on commas into street, city, and a state/zip
/// segment, the last further split on whitespace.
///
/// Components absent from the input are left empty; segments after the
/// third comma-separated one are ignored. Never fails.
#[must_use]
pub fn parse_address(full_address: &str) -> ParsedAddress {
    let mut segments = full_address.split(',');
    let street = segments.next().unwrap_or_default().trim().to_string();
    let city = segments.next().unwrap_or_default().trim().to_string();

    let mut state_zip = segments.next().unwrap_or_default().split_whitespace();
    let state_code = state_zip.next().unwrap_or_default().to_string();
    let zip_code = state_zip.next().unwrap_or_default().to_string();

    ParsedAddress {
        street,
        city,
        state_code,
        zip_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(a: &ParsedAddress) -> [&str; 4] {
        [&a.street, &a.city, &a.state_code, &a.zip_code]
    }

    #[test]
    fn full_address_splits_into_four_fields() {
        let a = parse_address("1200 Main St Suite 4, Austin, TX 78701");
        assert_eq!(fields(&a), ["1200 Main St Suite 4", "Austin", "TX", "78701"]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let a = parse_address("  9 Elm Rd ,   Dallas ,  TX   75201  ");
        assert_eq!(fields(&a), ["9 Elm Rd", "Dallas", "TX", "75201"]);
    }

    #[test]
    fn missing_zip_is_empty() {
        let a = parse_address("9 Elm Rd, Dallas, TX");
        assert_eq!(fields(&a), ["9 Elm Rd", "Dallas", "TX", ""]);
    }

    #[test]
    fn two_segments_leave_state_and_zip_empty() {
        let a = parse_address("9 Elm Rd, Dallas");
        assert_eq!(fields(&a), ["9 Elm Rd", "Dallas", "", ""]);
    }

    #[test]
    fn single_segment_is_street_only() {
        let a = parse_address("PO Box 12");
        assert_eq!(fields(&a), ["PO Box 12", "", "", ""]);
    }

    #[test]
    fn empty_input_yields_all_empty() {
        assert_eq!(parse_address(""), ParsedAddress::default());
        assert_eq!(parse_address(" , , "), ParsedAddress::default());
    }

    #[test]
    fn extra_segments_are_ignored() {
        let a = parse_address("1 A St, Reno, NV 89501, USA");
        assert_eq!(fields(&a), ["1 A St", "Reno", "NV", "89501"]);
    }

    #[test]
    fn zip_plus_four_is_kept_whole() {
        let a = parse_address("1 A St, Reno, NV 89501-1234 extra");
        assert_eq!(a.zip_code, "89501-1234");
    }
}
