//! Viewport breakpoints. Maps a viewport width onto a column-count bucket.

/// Widths up to and including this value get a single column.
pub const MOBILE_MAX_WIDTH: u32 = 600;
/// Widths up to and including this value (and above mobile) get two columns.
pub const TABLET_MAX_WIDTH: u32 = 900;

pub const MOBILE_COLUMNS: usize = 1;
pub const TABLET_COLUMNS: usize = 2;
pub const DESKTOP_COLUMNS: usize = 4;

/// Returns the number of grid columns for a viewport `width` in CSS pixels.
pub fn column_count_for_width(width: u32) -> usize {
    if width <= MOBILE_MAX_WIDTH {
        MOBILE_COLUMNS
    } else if width <= TABLET_MAX_WIDTH {
        TABLET_COLUMNS
    } else {
        DESKTOP_COLUMNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_bucket_is_inclusive() {
        assert_eq!(column_count_for_width(0), 1);
        assert_eq!(column_count_for_width(600), 1);
    }

    #[test]
    fn test_tablet_bucket() {
        assert_eq!(column_count_for_width(601), 2);
        assert_eq!(column_count_for_width(900), 2);
    }

    #[test]
    fn test_desktop_bucket() {
        assert_eq!(column_count_for_width(901), 4);
        assert_eq!(column_count_for_width(2560), 4);
    }
}
