/// Decimal precision for persisted numeric fields
pub const DECIMAL_PRECISION: u32 = 8;

/// Canonical date format used for the date key and ISO expirations
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Two-digit-year date format used by the compact vendor option notation
pub const COMPACT_DATE_FORMAT: &str = "%m/%d/%y";
