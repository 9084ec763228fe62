/// Defaults shared by the request builder, parser and CLI.

// RepeaterBook endpoints
pub const DEFAULT_BASE_URL: &str = "https://www.repeaterbook.com/repeaters/Display_SS.php";
pub const DEFAULT_COUNTRY_CODE: &str = "US";

// Filters the display page accepts but we never narrow
pub const WILDCARD: &str = "%";

// Page structure
pub const FREQUENCY_TABLE_CLASS: &str = "w3-table sortable w3-responsive w3-striped";
/// Title RepeaterBook serves when a query matches no region. A populated
/// page reads "{STATE} Amateur Radio Repeaters".
pub const NOT_FOUND_TITLE: &str = "Amateur Radio Repeaters";

// Local paths
pub const DEFAULT_REGIONS_FILE: &str = "data_deps/states.tsv";
pub const DEFAULT_OUTPUT_DIR: &str = "repeater_data";

pub const USER_AGENT: &str = concat!("repeater_scraper/", env!("CARGO_PKG_VERSION"));
