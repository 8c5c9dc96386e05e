// Output formatting — terminal display for scan reports and lookups.

pub mod terminal;
