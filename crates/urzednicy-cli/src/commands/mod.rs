//! Command implementations.

pub mod date;
pub mod import;
pub mod profile;

pub use self::date::execute_date;
pub use self::import::execute_import;
pub use self::profile::execute_profile;
