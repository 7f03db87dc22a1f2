pub mod config;
pub mod error;
pub mod fetch;
pub mod media;
pub mod process;
pub mod records;
pub mod sheet;

pub use config::SheetConfig;
pub use error::{MediaError, SheetError};
pub use records::{FieldValue, Record};
pub use sheet::{fetch_records, SheetClient, SheetRequest};
