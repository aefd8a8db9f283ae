pub mod error;
pub mod formats;
pub mod fs;
pub mod mime;

pub use error::{ConverterError, ConverterResult};
pub use formats::OutputFormat;
pub use fs::{derive_output_name, format_size};
