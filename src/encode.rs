pub(crate) mod png;

pub use self::png::{DPI, encode_png, output_file_name, write_atomic};
