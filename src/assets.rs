use std::sync::Arc;

pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod prepared;
pub(crate) mod raster;

/// Raster ready for compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}
