pub(crate) mod entities;
pub(crate) mod fonts;
pub(crate) mod format;
pub(crate) mod wrap;
