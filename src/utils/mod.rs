pub mod format;
pub mod paging;
