pub mod book;
pub mod detail;
pub mod mirror_link;

pub use book::BookRecord;
pub use detail::DetailFields;
pub use mirror_link::{MirrorLink, MirrorSource};
