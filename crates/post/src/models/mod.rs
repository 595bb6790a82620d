mod category;
mod metadata;
mod raw;
mod timestamp;

pub use self::category::CategorySet;
pub use self::metadata::Metadata;
pub use self::raw::RawPost;
pub(crate) use self::raw::coerce_int;
pub use self::timestamp::{Timestamp, parse_naive};
