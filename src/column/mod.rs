pub mod decode;
pub mod encode;
pub mod types;

pub use decode::decode_column_value;
pub use encode::encode_column_value;
pub use types::{ColumnType, RawColumnValue};
