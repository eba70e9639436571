pub mod etl;
pub mod extractor;
pub mod html;
pub mod normalize;
pub mod session;

pub use crate::domain::model::{BillRecord, Credentials, RawListItem, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
