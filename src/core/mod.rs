pub mod etl;
pub mod export;
pub mod fetcher;
pub mod normalizer;
pub mod pipeline;
pub mod presenter;

pub use crate::domain::model::{ClearanceRecord, RawItem, RunReport, StoreOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ProductSearch, Storage};
pub use crate::utils::error::Result;
