pub mod engine;
pub mod inspect;
pub mod report;
pub mod traverse;

pub use crate::domain::model::{
    DirectoryListing, LevelOfDetail, ServiceDescriptor, ServiceRef, TileInfo, TiledServiceRecord,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher};
pub use crate::utils::error::Result;
