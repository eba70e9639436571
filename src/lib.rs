pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::bills_pipeline::BillsPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, vendor::VendorProfile};
pub use core::etl::EtlEngine;
pub use domain::model::{BillRecord, Credentials, TransformResult};
pub use utils::error::{EtlError, Result};
