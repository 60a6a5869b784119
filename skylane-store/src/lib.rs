pub mod app_config;
pub mod codec;
pub mod pii;
pub mod record;
pub mod table;

pub use app_config::{AdminConfig, Config, StorageConfig};
pub use codec::{FieldReader, FieldWriter};
pub use pii::Masked;
pub use record::{DecodeError, Record};
pub use table::{StoreError, Table, TableScan};
