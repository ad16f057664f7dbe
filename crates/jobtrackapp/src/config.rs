//! # Configuration
//!
//! Tracker configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `JOBTRACK__TABLE_NAME`, `JOBTRACK__CORS_ORIGIN`, etc.
//! 2. **Data directory config**: `<data>/jobtrack.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `table_name` | `application-tracker-main` | Table name, also the table file stem |
//! | `partition_key` | `userId` | Attribute holding the owning user |
//! | `sort_key` | `applicationId` | Attribute identifying the record |
//! | `application_prefix` | `app#` | Sort-key prefix of application records |
//! | `profile_sort_key` | `profile` | Sort key of the profile record |
//! | `cors_origin` | `*` | `Access-Control-Allow-Origin` on every response |

use crate::store::KeySchema;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the tracker, stored in `jobtrack.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Table name. The local table file is `<data>/<table_name>.json`.
    #[config(default = "application-tracker-main")]
    pub table_name: String,

    /// Partition key attribute, identifies the owning user.
    #[config(default = "userId")]
    pub partition_key: String,

    /// Sort key attribute, identifies the record within a user.
    #[config(default = "applicationId")]
    pub sort_key: String,

    /// Prefix for generated application sort keys.
    #[config(default = "app#")]
    pub application_prefix: String,

    /// Sort key reserved for the profile record.
    #[config(default = "profile")]
    pub profile_sort_key: String,

    /// Allowed CORS origin.
    #[config(default = "*")]
    pub cors_origin: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            table_name: "application-tracker-main".to_string(),
            partition_key: "userId".to_string(),
            sort_key: "applicationId".to_string(),
            application_prefix: "app#".to_string(),
            profile_sort_key: "profile".to_string(),
            cors_origin: "*".to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn key_schema(&self) -> KeySchema {
        KeySchema::new(&self.partition_key, &self.sort_key)
    }

    pub fn table_file(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.json", self.table_name))
    }

    /// True if `id` names the profile record, ignoring case.
    pub fn is_profile_key(&self, id: &str) -> bool {
        id.eq_ignore_ascii_case(&self.profile_sort_key)
    }
}
