use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gci::header::{BannerFormat, Permissions};

/// Read-only summary of an opened save file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub game_code: String,
    pub maker_code: String,
    pub filename: String,
    pub modified_at: DateTime<Utc>,
    pub banner_format: BannerFormat,
    pub permissions: Permissions,
    pub copy_counter: u8,
    pub first_block: u16,
    pub block_count: u16,
    pub game_name: String,
    pub file_info: String,
    pub has_banner: bool,
}
