use crate::spreadsheet::range::Range;
use crate::spreadsheet::range::SheetRange;

/// Column linking a record to the persona that owns it.
pub const OWNER_COLUMN: &str = "persona_id";

/// Static description of one dashboard table.
#[derive(Copy, Clone, Debug)]
pub struct TableSchema {
    /// Sheet title
    pub name: &'static str,
    /// Column used to address a single record
    pub key: &'static str,
    /// Declared column order used when appending; empty when the sheet header alone defines it
    pub columns: &'static [&'static str],
}

impl TableSchema {
    /// Range covering the declared columns (`Personas!A:J`), or the whole sheet
    /// when no columns are declared.
    pub fn range(&self) -> String {
        match self.columns.len() {
            0 => SheetRange::whole(self.name).to_string(),
            width => SheetRange::new(self.name, Range {
                col_lower_bound: Some(0),
                col_upper_bound: Some(width - 1),
                ..Range::default()
            })
            .to_string(),
        }
    }
}

// Main spreadsheet

pub const PERSONAS: TableSchema = TableSchema {
    name: "Personas",
    key: "persona_id",
    columns: &[
        "persona_id",
        "name",
        "tagline",
        "backstory",
        "traits",
        "ethics_guidelines",
        "brand_colors",
        "status",
        "created_at",
        "updated_at",
    ],
};

pub const PERSONA_PROFILES: TableSchema = TableSchema {
    name: "Persona_Profiles",
    key: "persona_id",
    columns: &["persona_id", "profile_json", "updated_at"],
};

pub const VOICE_PROFILES: TableSchema = TableSchema {
    name: "Voice_Profiles",
    key: "persona_id",
    columns: &[],
};

pub const SOCIAL_ACCOUNTS: TableSchema = TableSchema {
    name: "Social_Accounts",
    key: "persona_id",
    columns: &[],
};

pub const PLATFORM_ACCOUNTS: TableSchema = TableSchema {
    name: "Platform_Accounts",
    key: "account_id",
    columns: &[
        "account_id",
        "persona_id",
        "platform",
        "email",
        "handle",
        "password_ref",
        "gologin_profile_id",
        "proxy_region",
        "status",
        "warmup_day",
        "created_at",
        "notes",
    ],
};

pub const CONTENT_CALENDAR: TableSchema = TableSchema {
    name: "Content_Calendar",
    key: "slot_id",
    columns: &[
        "slot_id",
        "persona_id",
        "scheduled_date",
        "scheduled_time",
        "platform",
        "content_type",
        "title",
        "description",
        "asset_ids",
        "status",
        "publish_url",
        "notes",
    ],
};

pub const JOB_QUEUE: TableSchema = TableSchema {
    name: "Job_Queue",
    key: "job_id",
    columns: &[
        "job_id",
        "persona_id",
        "job_type",
        "priority",
        "status",
        "scheduled_for",
        "parameters",
        "created_at",
        "started_at",
        "completed_at",
        "result",
        "error",
    ],
};

// Assets spreadsheet

pub const LORA_TRAINING: TableSchema = TableSchema {
    name: "LoRA_Training",
    key: "image_id",
    columns: &[
        "image_id",
        "persona_id",
        "bucket",
        "prompt",
        "caption",
        "drive_url",
        "drive_file_id",
        "version_target",
        "status",
        "score_identity",
        "score_style",
        "notes",
        "created_at",
    ],
};

pub const GENERATED_CONTENT: TableSchema = TableSchema {
    name: "Generated_Content",
    key: "content_id",
    columns: &[
        "content_id",
        "persona_id",
        "content_type",
        "prompt",
        "drive_url",
        "drive_file_id",
        "platform",
        "calendar_slot_id",
        "status",
        "created_at",
        "notes",
    ],
};

pub const ASSETS_INDEX: TableSchema = TableSchema {
    name: "Assets_Index",
    key: "asset_id",
    columns: &[],
};
