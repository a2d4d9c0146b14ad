use crate::backend::SheetsBackend;
use crate::dashboard::progress::bucket_progress;
use crate::dashboard::progress::BucketProgress;
use crate::dashboard::progress::TrainingImage;
use crate::dashboard::tables::ASSETS_INDEX;
use crate::dashboard::tables::GENERATED_CONTENT;
use crate::dashboard::tables::LORA_TRAINING;
use crate::dashboard::tables::OWNER_COLUMN;
use crate::dashboard::Dashboard;
use crate::database::record::Record;
use crate::database::record::Updates;
use crate::error::SheetStoreError;
use crate::helpers::clock::date;
use crate::helpers::clock::generate_id;

impl<B: SheetsBackend> Dashboard<B> {
    /// LoRA training images, optionally scoped to one persona.
    pub fn lora_images(&self, persona_id: Option<&str>) -> Result<Vec<Record>, SheetStoreError> {
        self.assets
            .list_where(&LORA_TRAINING.range(), OWNER_COLUMN, persona_id)
    }

    /// Adds a training image. Version target defaults to `v0.1`, status to `generated`.
    pub fn add_lora_image(&self, body: &Record) -> Result<Record, SheetStoreError> {
        let now = self.now();
        let image = Record::from_pairs([
            ("image_id", generate_id("img", now)),
            ("persona_id", body.value("persona_id").to_owned()),
            ("bucket", body.value("bucket").to_owned()),
            ("prompt", body.value("prompt").to_owned()),
            ("caption", body.value("caption").to_owned()),
            ("drive_url", body.value("drive_url").to_owned()),
            ("drive_file_id", body.value("drive_file_id").to_owned()),
            ("version_target", body.value_or("version_target", "v0.1")),
            ("status", body.value_or("status", "generated")),
            ("score_identity", body.value("score_identity").to_owned()),
            ("score_style", body.value("score_style").to_owned()),
            ("notes", body.value("notes").to_owned()),
            ("created_at", body.value_or("created_at", &date(now))),
        ]);
        self.assets
            .append_record(LORA_TRAINING.name, LORA_TRAINING.columns, &image)?;
        Ok(image)
    }

    pub fn update_lora_image(&self, image_id: &str, updates: &Updates) -> Result<(), SheetStoreError> {
        self.assets
            .update_by_key(LORA_TRAINING.name, LORA_TRAINING.key, image_id, updates)?;
        Ok(())
    }

    /// Sets the status of several images, one row at a time. Stops at the first
    /// failure; images already updated keep their new status.
    pub fn bulk_update_lora_status(&self, image_ids: &[&str], status: &str) -> Result<usize, SheetStoreError> {
        let updates = Updates::from([("status".to_owned(), status.to_owned())]);
        self.assets
            .update_many(LORA_TRAINING.name, LORA_TRAINING.key, image_ids, &updates)
    }

    /// Training progress of one persona across the fixed buckets.
    pub fn lora_progress(&self, persona_id: &str) -> Result<Vec<BucketProgress>, SheetStoreError> {
        let images = self
            .lora_images(Some(persona_id))?
            .iter()
            .map(TrainingImage::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bucket_progress(&images, persona_id))
    }

    /// Generated content, optionally scoped to one persona.
    pub fn generated_content(&self, persona_id: Option<&str>) -> Result<Vec<Record>, SheetStoreError> {
        self.assets
            .list_where(&GENERATED_CONTENT.range(), OWNER_COLUMN, persona_id)
    }

    pub fn add_generated_content(&self, body: &Record) -> Result<Record, SheetStoreError> {
        let now = self.now();
        let content = Record::from_pairs([
            ("content_id", generate_id("content", now)),
            ("persona_id", body.value("persona_id").to_owned()),
            ("content_type", body.value("content_type").to_owned()),
            ("prompt", body.value("prompt").to_owned()),
            ("drive_url", body.value("drive_url").to_owned()),
            ("drive_file_id", body.value("drive_file_id").to_owned()),
            ("platform", body.value("platform").to_owned()),
            ("calendar_slot_id", body.value("calendar_slot_id").to_owned()),
            ("status", body.value_or("status", "generated")),
            ("created_at", body.value_or("created_at", &date(now))),
            ("notes", body.value("notes").to_owned()),
        ]);
        self.assets
            .append_record(GENERATED_CONTENT.name, GENERATED_CONTENT.columns, &content)?;
        Ok(content)
    }

    pub fn assets_index(&self, persona_id: Option<&str>) -> Result<Vec<Record>, SheetStoreError> {
        self.assets
            .list_where(&ASSETS_INDEX.range(), OWNER_COLUMN, persona_id)
    }
}
