use crate::database::record::Record;
use crate::error::SheetStoreError;
use serde::Deserialize;
use serde::Serialize;

/// A LoRA training bucket with the number of approved images it needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub id: &'static str,
    pub label: &'static str,
    pub target: usize,
}

/// Fixed training buckets.
pub const BUCKETS: [Bucket; 4] = [
    Bucket { id: "A_identity", label: "A: Identity Lock", target: 55 },
    Bucket { id: "B_3d_face", label: "B: 3D Face", target: 15 },
    Bucket { id: "C_body", label: "C: Body Link", target: 20 },
    Bucket { id: "D_expression", label: "D: Expressions", target: 10 },
];

pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// Typed view over a `LoRA_Training` record, limited to the fields progress needs.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrainingImage {
    pub image_id: String,
    pub persona_id: String,
    pub bucket: String,
    pub status: String,
}

impl TrainingImage {
    pub fn from_record(record: &Record) -> Result<Self, SheetStoreError> {
        record.decode()
    }
}

/// Progress of one bucket for one persona.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketProgress {
    pub bucket: &'static str,
    pub label: &'static str,
    pub target: usize,
    /// Images in the bucket that have not been rejected
    pub count: usize,
    /// Images in the bucket that have been approved
    pub approved: usize,
}

impl BucketProgress {
    /// Approved share of the target in percent, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.approved as f64 / self.target as f64 * 100.0).min(100.0)
    }
}

/// Computes per-bucket progress for one persona. Images in unknown buckets are ignored.
pub fn bucket_progress(images: &[TrainingImage], persona_id: &str) -> Vec<BucketProgress> {
    let owned: Vec<&TrainingImage> = images
        .iter()
        .filter(|image| image.persona_id == persona_id)
        .collect();
    BUCKETS
        .iter()
        .map(|bucket| {
            let in_bucket = owned.iter().filter(|image| image.bucket == bucket.id);
            BucketProgress {
                bucket: bucket.id,
                label: bucket.label,
                target: bucket.target,
                count: in_bucket.clone().filter(|image| image.status != STATUS_REJECTED).count(),
                approved: in_bucket.filter(|image| image.status == STATUS_APPROVED).count(),
            }
        })
        .collect()
}
