use crate::backend::SheetsBackend;
use crate::dashboard::tables::JOB_QUEUE;
use crate::dashboard::tables::OWNER_COLUMN;
use crate::dashboard::Dashboard;
use crate::database::record::Record;
use crate::error::SheetStoreError;
use crate::helpers::clock::generate_id;
use crate::helpers::clock::timestamp;
use serde_json::Value;

impl<B: SheetsBackend> Dashboard<B> {
    /// Queued, running and finished jobs, optionally scoped to one persona.
    pub fn jobs(&self, persona_id: Option<&str>) -> Result<Vec<Record>, SheetStoreError> {
        self.main.list_where(&JOB_QUEUE.range(), OWNER_COLUMN, persona_id)
    }

    /// Enqueues a job. `parameters` is stored as a JSON string cell (`{}` when absent);
    /// priority defaults to 3.
    pub fn create_job(&self, body: &Record, parameters: Option<&Value>) -> Result<Record, SheetStoreError> {
        let now = self.now();
        let parameters = match parameters {
            Some(parameters) => serde_json::to_string(parameters)?,
            None => "{}".to_owned(),
        };
        let job = Record::from_pairs([
            ("job_id", generate_id("job", now)),
            ("persona_id", body.value("persona_id").to_owned()),
            ("job_type", body.value("job_type").to_owned()),
            ("priority", body.value_or("priority", "3")),
            ("status", "queued".to_owned()),
            ("scheduled_for", body.value("scheduled_for").to_owned()),
            ("parameters", parameters),
            ("created_at", timestamp(now)),
        ]);
        self.main.append_record(JOB_QUEUE.name, JOB_QUEUE.columns, &job)?;
        Ok(job)
    }
}
