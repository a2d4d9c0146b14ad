use crate::backend::SheetsBackend;
use crate::dashboard::tables::CONTENT_CALENDAR;
use crate::dashboard::tables::OWNER_COLUMN;
use crate::dashboard::Dashboard;
use crate::database::record::Record;
use crate::database::record::Updates;
use crate::error::SheetStoreError;
use crate::helpers::clock::generate_id;

impl<B: SheetsBackend> Dashboard<B> {
    /// Calendar slots, optionally scoped to one persona.
    pub fn calendar(&self, persona_id: Option<&str>) -> Result<Vec<Record>, SheetStoreError> {
        self.main
            .list_where(&CONTENT_CALENDAR.range(), OWNER_COLUMN, persona_id)
    }

    /// Slots scheduled on a given `YYYY-MM-DD` date, in sheet order.
    pub fn calendar_on(&self, scheduled_date: &str) -> Result<Vec<Record>, SheetStoreError> {
        self.main
            .list_where(&CONTENT_CALENDAR.range(), "scheduled_date", Some(scheduled_date))
    }

    /// Creates a slot in `draft` unless another status is given. `publish_url` starts empty.
    pub fn create_slot(&self, body: &Record) -> Result<Record, SheetStoreError> {
        let slot = Record::from_pairs([
            ("slot_id", generate_id("slot", self.now())),
            ("persona_id", body.value("persona_id").to_owned()),
            ("scheduled_date", body.value("scheduled_date").to_owned()),
            ("scheduled_time", body.value("scheduled_time").to_owned()),
            ("platform", body.value("platform").to_owned()),
            ("content_type", body.value("content_type").to_owned()),
            ("title", body.value("title").to_owned()),
            ("description", body.value("description").to_owned()),
            ("asset_ids", body.value("asset_ids").to_owned()),
            ("status", body.value_or("status", "draft")),
            ("publish_url", String::new()),
            ("notes", body.value("notes").to_owned()),
        ]);
        self.main
            .append_record(CONTENT_CALENDAR.name, CONTENT_CALENDAR.columns, &slot)?;
        Ok(slot)
    }

    pub fn update_slot(&self, slot_id: &str, updates: &Updates) -> Result<(), SheetStoreError> {
        self.main
            .update_by_key(CONTENT_CALENDAR.name, CONTENT_CALENDAR.key, slot_id, updates)?;
        Ok(())
    }

    pub fn delete_slot(&self, slot_id: &str) -> Result<(), SheetStoreError> {
        self.main
            .delete_by_key(CONTENT_CALENDAR.name, CONTENT_CALENDAR.key, slot_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::dashboard::fixtures::dashboard;
    use crate::database::record::Record;
    use crate::database::record::Updates;
    use crate::database::StoreError;

    fn body(persona: &str, date: &str, title: &str) -> Record {
        Record::from_pairs([
            ("persona_id", persona),
            ("scheduled_date", date),
            ("platform", "instagram"),
            ("content_type", "reel"),
            ("title", title),
        ])
    }

    #[test]
    fn create_update_delete_slot() {
        let dashboard = dashboard();
        let slot = dashboard.create_slot(&body("p1", "2024-05-02", "Hello")).unwrap();
        let slot_id = slot.value("slot_id").to_owned();
        assert_eq!(slot.value("status"), "draft");
        assert_eq!(slot.value("publish_url"), "");

        let updates = Updates::from([
            ("status".to_owned(), "published".to_owned()),
            ("publish_url".to_owned(), "https://example.com/p/1".to_owned()),
        ]);
        dashboard.update_slot(&slot_id, &updates).unwrap();
        let slots = dashboard.calendar(Some("p1")).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].value("status"), "published");
        assert_eq!(slots[0].value("title"), "Hello");

        dashboard.delete_slot(&slot_id).unwrap();
        assert!(dashboard.calendar(None).unwrap().is_empty());

        let error = dashboard.delete_slot(&slot_id).unwrap_err();
        assert!(matches!(error.as_store_error(), Some(StoreError::RecordNotFound { .. })));
    }

    #[test]
    fn scoped_listing() {
        let dashboard = dashboard();
        dashboard.create_slot(&body("p1", "2024-05-02", "A")).unwrap();
        dashboard.create_slot(&body("p2", "2024-05-02", "B")).unwrap();
        dashboard.create_slot(&body("p1", "2024-05-03", "C")).unwrap();

        assert_eq!(dashboard.calendar(None).unwrap().len(), 3);
        assert_eq!(dashboard.calendar(Some("p1")).unwrap().len(), 2);
        let titles: Vec<_> = dashboard
            .calendar_on("2024-05-02")
            .unwrap()
            .iter()
            .map(|slot| slot.value("title").to_owned())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
