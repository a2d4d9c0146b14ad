use crate::backend::SheetsBackend;
use crate::dashboard::tables::OWNER_COLUMN;
use crate::dashboard::tables::PERSONAS;
use crate::dashboard::tables::PERSONA_PROFILES;
use crate::dashboard::tables::SOCIAL_ACCOUNTS;
use crate::dashboard::tables::VOICE_PROFILES;
use crate::dashboard::Dashboard;
use crate::database::record::Record;
use crate::database::record::Updates;
use crate::error::ResultMessage;
use crate::error::SheetStoreError;
use crate::helpers::clock::date;
use serde_json::Value;

impl<B: SheetsBackend> Dashboard<B> {
    pub fn personas(&self) -> Result<Vec<Record>, SheetStoreError> {
        self.main.list(&PERSONAS.range())
    }

    /// Looks a persona up by id; None when no row carries it.
    pub fn persona(&self, persona_id: &str) -> Result<Option<Record>, SheetStoreError> {
        self.main.find(&PERSONAS.range(), PERSONAS.key, persona_id)
    }

    /// Updates the basic persona row and/or replaces the stored profile document.
    ///
    /// The two writes are independent: if the profile write fails, the basic
    /// fields stay updated.
    pub fn update_persona(
        &self,
        persona_id: &str,
        basic: Option<&Updates>,
        profile: Option<&Value>,
    ) -> Result<(), SheetStoreError> {
        if let Some(basic) = basic {
            self.main
                .update_by_key(PERSONAS.name, PERSONAS.key, persona_id, basic)
                .with_prefix("Update persona")?;
        }
        if let Some(profile) = profile {
            let updates = Updates::from([
                ("profile_json".to_owned(), serde_json::to_string(profile)?),
                ("updated_at".to_owned(), date(self.now())),
            ]);
            self.main
                .update_by_key(PERSONA_PROFILES.name, PERSONA_PROFILES.key, persona_id, &updates)
                .with_prefix("Update persona profile")?;
        }
        Ok(())
    }

    /// Parses the stored profile document of a persona, if there is one.
    pub fn persona_profile(&self, persona_id: &str) -> Result<Option<Value>, SheetStoreError> {
        let record = self
            .main
            .find(&PERSONA_PROFILES.range(), PERSONA_PROFILES.key, persona_id)?;
        match record.as_ref().map(|record| record.value("profile_json")) {
            None | Some("") => Ok(None),
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
        }
    }

    pub fn voice_profiles(&self, persona_id: &str) -> Result<Vec<Record>, SheetStoreError> {
        self.main
            .list_where(&VOICE_PROFILES.range(), OWNER_COLUMN, Some(persona_id))
    }

    pub fn social_accounts(&self, persona_id: &str) -> Result<Vec<Record>, SheetStoreError> {
        self.main
            .list_where(&SOCIAL_ACCOUNTS.range(), OWNER_COLUMN, Some(persona_id))
    }
}

#[cfg(test)]
mod tests {
    use crate::dashboard::fixtures::dashboard;
    use crate::database::record::Updates;
    use crate::database::StoreError;
    use serde_json::json;

    #[test]
    fn list_and_get() {
        let dashboard = dashboard();
        let personas = dashboard.personas().unwrap();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[1].value("updated_at"), "");

        let persona = dashboard.persona("p2").unwrap().unwrap();
        assert_eq!(persona.value("name"), "Mia");
        assert!(dashboard.persona("p9").unwrap().is_none());
    }

    #[test]
    fn update_basic_and_profile() {
        let dashboard = dashboard();
        let basic = Updates::from([("tagline".to_owned(), "Bright".to_owned())]);
        let profile = json!({ "voice": { "tone": "warm" }, "age": 24 });
        dashboard.update_persona("p1", Some(&basic), Some(&profile)).unwrap();

        let persona = dashboard.persona("p1").unwrap().unwrap();
        assert_eq!(persona.value("tagline"), "Bright");
        assert_eq!(persona.value("name"), "Ava");

        assert_eq!(dashboard.persona_profile("p1").unwrap(), Some(profile));
        let row = dashboard.main.backend().grid("Persona_Profiles").unwrap();
        assert_eq!(row[1][2], "2024-05-01");
    }

    #[test]
    fn profile_update_without_profile_row_fails() {
        let dashboard = dashboard();
        let error = dashboard.update_persona("p2", None, Some(&json!({}))).unwrap_err();
        assert!(error.to_string().starts_with("Update persona profile: "));
        assert!(dashboard.persona_profile("p2").unwrap().is_none());
    }

    #[test]
    fn unknown_persona_is_not_found() {
        let dashboard = dashboard();
        let basic = Updates::from([("status".to_owned(), "active".to_owned())]);
        let error = dashboard.main.update_by_key("Personas", "persona_id", "p9", &basic).unwrap_err();
        assert!(matches!(error.as_store_error(), Some(StoreError::RecordNotFound { .. })));
    }

    #[test]
    fn owned_sub_tables() {
        let dashboard = dashboard();
        let voices = dashboard.voice_profiles("p2").unwrap();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].value("tone"), "dry");
        assert_eq!(dashboard.social_accounts("p1").unwrap().len(), 1);
        assert!(dashboard.social_accounts("p2").unwrap().is_empty());
    }
}
