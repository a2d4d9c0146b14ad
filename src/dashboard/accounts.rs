use crate::backend::SheetsBackend;
use crate::dashboard::tables::PLATFORM_ACCOUNTS;
use crate::dashboard::Dashboard;
use crate::database::criteria::Criteria;
use crate::database::record::Record;
use crate::error::SheetStoreError;
use crate::helpers::clock::date;
use crate::helpers::clock::generate_id;

impl<B: SheetsBackend> Dashboard<B> {
    pub fn platform_accounts(&self) -> Result<Vec<Record>, SheetStoreError> {
        self.main.list(&PLATFORM_ACCOUNTS.range())
    }

    /// Lists platform accounts matching the given criteria (persona, platform, status, ...).
    pub fn platform_accounts_matching(&self, criteria: &Criteria) -> Result<Vec<Record>, SheetStoreError> {
        Ok(criteria.apply(self.platform_accounts()?))
    }

    /// Registers a platform account. New accounts start on warm-up day 0.
    pub fn create_platform_account(&self, body: &Record) -> Result<Record, SheetStoreError> {
        let now = self.now();
        let account = Record::from_pairs([
            ("account_id", generate_id("acc", now)),
            ("persona_id", body.value("persona_id").to_owned()),
            ("platform", body.value("platform").to_owned()),
            ("email", body.value("email").to_owned()),
            ("handle", body.value("handle").to_owned()),
            ("password_ref", body.value("password_ref").to_owned()),
            ("gologin_profile_id", body.value("gologin_profile_id").to_owned()),
            ("proxy_region", body.value("proxy_region").to_owned()),
            ("status", body.value_or("status", "planned")),
            ("warmup_day", "0".to_owned()),
            ("created_at", date(now)),
            ("notes", body.value("notes").to_owned()),
        ]);
        self.main
            .append_record(PLATFORM_ACCOUNTS.name, PLATFORM_ACCOUNTS.columns, &account)?;
        Ok(account)
    }
}
