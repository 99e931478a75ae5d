use crate::core::repository::SponsorRepository;
use crate::domain::model::{Category, Sponsor, SponsorForm, SponsorPatch};
use crate::domain::ports::{LogoStore, RecordStore};

/// Lifecycle of the panel's data snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelPhase {
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
    Submitting,
}

/// In-memory state holder behind the sponsor list and its forms.
///
/// Owns the only copy of the sponsor and category lists. The snapshot is
/// never patched in place: after every successful mutation the whole set is
/// re-fetched, so rendering always works from backend truth. The two
/// initial fetches run concurrently and the load is all-or-nothing; if
/// either fails, both lists stay empty and one error is surfaced.
pub struct SponsorPanel<R: RecordStore, U: LogoStore> {
    repository: SponsorRepository<R, U>,
    sponsors: Vec<Sponsor>,
    categories: Vec<Category>,
    phase: PanelPhase,
    last_error: Option<String>,
}

impl<R: RecordStore, U: LogoStore> SponsorPanel<R, U> {
    pub fn new(repository: SponsorRepository<R, U>) -> Self {
        Self {
            repository,
            sponsors: Vec::new(),
            categories: Vec::new(),
            phase: PanelPhase::Idle,
            last_error: None,
        }
    }

    pub fn phase(&self) -> &PanelPhase {
        &self.phase
    }

    pub fn sponsors(&self) -> &[Sponsor] {
        &self.sponsors
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Error message from the last failed action, cleared on the next
    /// successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sponsors carrying the given level, in backend order. Placeholder
    /// rows (blank name, only the level set) are included; they are what
    /// makes an empty category visible.
    pub fn sponsors_in(&self, category: &str) -> Vec<&Sponsor> {
        self.sponsors
            .iter()
            .filter(|s| s.level == category)
            .collect()
    }

    /// Initial load, also used as the full reload after every mutation.
    pub async fn load(&mut self) {
        self.phase = PanelPhase::Loading;

        let (sponsors, categories) = tokio::join!(
            self.repository.fetch_sponsors(),
            self.repository.fetch_categories()
        );

        match (sponsors, categories) {
            (Ok(sponsors), Ok(categories)) => {
                self.sponsors = sponsors;
                self.categories = categories;
                self.last_error = None;
                self.phase = PanelPhase::Loaded;
            }
            (Err(e), _) | (_, Err(e)) => {
                // All-or-nothing: a half-loaded panel is never shown.
                self.sponsors.clear();
                self.categories.clear();
                let message = e.user_friendly_message();
                tracing::error!("Panel load failed: {}", e);
                self.last_error = Some(message.clone());
                self.phase = PanelPhase::LoadFailed(message);
            }
        }
    }

    pub async fn submit_add_sponsor(&mut self, form: SponsorForm) -> Result<(), String> {
        self.phase = PanelPhase::Submitting;
        let outcome = self.repository.add_sponsor(form).await.map(|_| ());
        self.finish_submit(outcome).await
    }

    pub async fn submit_edit_sponsor(
        &mut self,
        sponsor_id: &str,
        patch: SponsorPatch,
    ) -> Result<(), String> {
        self.phase = PanelPhase::Submitting;
        let outcome = self.repository.update_sponsor(sponsor_id, patch).await;
        self.finish_submit(outcome).await
    }

    pub async fn submit_delete_sponsor(&mut self, sponsor_id: &str) -> Result<(), String> {
        self.phase = PanelPhase::Submitting;
        let outcome = self.repository.delete_sponsor(sponsor_id).await;
        self.finish_submit(outcome).await
    }

    pub async fn submit_add_category(&mut self, name: &str) -> Result<(), String> {
        self.phase = PanelPhase::Submitting;
        let outcome = self.repository.add_category(name).await;
        self.finish_submit(outcome).await
    }

    pub async fn submit_delete_category(&mut self, name: &str) -> Result<(), String> {
        self.phase = PanelPhase::Submitting;
        let outcome = self.repository.delete_category(name).await;
        self.finish_submit(outcome).await
    }

    /// Tail of every mutation lifecycle: a full reload on success, or an
    /// error message with the current snapshot kept so the form stays open
    /// for correction.
    async fn finish_submit(
        &mut self,
        outcome: crate::utils::error::Result<()>,
    ) -> Result<(), String> {
        match outcome {
            Ok(()) => {
                self.last_error = None;
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_friendly_message();
                tracing::error!("Submit failed: {}", e);
                self.last_error = Some(message.clone());
                self.phase = PanelPhase::Idle;
                Err(message)
            }
        }
    }
}
