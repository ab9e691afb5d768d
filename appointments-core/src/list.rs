//! List controller: one snapshot of the collection, shaped in memory.

use crate::appointment::{Appointment, Column};
use crate::error::{AppointmentError, AppointmentResult};
use crate::repository::AppointmentRepository;
use crate::view::{
    PAGE_SIZE_OPTIONS, SortSpec, ViewQuery, ViewState, clamp_page, derive_view, filter, page_count,
};

/// Where the list is in its load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded(Vec<Appointment>),
    /// The last load failed; no snapshot is kept.
    Failed(String),
}

/// Result of a delete request from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Confirmation declined; nothing was sent.
    Cancelled,
    /// Deleted and the list was reloaded.
    Deleted,
}

pub struct ListController<R> {
    repo: R,
    state: ListState,
    query: ViewQuery,
}

impl<R: AppointmentRepository> ListController<R> {
    pub fn new(repo: R) -> Self {
        ListController {
            repo,
            state: ListState::Idle,
            query: ViewQuery::default(),
        }
    }

    pub fn with_page_size(repo: R, page_size: usize) -> AppointmentResult<Self> {
        let mut list = Self::new(repo);
        list.set_page_size(page_size)?;
        Ok(list)
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The loaded collection; empty unless loaded.
    pub fn snapshot(&self) -> &[Appointment] {
        match &self.state {
            ListState::Loaded(snapshot) => snapshot,
            _ => &[],
        }
    }

    /// Fetch the whole collection and replace the snapshot.
    pub async fn load(&mut self) -> AppointmentResult<()> {
        self.state = ListState::Loading;

        match self.repo.list().await {
            Ok(snapshot) => {
                tracing::debug!(count = snapshot.len(), "appointments loaded");
                self.state = ListState::Loaded(snapshot);
                self.clamp_page();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading appointments failed");
                self.state = ListState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// The page currently shown.
    pub fn view(&self) -> ViewState {
        derive_view(self.snapshot(), &self.query)
    }

    /// Apply a free-text filter and go back to the first page.
    pub fn set_filter(&mut self, query: &str) {
        self.query.filter = query.to_string();
        self.query.page_index = 0;
    }

    /// Select a column header; see [`SortSpec::toggle`] for the cycle.
    pub fn toggle_sort(&mut self, column: Column) -> Option<SortSpec> {
        self.query.sort = SortSpec::toggle(self.query.sort, column);
        self.query.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.query.sort = sort;
    }

    pub fn set_page_size(&mut self, page_size: usize) -> AppointmentResult<()> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(AppointmentError::InvalidPageSize(page_size));
        }
        self.query.page_size = page_size;
        self.clamp_page();
        Ok(())
    }

    /// Jump to a page; out-of-range indices land on the last page.
    pub fn set_page(&mut self, page_index: usize) {
        self.query.page_index = page_index;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.query.page_index + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.query.page_index.saturating_sub(1));
    }

    /// Delete after confirmation, then reload from the store.
    ///
    /// `confirm` sees the record from the snapshot when it is there.
    pub async fn delete<F>(&mut self, id: u64, confirm: F) -> AppointmentResult<DeleteOutcome>
    where
        F: FnOnce(Option<&Appointment>) -> bool,
    {
        let target = self.snapshot().iter().find(|a| a.id == Some(id));
        if !confirm(target) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.repo.delete(id).await?;
        tracing::info!(id, "appointment deleted");

        self.load().await?;
        Ok(DeleteOutcome::Deleted)
    }

    fn clamp_page(&mut self) {
        let matched = filter(self.snapshot(), &self.query.filter).len();
        let pages = page_count(matched, self.query.page_size);
        self.query.page_index = clamp_page(self.query.page_index, pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryRepository;
    use crate::view::SortDirection;
    use chrono::NaiveDate;

    fn appointment(id: u64, day: u32, customer: &str, cost: f64) -> Appointment {
        Appointment::new(
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            "10:00",
            customer,
            "Via Roma 1",
            "Milano",
            cost,
        )
        .with_id(id)
    }

    fn scenario() -> MemoryRepository {
        MemoryRepository::with(vec![
            appointment(1, 1, "Rossi", 50.0),
            appointment(2, 2, "Bianchi", 80.0),
        ])
    }

    fn many(n: u64) -> MemoryRepository {
        MemoryRepository::with(
            (1..=n)
                .map(|i| appointment(i, (i % 28 + 1) as u32, &format!("Customer {i}"), i as f64))
                .collect(),
        )
    }

    fn ids(view: &ViewState) -> Vec<u64> {
        view.rows.iter().map(|a| a.id.unwrap()).collect()
    }

    #[tokio::test]
    async fn test_starts_idle_then_loads() {
        let mut list = ListController::new(scenario());
        assert_eq!(list.state(), &ListState::Idle);
        assert!(list.view().rows.is_empty());

        list.load().await.unwrap();
        assert!(matches!(list.state(), ListState::Loaded(s) if s.len() == 2));
        assert_eq!(ids(&list.view()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failed_load_is_visible() {
        let repo = scenario();
        repo.fail_next_list("connection refused");
        let mut list = ListController::new(repo);

        assert!(list.load().await.is_err());
        assert!(matches!(
            list.state(),
            ListState::Failed(msg) if msg.contains("connection refused")
        ));
        assert!(list.snapshot().is_empty());

        list.load().await.unwrap();
        assert_eq!(list.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_scenario_filter_and_sort() {
        let mut list = ListController::new(scenario());
        list.load().await.unwrap();

        list.set_filter("bianchi");
        assert_eq!(ids(&list.view()), vec![2]);

        list.set_filter("");
        list.toggle_sort(Column::Cost);
        let sort = list.toggle_sort(Column::Cost);
        assert_eq!(sort.map(|s| s.direction), Some(SortDirection::Descending));
        assert_eq!(ids(&list.view()), vec![2, 1]);

        assert_eq!(list.toggle_sort(Column::Cost), None);
        assert_eq!(ids(&list.view()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_filter_resets_page() {
        let mut list = ListController::with_page_size(many(30), 5).unwrap();
        list.load().await.unwrap();
        list.set_page(3);
        assert_eq!(list.view().page_index, 3);

        list.set_filter("customer");
        assert_eq!(list.query().page_index, 0);
    }

    #[tokio::test]
    async fn test_page_size_change_clamps_page() {
        let mut list = ListController::with_page_size(many(23), 5).unwrap();
        list.load().await.unwrap();
        list.set_page(4);
        assert_eq!(list.view().rows.len(), 3);

        list.set_page_size(10).unwrap();
        assert_eq!(list.query().page_index, 2);
        assert_eq!(list.view().page_count, 3);

        assert!(matches!(
            list.set_page_size(7),
            Err(AppointmentError::InvalidPageSize(7))
        ));
        assert_eq!(list.query().page_size, 10);
    }

    #[tokio::test]
    async fn test_paging_stays_in_range() {
        let mut list = ListController::with_page_size(many(12), 5).unwrap();
        list.load().await.unwrap();

        list.previous_page();
        assert_eq!(list.query().page_index, 0);
        list.next_page();
        list.next_page();
        list.next_page();
        assert_eq!(list.query().page_index, 2);
        assert_eq!(ids(&list.view()), vec![11, 12]);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mut list = ListController::new(scenario());
        list.load().await.unwrap();
        let calls = list.repository().calls();

        let mut asked = None;
        let outcome = list
            .delete(1, |target| {
                asked = target.map(|a| a.customer_name.clone());
                false
            })
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(asked.as_deref(), Some("Rossi"));
        assert_eq!(list.repository().calls(), calls);
        assert_eq!(list.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads() {
        let mut list = ListController::new(scenario());
        list.load().await.unwrap();
        let calls = list.repository().calls();

        let outcome = list.delete(1, |_| true).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        // delete + list
        assert_eq!(list.repository().calls(), calls + 2);
        assert_eq!(ids(&list.view()), vec![2]);
    }

    #[tokio::test]
    async fn test_delete_missing_keeps_snapshot() {
        let mut list = ListController::new(scenario());
        list.load().await.unwrap();

        let err = list.delete(99, |_| true).await.unwrap_err();
        assert!(matches!(err, AppointmentError::NotFound(99)));
        assert_eq!(list.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_last_row_moves_back_a_page() {
        let mut list = ListController::with_page_size(many(6), 5).unwrap();
        list.load().await.unwrap();
        list.set_page(1);
        assert_eq!(ids(&list.view()), vec![6]);

        list.delete(6, |_| true).await.unwrap();
        assert_eq!(list.query().page_index, 0);
        assert_eq!(list.view().rows.len(), 5);
    }
}
