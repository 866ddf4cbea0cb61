// gestao-client/src/board.rs
// 看板控制器 - 缓存列表 + 视图状态（排序、筛选、搜索）

use chrono::NaiveDate;
use shared::listing::{
    self, EXPORT_HEADERS, EntrySortKey, ExportRow, SortState, VacationSortKey, VacationStatus,
};
use shared::{EntryCreate, OvertimeEntry, Vacation, VacationCreate};

use crate::export::{SHEET_NAME, TabularExport};
use crate::store::Store;
use crate::ClientResult;

/// A vacation with its derived columns
#[derive(Debug, Clone, PartialEq)]
pub struct VacationView<'a> {
    pub vacation: &'a Vacation,
    pub status: VacationStatus,
    pub days: i64,
}

/// Presentation controller over any [`Store`].
///
/// Holds a cache of both collections; the store stays the source of truth.
/// Every mutation goes through the store first and only touches the cache
/// once the store call succeeded.
pub struct OvertimeBoard<S> {
    store: S,
    entries: Vec<OvertimeEntry>,
    vacations: Vec<Vacation>,
    employees: Vec<String>,
    entry_sort: SortState<EntrySortKey>,
    vacation_sort: SortState<VacationSortKey>,
    selected_employee: String,
    search_term: String,
    vacation_search_term: String,
}

impl<S: Store> OvertimeBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
            vacations: Vec::new(),
            employees: Vec::new(),
            entry_sort: SortState::default(),
            vacation_sort: SortState::default(),
            selected_employee: String::new(),
            search_term: String::new(),
            vacation_search_term: String::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace both caches with the store's collections
    pub async fn load(&mut self) -> ClientResult<()> {
        self.entries = self.store.list_entries().await?;
        self.vacations = self.store.list_vacations().await?;
        self.refresh_employees();
        tracing::debug!(
            entries = self.entries.len(),
            vacations = self.vacations.len(),
            "Board loaded"
        );
        Ok(())
    }

    fn refresh_employees(&mut self) {
        self.employees = listing::employee_roster(&self.entries);
    }

    // ========== Entries ==========

    pub fn entries(&self) -> &[OvertimeEntry] {
        &self.entries
    }

    /// Employee names for the filter selector
    pub fn employees(&self) -> &[String] {
        &self.employees
    }

    /// Save through the store; the saved entry goes to the top of the cache
    pub async fn add_entry(&mut self, payload: EntryCreate) -> ClientResult<&OvertimeEntry> {
        let saved = self.store.create_entry(payload).await?;
        self.entries.insert(0, saved);
        self.refresh_employees();
        Ok(&self.entries[0])
    }

    pub async fn delete_entry(&mut self, id: i64) -> ClientResult<()> {
        self.store.delete_entry(id).await?;
        self.entries.retain(|e| e.id != id);
        self.refresh_employees();
        Ok(())
    }

    pub fn entry_sort(&self) -> SortState<EntrySortKey> {
        self.entry_sort
    }

    pub fn toggle_entry_sort(&mut self, key: EntrySortKey) {
        self.entry_sort.toggle(key);
    }

    pub fn selected_employee(&self) -> &str {
        &self.selected_employee
    }

    /// Empty string clears the filter
    pub fn select_employee(&mut self, name: impl Into<String>) {
        self.selected_employee = name.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Employee filter, then search, then the active sort
    pub fn visible_entries(&self) -> Vec<&OvertimeEntry> {
        let mut visible =
            listing::filter_entries(&self.entries, &self.selected_employee, &self.search_term);
        listing::sort_entries(&mut visible, &self.entry_sort);
        visible
    }

    /// Sum of hours for the selected employee (all entries when none is selected)
    pub fn total_hours(&self) -> f64 {
        listing::total_hours(
            self.entries
                .iter()
                .filter(|e| listing::matches_employee(e, &self.selected_employee)),
        )
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        listing::export_rows(
            &self.entries,
            &self.selected_employee,
            &self.search_term,
            &self.entry_sort,
        )
    }

    /// Export the current entries view with the standard sheet layout
    pub fn export_entries<E: TabularExport>(&self, exporter: &E) -> ClientResult<E::Output> {
        exporter.export(SHEET_NAME, &EXPORT_HEADERS, &self.export_rows())
    }

    // ========== Vacations ==========

    pub fn vacations(&self) -> &[Vacation] {
        &self.vacations
    }

    /// Save through the store; the saved vacation is appended to the cache
    pub async fn add_vacation(&mut self, payload: VacationCreate) -> ClientResult<&Vacation> {
        let saved = self.store.create_vacation(payload).await?;
        self.vacations.push(saved);
        Ok(&self.vacations[self.vacations.len() - 1])
    }

    pub async fn delete_vacation(&mut self, id: i64) -> ClientResult<()> {
        self.store.delete_vacation(id).await?;
        self.vacations.retain(|v| v.id != id);
        Ok(())
    }

    pub fn vacation_sort(&self) -> SortState<VacationSortKey> {
        self.vacation_sort
    }

    pub fn toggle_vacation_sort(&mut self, key: VacationSortKey) {
        self.vacation_sort.toggle(key);
    }

    pub fn set_vacation_search_term(&mut self, term: impl Into<String>) {
        self.vacation_search_term = term.into();
    }

    /// Searched and sorted vacations with status and day count
    pub fn vacation_views(&self, today: NaiveDate) -> Vec<VacationView<'_>> {
        let mut matching: Vec<&Vacation> = self
            .vacations
            .iter()
            .filter(|v| listing::matches_vacation_search(v, &self.vacation_search_term))
            .collect();
        listing::sort_vacations(&mut matching, &self.vacation_sort);
        matching
            .into_iter()
            .map(|vacation| VacationView {
                vacation,
                status: listing::vacation_status(vacation, today),
                days: listing::vacation_days(vacation.start_date, vacation.end_date),
            })
            .collect()
    }

    /// Only current and future vacations
    pub fn upcoming_vacations(&self, today: NaiveDate) -> Vec<VacationView<'_>> {
        self.vacation_views(today)
            .into_iter()
            .filter(|view| listing::is_upcoming(view.vacation, today))
            .collect()
    }

    pub fn upcoming_vacations_count(&self, today: NaiveDate) -> usize {
        listing::upcoming_vacations_count(&self.vacations, today)
    }
}
