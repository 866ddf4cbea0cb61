//! List transforms over in-memory collections
//!
//! Pure functions used by the board and the export path:
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`SortState::toggle`] | single active key + reverse flag |
//! | [`sort_entries`] / [`sort_vacations`] | stable sort on a derived [`SortValue`] |
//! | [`matches_employee`] / [`matches_search`] | entry filters |
//! | [`total_hours`] | aggregation |
//! | [`employee_roster`] | distinct, sorted employee names |
//! | [`vacation_status`] / [`vacation_days`] / [`upcoming_vacations_count`] | vacation derivations |
//! | [`export_rows`] | rows for the tabular export |
//!
//! Anything that depends on the current date takes `today` as a parameter.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::models::{OvertimeEntry, Vacation};

// ========== Sorting ==========

/// A sortable column
pub trait SortKey: Copy + Eq {
    /// Reverse flag applied when this key becomes the active one
    fn default_reverse(self) -> bool;
}

/// Active sort key plus reverse flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub reverse: bool,
}

impl<K: SortKey> SortState<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            reverse: key.default_reverse(),
        }
    }

    /// Same key flips the direction, a new key resets it to the key's default
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.reverse = !self.reverse;
        } else {
            self.key = key;
            self.reverse = key.default_reverse();
        }
    }
}

/// Derived comparison value
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Date(NaiveDate),
    Number(f64),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => compare_names(a, b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn directed(ordering: Ordering, reverse: bool) -> Ordering {
    if reverse { ordering.reverse() } else { ordering }
}

/// Entry table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySortKey {
    Name,
    Reason,
    #[serde(rename = "type")]
    Kind,
    Date,
    Hours,
}

impl SortKey for EntrySortKey {
    fn default_reverse(self) -> bool {
        matches!(self, Self::Date | Self::Hours)
    }
}

impl EntrySortKey {
    pub fn value(self, entry: &OvertimeEntry) -> SortValue<'_> {
        match self {
            Self::Name => SortValue::Text(&entry.name),
            Self::Reason => SortValue::Text(&entry.reason),
            Self::Kind => SortValue::Text(entry.kind.as_str()),
            Self::Date => SortValue::Date(entry.date),
            Self::Hours => SortValue::Number(entry.hours),
        }
    }
}

/// Newest first
impl Default for SortState<EntrySortKey> {
    fn default() -> Self {
        Self::new(EntrySortKey::Date)
    }
}

/// Vacation table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VacationSortKey {
    Name,
    StartDate,
    EndDate,
    Days,
    Notes,
}

impl SortKey for VacationSortKey {
    fn default_reverse(self) -> bool {
        false
    }
}

impl VacationSortKey {
    pub fn value(self, vacation: &Vacation) -> SortValue<'_> {
        match self {
            Self::Name => SortValue::Text(&vacation.name),
            Self::StartDate => SortValue::Date(vacation.start_date),
            Self::EndDate => SortValue::Date(vacation.end_date),
            Self::Days => {
                SortValue::Number(vacation_days(vacation.start_date, vacation.end_date) as f64)
            }
            Self::Notes => SortValue::Text(&vacation.notes),
        }
    }
}

impl Default for SortState<VacationSortKey> {
    fn default() -> Self {
        Self::new(VacationSortKey::StartDate)
    }
}

/// Stable sort; equal values keep their input order
pub fn sort_entries<E: Borrow<OvertimeEntry>>(entries: &mut [E], state: &SortState<EntrySortKey>) {
    entries.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        directed(state.key.value(a).compare(&state.key.value(b)), state.reverse)
    });
}

pub fn sort_vacations<V: Borrow<Vacation>>(vacations: &mut [V], state: &SortState<VacationSortKey>) {
    vacations.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        directed(state.key.value(a).compare(&state.key.value(b)), state.reverse)
    });
}

// ========== Filtering ==========

/// Exact name match; an empty selection matches everything
pub fn matches_employee(entry: &OvertimeEntry, selected: &str) -> bool {
    selected.is_empty() || entry.name == selected
}

/// Case-insensitive substring over name, reason, `dd/mm/yyyy` date and hours
pub fn matches_search(entry: &OvertimeEntry, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    entry.name.to_lowercase().contains(&term)
        || entry.reason.to_lowercase().contains(&term)
        || dates::format_br(entry.date).contains(&term)
        || entry.hours.to_string().contains(&term)
}

/// Case-insensitive substring over name and notes
pub fn matches_vacation_search(vacation: &Vacation, term: &str) -> bool {
    let term = term.to_lowercase();
    term.is_empty()
        || vacation.name.to_lowercase().contains(&term)
        || vacation.notes.to_lowercase().contains(&term)
}

/// Employee filter, then search
pub fn filter_entries<'a>(
    entries: &'a [OvertimeEntry],
    selected: &str,
    term: &str,
) -> Vec<&'a OvertimeEntry> {
    entries
        .iter()
        .filter(|e| matches_employee(e, selected))
        .filter(|e| matches_search(e, term))
        .collect()
}

// ========== Aggregation ==========

/// Sum of hours; non-finite values count as zero
pub fn total_hours<I>(entries: I) -> f64
where
    I: IntoIterator,
    I::Item: Borrow<OvertimeEntry>,
{
    entries
        .into_iter()
        .map(|e| e.borrow().hours)
        .filter(|h| h.is_finite())
        .sum()
}

/// Distinct, trimmed, non-empty names sorted ascending, ignoring case and accents
pub fn employee_roster<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a OvertimeEntry>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for entry in entries {
        let name = entry.name.trim();
        if !name.is_empty() && seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names.sort_by(|a, b| compare_names(a, b));
    names
}

/// Base-sensitivity comparison: `"álvaro"` sorts with `"Alvaro"`
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a).cmp(&fold_name(b)).then_with(|| a.cmp(b))
}

fn fold_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(strip_accent)
        .collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

// ========== Vacations ==========

/// Vacation status relative to today, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacationStatus {
    /// Ended (`end_date < today`)
    #[serde(rename = "Encerradas")]
    Encerradas,
    /// Scheduled (`start_date > today`)
    #[serde(rename = "Agendadas")]
    Agendadas,
    /// Ongoing
    #[serde(rename = "Em andamento")]
    EmAndamento,
}

impl VacationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Encerradas => "Encerradas",
            Self::Agendadas => "Agendadas",
            Self::EmAndamento => "Em andamento",
        }
    }
}

impl std::fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn vacation_status(vacation: &Vacation, today: NaiveDate) -> VacationStatus {
    if vacation.end_date < today {
        VacationStatus::Encerradas
    } else if vacation.start_date > today {
        VacationStatus::Agendadas
    } else {
        VacationStatus::EmAndamento
    }
}

/// Inclusive day count, `0` when the span is not positive
pub fn vacation_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days() + 1;
    days.max(0)
}

/// Current or future vacation
pub fn is_upcoming(vacation: &Vacation, today: NaiveDate) -> bool {
    vacation.end_date >= today
}

pub fn upcoming_vacations_count<'a, I>(vacations: I, today: NaiveDate) -> usize
where
    I: IntoIterator<Item = &'a Vacation>,
{
    vacations
        .into_iter()
        .filter(|v| is_upcoming(v, today))
        .count()
}

// ========== Export ==========

/// Header row of the tabular export
pub const EXPORT_HEADERS: [&str; 4] = ["Funcionário", "Motivo", "Data", "Horas"];

/// One exported entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub name: String,
    pub reason: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub hours: f64,
}

impl From<&OvertimeEntry> for ExportRow {
    fn from(entry: &OvertimeEntry) -> Self {
        Self {
            name: entry.name.clone(),
            reason: entry.reason.clone(),
            date: dates::format_iso(entry.date),
            hours: entry.hours,
        }
    }
}

/// Employee filter, search term and sort order, in that order
pub fn export_rows(
    entries: &[OvertimeEntry],
    selected: &str,
    term: &str,
    sort: &SortState<EntrySortKey>,
) -> Vec<ExportRow> {
    let mut filtered = filter_entries(entries, selected, term);
    sort_entries(&mut filtered, sort);
    filtered.into_iter().map(ExportRow::from).collect()
}

// ========== Display ==========

/// `+3.00`, `-1.50`, `0.00`
pub fn format_signed_hours(hours: f64) -> String {
    let hours = if hours.is_finite() { hours } else { 0.0 };
    let sign = if hours > 0.0 {
        "+"
    } else if hours < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{:.2}", hours.abs())
}

/// First letters of the first and last name, `?` when empty
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return "?".to_string();
    };
    let mut out: String = first.chars().take(1).collect();
    if parts.len() > 1
        && let Some(last) = parts.last()
    {
        out.extend(last.chars().take(1));
    }
    out.to_uppercase()
}
