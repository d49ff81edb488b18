//! Выбор строк к оплате (депозиты, окна фолио)
//!
//! Выбрать можно только строки с положительной суммой к оплате; остальные
//! отключены и не участвуют ни в "выбрать все", ни в итоге.

use contracts::domain::a002_deposit_folio::aggregate::DepositPolicyLine;
use contracts::domain::a003_folio::aggregate::FolioLine;

/// Trait для строк, которые можно оплатить
pub trait Payable {
    /// Outstanding amount; non-positive means nothing to pay
    fn payable_amount(&self) -> f64;
    /// Identifier sent to the payment API for this line
    fn line_id(&self) -> String;
}

impl Payable for DepositPolicyLine {
    fn payable_amount(&self) -> f64 {
        self.amount_due
    }

    fn line_id(&self) -> String {
        self.policy_id.clone()
    }
}

impl Payable for FolioLine {
    fn payable_amount(&self) -> f64 {
        self.balance_amount
    }

    fn line_id(&self) -> String {
        self.folio_window_no.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectableLine<T> {
    pub item: T,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionList<T> {
    lines: Vec<SelectableLine<T>>,
}

impl<T> Default for SelectionList<T> {
    fn default() -> Self {
        Self { lines: Vec::new() }
    }
}

impl<T: Payable> SelectionList<T> {
    /// Every payable line starts selected.
    pub fn new(items: Vec<T>) -> Self {
        let lines = items
            .into_iter()
            .map(|item| {
                let disabled = !(item.payable_amount() > 0.0);
                SelectableLine {
                    item,
                    selected: !disabled,
                    disabled,
                }
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[SelectableLine<T>] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_payable(&self) -> bool {
        self.lines.iter().any(|l| !l.disabled)
    }

    /// True iff every payable line is selected.
    pub fn all_selected(&self) -> bool {
        self.lines
            .iter()
            .filter(|l| !l.disabled)
            .all(|l| l.selected)
    }

    /// Applies "select all" to payable lines only.
    pub fn set_all(&mut self, selected: bool) {
        for line in self.lines.iter_mut().filter(|l| !l.disabled) {
            line.selected = selected;
        }
    }

    /// Disabled lines and out-of-range indexes are ignored.
    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(line) = self.lines.get_mut(index) {
            if !line.disabled {
                line.selected = selected;
            }
        }
    }

    pub fn selected_items(&self) -> impl Iterator<Item = &T> {
        self.lines
            .iter()
            .filter(|l| l.selected && !l.disabled)
            .map(|l| &l.item)
    }

    pub fn has_selection(&self) -> bool {
        self.selected_items().next().is_some()
    }

    pub fn total(&self) -> f64 {
        self.selected_items().map(|item| item.payable_amount()).sum()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected_items().map(|item| item.line_id()).collect()
    }
}
