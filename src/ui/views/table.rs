//! Scrollable table with a selected row, shared by the list views

use crate::config::TableKeys;
use crate::frame;
use crate::ui::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::layout::Constraint;
use ratatui::widgets::{Row, Table, TableState};

#[derive(Debug, Clone)]
pub struct DataTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    state: TableState,
    keys: TableKeys,
}

impl DataTable {
    pub fn new(header: &[&str], keys: TableKeys) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            state: TableState::default(),
            keys,
        }
    }

    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        let selected = match self.state.selected() {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn goto_top(&mut self) {
        self.state.select(if self.rows.is_empty() { None } else { Some(0) });
        *self.state.offset_mut() = 0;
    }

    pub fn selected(&self) -> Option<&[String]> {
        self.state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    /// Cell `column` of the selected row
    pub fn selected_cell(&self, column: usize) -> Option<&str> {
        self.selected()
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }

    /// Move the selection. Returns whether the key was used.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let last = self.rows.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        if self.keys.up.matches(key) {
            self.state.select(Some(current.saturating_sub(1)));
        } else if self.keys.down.matches(key) {
            self.state.select(Some((current + 1).min(last)));
        } else {
            return false;
        }
        true
    }

    pub fn help(&self) -> Vec<crate::config::KeyBinding> {
        vec![self.keys.up.clone(), self.keys.down.clone()]
    }

    pub fn view(&self, widths: &[Constraint], width: u16, height: u16, theme: &Theme) -> String {
        let rows = self.rows.iter().map(|r| Row::new(r.clone()));
        let table = Table::new(rows, widths.to_vec())
            .header(Row::new(self.header.clone()).style(theme.table_header()))
            .row_highlight_style(theme.table_selected())
            .column_spacing(1);
        let mut state = self.state.clone();
        frame::render_stateful(table, &mut state, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("row{i}")]).collect()
    }

    fn down() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)
    }

    #[test]
    fn test_first_row_selected_after_load() {
        let mut table = DataTable::new(&["Name"], TableKeys::default());
        assert_eq!(table.selected_cell(0), None);
        table.set_rows(rows(3));
        assert_eq!(table.selected_cell(0), Some("row0"));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut table = DataTable::new(&["Name"], TableKeys::default());
        table.set_rows(rows(2));
        assert!(table.handle_key(&down()));
        assert!(table.handle_key(&down()));
        assert_eq!(table.selected_cell(0), Some("row1"));
        table.handle_key(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(table.selected_cell(0), Some("row0"));
    }

    #[test]
    fn test_selection_survives_shrinking() {
        let mut table = DataTable::new(&["Name"], TableKeys::default());
        table.set_rows(rows(3));
        table.handle_key(&down());
        table.handle_key(&down());
        table.set_rows(rows(2));
        assert_eq!(table.selected_cell(0), Some("row1"));
        table.set_rows(Vec::new());
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn test_view_size() {
        let mut table = DataTable::new(&["Name"], TableKeys::default());
        table.set_rows(rows(2));
        let view = table.view(&[Constraint::Fill(1)], 12, 4, &Theme::default());
        assert_eq!(text::size(&view), (12, 4));
        assert!(view.contains("row1"));
    }
}
