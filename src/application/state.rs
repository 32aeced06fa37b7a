//! Application state management for the terminal matrix multiplier.
//!
//! This module contains the controller owning the three grids, the export
//! accumulators, and the UI state. Every user action maps to one named
//! operation invoked synchronously by the presentation layer.

use crate::domain::{
    multiply_and_export, DomainError, DomainResult, Grid, GridValidation, Matrix, MAX_DIM,
};

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and what UI
/// elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal navigation mode - arrow keys move selection, shortcuts available
    Normal,
    /// Cell editing mode - user is typing into the selected cell
    Editing,
    /// Greek letter palette is open
    GreekPicker,
    /// Help screen is displayed
    Help,
}

/// Which input grid holds the selection. The result grid is read-only
/// and never selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn toggled(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Main application state containing the three grids and UI state.
///
/// # Examples
///
/// ```
/// use tsmat::application::App;
///
/// let app = App::default();
/// assert_eq!(app.selected_row, 0);
/// assert_eq!(app.selected_col, 0);
/// assert!(app.error_message.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Left input matrix grid
    pub left: Grid,
    /// Right input matrix grid
    pub right: Grid,
    /// Result grid, written only by `compute`
    pub result: Grid,
    /// Accumulated MATLAB export text across computations
    pub matlab_code: String,
    /// LaTeX export text of the latest computation
    pub latex_code: String,
    /// User-visible diagnostic, empty when the last computation succeeded
    pub error_message: String,
    /// Which input grid the selection is on
    pub side: Side,
    /// Currently selected row (zero-based)
    pub selected_row: usize,
    /// Currently selected column (zero-based)
    pub selected_col: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Current input buffer (for editing mode)
    pub input: String,
    /// Cursor position within the input buffer, in characters
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            left: Grid::default(),
            right: Grid::default(),
            result: Grid::default(),
            matlab_code: String::new(),
            latex_code: String::new(),
            error_message: String::new(),
            side: Side::Left,
            selected_row: 0,
            selected_col: 0,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            status_message: None,
            help_scroll: 0,
        }
    }
}

impl App {
    /// The input grid currently holding the selection.
    pub fn selected_grid(&self) -> &Grid {
        match self.side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn selected_grid_mut(&mut self) -> &mut Grid {
        match self.side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_row < MAX_DIM - 1 {
            self.selected_row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.selected_col = self.selected_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected_col < MAX_DIM - 1 {
            self.selected_col += 1;
        }
    }

    /// Moves the selection to the other input grid.
    pub fn switch_side(&mut self) {
        self.side = self.side.toggled();
    }

    /// Switches to editing mode for the currently selected cell.
    ///
    /// Loads the cell's text into the input buffer and positions the
    /// cursor at the end.
    pub fn start_editing(&mut self) {
        self.mode = AppMode::Editing;
        self.input = self
            .selected_grid()
            .get_cell(self.selected_row, self.selected_col)
            .to_string();
        self.cursor_position = self.input.chars().count();
    }

    /// Completes editing and updates the cell with the input content.
    pub fn finish_editing(&mut self) {
        let (row, col) = (self.selected_row, self.selected_col);
        let text = self.input.clone();
        self.selected_grid_mut().set_cell(row, col, &text);
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Cancels editing and returns to normal mode without saving changes.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Empties the currently selected cell.
    pub fn clear_selected_cell(&mut self) {
        let (row, col) = (self.selected_row, self.selected_col);
        self.selected_grid_mut().set_cell(row, col, "");
    }

    // Cursor positions are character counts; cells may hold multi-byte
    // Greek letters.
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_input_char(&mut self, ch: char) {
        let at = self.byte_index();
        self.input.insert(at, ch);
        self.cursor_position += 1;
    }

    pub fn delete_input_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index();
            self.input.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Inserts a palette symbol: into the input buffer at the cursor when
    /// editing, otherwise appended to the selected cell.
    pub fn insert_symbol(&mut self, ch: char) {
        if matches!(self.mode, AppMode::Editing) {
            self.insert_input_char(ch);
        } else {
            let (row, col) = (self.selected_row, self.selected_col);
            let mut text = self
                .selected_grid()
                .get_cell(row, col)
                .to_string();
            text.push(ch);
            self.selected_grid_mut().set_cell(row, col, &text);
        }
    }

    /// Validates both input grids, multiplies, and updates the result
    /// grid and export buffers.
    ///
    /// The result grid is cleared up front so a failed computation never
    /// leaves a stale product visible. On failure the diagnostic message
    /// is set and the export buffers keep their previous contents; on
    /// success the diagnostic clears, the MATLAB text is appended to the
    /// accumulator and the LaTeX text replaced.
    pub fn compute(&mut self) {
        self.result.clear();
        self.status_message = None;

        let left_check = self.left.validate();
        let right_check = self.right.validate();

        match self.run_computation(left_check, right_check) {
            Ok(()) => self.error_message.clear(),
            Err(err) => self.error_message = err.to_string(),
        }
    }

    fn run_computation(
        &mut self,
        left_check: GridValidation,
        right_check: GridValidation,
    ) -> DomainResult<()> {
        match (left_check.is_valid, right_check.is_valid) {
            (false, false) => return Err(DomainError::InvalidLeftAndRightMatrix),
            (false, true) => return Err(DomainError::InvalidLeftMatrix),
            (true, false) => return Err(DomainError::InvalidRightMatrix),
            (true, true) => {}
        }

        // Shape gate before any cell parsing.
        if left_check.rows != right_check.cols || left_check.cols != right_check.rows {
            return Err(DomainError::InvalidDimensions);
        }

        let left = Matrix::from_grid(&self.left, left_check.rows, left_check.cols)?;
        let right = Matrix::from_grid(&self.right, right_check.rows, right_check.cols)?;

        let outcome = multiply_and_export(&left, &right)?;

        if !self.matlab_code.is_empty() {
            self.matlab_code.push('\n');
        }
        self.matlab_code.push_str(&outcome.matlab);
        self.latex_code = outcome.latex;

        for row in 0..outcome.product.rows() {
            for col in 0..outcome.product.cols() {
                self.result
                    .set_cell(row, col, &outcome.product.get(row, col).to_string());
            }
        }

        Ok(())
    }

    /// Clears all three grids, the diagnostic, the status line, and both
    /// export buffers. Idempotent.
    pub fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.result.clear();
        self.error_message.clear();
        self.matlab_code.clear();
        self.latex_code.clear();
        self.status_message = None;
    }

    /// Processes the result of a clipboard copy.
    ///
    /// # Arguments
    ///
    /// * `result` - Outcome of the clipboard operation
    /// * `what` - Label for the copied text ("MATLAB" or "LaTeX")
    pub fn set_copy_result(&mut self, result: Result<(), String>, what: &str) {
        self.status_message = Some(match result {
            Ok(()) => format!("{} code copied to clipboard", what),
            Err(error) => format!("Copy failed: {}", error),
        });
    }
}
