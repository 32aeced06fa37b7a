use super::algebra::Expr;
use super::errors::{DomainError, DomainResult};
use super::parser::parse_expression;

/// Maximum rows/columns of an input grid.
pub const MAX_DIM: usize = 5;

/// A fixed 5×5 grid of text cells, addressed (row, col) zero-indexed.
/// Cell text is trimmed on write; out-of-range addresses read as empty
/// and ignore writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: [[String; MAX_DIM]; MAX_DIM],
}

/// Result triple of the shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridValidation {
    pub rows: usize,
    pub cols: usize,
    pub is_valid: bool,
}

impl Grid {
    pub fn get_cell(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = text.trim().to_string();
        }
    }

    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.clear();
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Determines whether the grid holds a well-formed matrix and its
    /// dimensions.
    ///
    /// The grid is expected to hold a contiguous rectangle anchored at the
    /// top-left. An empty anchor cell (0,0) means the grid is absent:
    /// `(0, 0, false)`. Otherwise the row count is the number of rows with
    /// a filled first cell and the column count the number of columns with
    /// a filled first row; every row containing data must then hold
    /// exactly that many cells, and the number of such rows must match the
    /// row count. On mismatch the computed dimensions are still returned
    /// for diagnostics.
    ///
    /// Total over its input: never panics, always returns a triple.
    pub fn validate(&self) -> GridValidation {
        if self.cells[0][0].is_empty() {
            return GridValidation {
                rows: 0,
                cols: 0,
                is_valid: false,
            };
        }

        let rows = (0..MAX_DIM).filter(|&i| !self.cells[i][0].is_empty()).count();
        let cols = (0..MAX_DIM).filter(|&j| !self.cells[0][j].is_empty()).count();

        let mut active_rows = 0;
        for row in 0..MAX_DIM {
            let filled = (0..MAX_DIM)
                .filter(|&col| !self.cells[row][col].is_empty())
                .count();
            if filled > 0 {
                if filled != cols {
                    return GridValidation {
                        rows,
                        cols,
                        is_valid: false,
                    };
                }
                active_rows += 1;
            }
        }

        GridValidation {
            rows,
            cols,
            is_valid: active_rows == rows,
        }
    }
}

/// A validated matrix of parsed cell expressions, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    entries: Vec<Expr>,
}

impl Matrix {
    /// Parses the top-left `rows`×`cols` rectangle of a grid into a
    /// matrix. A cell that fails to parse yields
    /// [`DomainError::InvalidExpression`] with its position.
    pub fn from_grid(grid: &Grid, rows: usize, cols: usize) -> DomainResult<Self> {
        let mut entries = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let text = grid.get_cell(row, col);
                let expr = parse_expression(text).map_err(|_| DomainError::InvalidExpression {
                    row,
                    col,
                    input: text.to_string(),
                })?;
                entries.push(expr);
            }
        }
        Ok(Self { rows, cols, entries })
    }

    /// Builds a matrix from already-parsed rows. Rows must be non-empty
    /// and rectangular.
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> Self {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        let entries = rows.into_iter().flatten().collect();
        Self {
            rows: row_count,
            cols: col_count,
            entries,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &Expr {
        &self.entries[row * self.cols + col]
    }

    /// Standard matrix product with symbolic entries:
    /// `Product[i][j] = Σ_k self[i][k] * other[k][j]`, each entry
    /// simplified. Callers guarantee `self.cols == other.rows`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let mut entries = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum: Option<Expr> = None;
                for k in 0..self.cols {
                    let term = self.get(i, k).clone() * other.get(k, j).clone();
                    sum = Some(match sum {
                        Some(acc) => acc + term,
                        None => term,
                    });
                }
                let entry = sum.unwrap_or_else(|| Expr::integer(0));
                entries.push(entry.simplify());
            }
        }
        Matrix {
            rows: self.rows,
            cols: other.cols,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_grid(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::default();
        for row in 0..rows {
            for col in 0..cols {
                grid.set_cell(row, col, &format!("{}", row * cols + col + 1));
            }
        }
        grid
    }

    #[test]
    fn test_empty_anchor_means_absent() {
        let grid = Grid::default();
        assert_eq!(
            grid.validate(),
            GridValidation { rows: 0, cols: 0, is_valid: false }
        );

        // Data elsewhere does not rescue an empty anchor.
        let mut grid = Grid::default();
        grid.set_cell(1, 1, "7");
        assert_eq!(
            grid.validate(),
            GridValidation { rows: 0, cols: 0, is_valid: false }
        );
    }

    #[test]
    fn test_single_cell_is_one_by_one() {
        let mut grid = Grid::default();
        grid.set_cell(0, 0, "x");
        assert_eq!(
            grid.validate(),
            GridValidation { rows: 1, cols: 1, is_valid: true }
        );
    }

    #[test]
    fn test_full_rectangles_validate() {
        for (rows, cols) in [(1, 3), (2, 2), (3, 2), (5, 5)] {
            let grid = filled_grid(rows, cols);
            assert_eq!(
                grid.validate(),
                GridValidation { rows, cols, is_valid: true },
                "{}x{}",
                rows,
                cols
            );
        }
    }

    #[test]
    fn test_hole_invalidates_but_keeps_dimensions() {
        let mut grid = filled_grid(2, 3);
        grid.set_cell(1, 1, "");
        assert_eq!(
            grid.validate(),
            GridValidation { rows: 2, cols: 3, is_valid: false }
        );
    }

    #[test]
    fn test_extra_row_outside_anchor_column_invalidates() {
        let mut grid = filled_grid(2, 2);
        // Row 2 has data but its anchor cell (2,0) is empty, so the row
        // count stays 2 while the row is active with the wrong width.
        grid.set_cell(2, 1, "9");
        assert_eq!(
            grid.validate(),
            GridValidation { rows: 2, cols: 2, is_valid: false }
        );
    }

    #[test]
    fn test_cells_are_trimmed() {
        let mut grid = Grid::default();
        grid.set_cell(0, 0, "  2*x  ");
        assert_eq!(grid.get_cell(0, 0), "2*x");

        grid.set_cell(0, 0, "   ");
        assert_eq!(grid.get_cell(0, 0), "");
        assert!(grid.is_empty());
    }

    #[test]
    fn test_out_of_range_access_is_harmless() {
        let mut grid = Grid::default();
        grid.set_cell(9, 9, "ignored");
        assert_eq!(grid.get_cell(9, 9), "");
        assert!(grid.is_empty());
    }

    #[test]
    fn test_from_grid_reports_bad_cell() {
        let mut grid = filled_grid(2, 2);
        grid.set_cell(1, 0, "2+");
        let err = Matrix::from_grid(&grid, 2, 2).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidExpression {
                row: 1,
                col: 0,
                input: "2+".to_string()
            }
        );
    }

    #[test]
    fn test_numeric_product() {
        let left = Matrix::from_rows(vec![
            vec![Expr::integer(1), Expr::integer(2)],
            vec![Expr::integer(3), Expr::integer(4)],
        ]);
        let right = Matrix::from_rows(vec![
            vec![Expr::integer(5), Expr::integer(6)],
            vec![Expr::integer(7), Expr::integer(8)],
        ]);

        let product = left.multiply(&right);
        assert_eq!(product.rows(), 2);
        assert_eq!(product.cols(), 2);
        let expected = [[19, 22], [43, 50]];
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(*product.get(i, j), Expr::integer(expected[i][j]));
            }
        }
    }

    #[test]
    fn test_symbolic_product_keeps_sum_of_products() {
        let left = Matrix::from_rows(vec![vec![Expr::symbol("a"), Expr::symbol("b")]]);
        let right = Matrix::from_rows(vec![vec![Expr::symbol("c")], vec![Expr::symbol("d")]]);

        let product = left.multiply(&right);
        assert_eq!(product.rows(), 1);
        assert_eq!(product.cols(), 1);
        assert_eq!(product.get(0, 0).to_string(), "a*c + b*d");
    }

    #[test]
    fn test_product_folds_identities() {
        let left = Matrix::from_rows(vec![vec![Expr::integer(0), Expr::integer(1)]]);
        let right = Matrix::from_rows(vec![vec![Expr::symbol("x")], vec![Expr::symbol("y")]]);

        let product = left.multiply(&right);
        assert_eq!(*product.get(0, 0), Expr::symbol("y"));
    }
}
