//! Matrix multiplication and export services.
//!
//! This module provides the computation behind the compute command: the
//! dimension compatibility check, the symbolic matrix product, and the
//! MATLAB/LaTeX renderings of one computation.

use super::errors::{DomainError, DomainResult};
use super::models::Matrix;

/// One completed computation: the product plus both export renderings.
#[derive(Debug, Clone, PartialEq)]
pub struct Multiplication {
    pub product: Matrix,
    pub matlab: String,
    pub latex: String,
}

/// Whether two validated matrices may be multiplied.
///
/// The rule is deliberately stricter than the conventional
/// inner-dimension check: the left matrix's rows must equal the right
/// matrix's columns AND the left's columns the right's rows, i.e. the
/// shapes must be mutual transposes. See DESIGN.md before changing it.
pub fn dimensions_compatible(left: &Matrix, right: &Matrix) -> bool {
    left.rows() == right.cols() && left.cols() == right.rows()
}

/// Multiplies two validated matrices and renders the computation.
///
/// The product is always `left * right`, matching the exported
/// `M_Res = M_L * M_R` trailer. Incompatible shapes yield
/// [`DomainError::InvalidDimensions`].
///
/// # Examples
///
/// ```
/// use tsmat::domain::{multiply_and_export, Expr, Matrix};
///
/// let left = Matrix::from_rows(vec![
///     vec![Expr::integer(1), Expr::integer(2)],
///     vec![Expr::integer(3), Expr::integer(4)],
/// ]);
/// let right = Matrix::from_rows(vec![
///     vec![Expr::integer(5), Expr::integer(6)],
///     vec![Expr::integer(7), Expr::integer(8)],
/// ]);
///
/// let result = multiply_and_export(&left, &right).unwrap();
/// assert_eq!(result.product.get(0, 0).to_string(), "19");
/// assert!(result.matlab.ends_with("M_Res = M_L * M_R"));
/// ```
pub fn multiply_and_export(left: &Matrix, right: &Matrix) -> DomainResult<Multiplication> {
    if !dimensions_compatible(left, right) {
        return Err(DomainError::InvalidDimensions);
    }

    let product = left.multiply(right);
    let matlab = matlab_block(left, right);
    let latex = latex_equation(left, right, &product);

    Ok(Multiplication {
        product,
        matlab,
        latex,
    })
}

/// MATLAB text for one computation:
///
/// ```text
/// M_L = [1 2; 3 4];
/// M_R = [5 6; 7 8];
/// M_Res = M_L * M_R
/// ```
///
/// Entries are space-separated within a row, rows joined by `; `, and the
/// trailer is fixed.
pub fn matlab_block(left: &Matrix, right: &Matrix) -> String {
    let mut block = matlab_matrix("M_L", left);
    block.push_str(&matlab_matrix("M_R", right));
    block.push_str("M_Res = M_L * M_R");
    block
}

fn matlab_matrix(name: &str, matrix: &Matrix) -> String {
    let mut text = format!("{} = [", name);
    for row in 0..matrix.rows() {
        let entries: Vec<String> = (0..matrix.cols())
            .map(|col| matrix.get(row, col).to_string())
            .collect();
        text.push_str(&entries.join(" "));
        if row < matrix.rows() - 1 {
            text.push_str("; ");
        }
    }
    text.push_str("];\n");
    text
}

/// LaTeX text for one computation: the three matrices joined by literal
/// `$\times$` and `$=$` separators, each rendered as a bare
/// `\left[\begin{matrix}…\end{matrix}\right]` with no outer environment.
pub fn latex_equation(left: &Matrix, right: &Matrix, product: &Matrix) -> String {
    format!(
        "{}$\\times${}$=${}",
        latex_matrix(left),
        latex_matrix(right),
        latex_matrix(product)
    )
}

fn latex_matrix(matrix: &Matrix) -> String {
    let rows: Vec<String> = (0..matrix.rows())
        .map(|row| {
            (0..matrix.cols())
                .map(|col| matrix.get(row, col).to_latex())
                .collect::<Vec<String>>()
                .join(" & ")
        })
        .collect();
    format!(
        "\\left[\\begin{{matrix}}{}\\end{{matrix}}\\right]",
        rows.join("\\\\")
    )
}
