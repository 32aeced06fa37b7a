//! Symbolic algebra for matrix entries.
//!
//! Cell contents are kept as expression trees over exact rational
//! constants and named symbols, so a purely numeric computation folds to
//! exact numbers while anything symbolic stays symbolic. Rendering is
//! precedence-aware: the plain-text form re-parses to an equal expression,
//! and the LaTeX form matches what the export text embeds.

use std::fmt;

/// Greek letters offered by the input palette, palette order, with their
/// LaTeX commands. Omicron has no standard LaTeX command and renders as a
/// latin "o".
pub const GREEK_LETTERS: [(char, &str); 24] = [
    ('α', "\\alpha"),
    ('β', "\\beta"),
    ('γ', "\\gamma"),
    ('δ', "\\delta"),
    ('ε', "\\epsilon"),
    ('ζ', "\\zeta"),
    ('η', "\\eta"),
    ('θ', "\\theta"),
    ('ι', "\\iota"),
    ('κ', "\\kappa"),
    ('λ', "\\lambda"),
    ('μ', "\\mu"),
    ('ν', "\\nu"),
    ('ξ', "\\xi"),
    ('ο', "o"),
    ('π', "\\pi"),
    ('ρ', "\\rho"),
    ('σ', "\\sigma"),
    ('τ', "\\tau"),
    ('υ', "\\upsilon"),
    ('φ', "\\phi"),
    ('χ', "\\chi"),
    ('ψ', "\\psi"),
    ('ω', "\\omega"),
];

/// An exact rational constant. Invariants: always reduced, denominator
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    num: i64,
    den: i64,
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl Rational {
    /// Builds a reduced rational. Callers guarantee `den != 0`.
    fn reduced(num: i64, den: i64) -> Self {
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num, den).max(1);
        Self {
            num: sign * num / g,
            den: sign * den / g,
        }
    }

    pub fn integer(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    /// Exact value of a decimal literal split at the point: `"3"`, `"5"`
    /// becomes 7/2. Returns `None` when the digits overflow an `i64`.
    pub fn from_decimal(int_part: &str, frac_part: &str) -> Option<Self> {
        let mut num: i64 = int_part.parse().ok()?;
        let mut den: i64 = 1;
        for ch in frac_part.chars() {
            let digit = ch.to_digit(10)? as i64;
            num = num.checked_mul(10)?.checked_add(digit)?;
            den = den.checked_mul(10)?;
        }
        Some(Self::reduced(num, den))
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn den(&self) -> i64 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_one(&self) -> bool {
        self.num == 1 && self.den == 1
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den,
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::reduced(self.num * other.den + other.num * self.den, self.den * other.den)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::reduced(self.num * other.num, self.den * other.den)
    }

    /// `None` when dividing by zero.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            None
        } else {
            Some(Self::reduced(self.num * other.den, self.den * other.num))
        }
    }

    /// Integer power, `None` on 0^negative or i64 overflow.
    pub fn checked_pow(&self, exp: i64) -> Option<Self> {
        let magnitude = u32::try_from(exp.unsigned_abs()).ok()?;
        let num = self.num.checked_pow(magnitude)?;
        let den = self.den.checked_pow(magnitude)?;
        if exp >= 0 {
            Some(Self::reduced(num, den))
        } else if num == 0 {
            None
        } else {
            Some(Self::reduced(den, num))
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// A symbolic expression over rationals and named variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Rational),
    Symbol(String),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Expr {
    pub fn integer(n: i64) -> Self {
        Expr::Number(Rational::integer(n))
    }

    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(name.to_string())
    }

    /// Constant folding over exact rationals plus identity elimination.
    ///
    /// Rules: numeric subtrees collapse to a single `Number`; `x+0`, `0+x`,
    /// `x-0`, `1*x`, `x*1`, `x/1` drop the identity; `0*x`, `x*0`, `0/x`
    /// collapse to zero; `x^0` is 1, `x^1` is x, `0^x` is 0, `1^x` is 1.
    /// Division by a zero constant and overflowing powers are left
    /// unevaluated rather than failing.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Number(a), Expr::Number(b)) => Expr::Number(a.add(b)),
                    (Expr::Number(a), _) if a.is_zero() => rhs,
                    (_, Expr::Number(b)) if b.is_zero() => lhs,
                    _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                // Normal form: a - b becomes a + (-1)*b, so subtraction
                // introduced by rendering and re-parsing converges to the
                // same tree.
                Expr::Add(
                    lhs.clone(),
                    Box::new(Expr::Mul(Box::new(Expr::integer(-1)), rhs.clone())),
                )
                .simplify()
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Number(a), Expr::Number(b)) => Expr::Number(a.mul(b)),
                    (Expr::Number(a), _) if a.is_zero() => Expr::integer(0),
                    (_, Expr::Number(b)) if b.is_zero() => Expr::integer(0),
                    (Expr::Number(a), _) if a.is_one() => rhs,
                    (_, Expr::Number(b)) if b.is_one() => lhs,
                    _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Number(a), Expr::Number(b)) => match a.checked_div(b) {
                        Some(q) => Expr::Number(q),
                        None => Expr::Div(Box::new(lhs), Box::new(rhs)),
                    },
                    (Expr::Number(a), _) if a.is_zero() => Expr::integer(0),
                    (_, Expr::Number(b)) if b.is_one() => lhs,
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify();
                let exp = exp.simplify();
                match (&base, &exp) {
                    (Expr::Number(a), Expr::Number(b)) if b.is_integer() => {
                        match a.checked_pow(b.num()) {
                            Some(p) => Expr::Number(p),
                            None => Expr::Pow(Box::new(base), Box::new(exp)),
                        }
                    }
                    (_, Expr::Number(b)) if b.is_zero() => Expr::integer(1),
                    (_, Expr::Number(b)) if b.is_one() => base,
                    (Expr::Number(a), _) if a.is_zero() => Expr::integer(0),
                    (Expr::Number(a), _) if a.is_one() => Expr::integer(1),
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
        }
    }

    /// Binding strength for rendering. A negative constant binds like a
    /// sum so it picks up parentheses anywhere tighter context needs them.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Pow(..) => 3,
            Expr::Number(n) if n.is_negative() => 1,
            Expr::Number(_) | Expr::Symbol(_) => 4,
        }
    }

    /// Splits a product with a negative constant head into its positive
    /// remainder, so `(-3)*x` renders as `-3*x` and `(-1)*x` as `-x`.
    fn negated_product(&self) -> Option<Expr> {
        if let Expr::Mul(lhs, rhs) = self {
            if let Expr::Number(n) = lhs.as_ref() {
                if n.is_negative() {
                    return Some(if n.abs().is_one() {
                        rhs.as_ref().clone()
                    } else {
                        Expr::Mul(Box::new(Expr::Number(n.abs())), rhs.clone())
                    });
                }
            }
        }
        None
    }

    /// The positive form a summand renders behind a minus sign, if any.
    fn negated_term(&self) -> Option<Expr> {
        match self {
            Expr::Number(n) if n.is_negative() => Some(Expr::Number(n.abs())),
            other => other.negated_product(),
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        let parens = self.effective_precedence() < min_prec;
        if parens {
            write!(f, "(")?;
        }
        match self {
            Expr::Number(n) => write!(f, "{}", n)?,
            Expr::Symbol(name) => write!(f, "{}", name)?,
            Expr::Add(lhs, rhs) => {
                lhs.fmt_prec(f, 1)?;
                // A negative right operand folds into a subtraction.
                match rhs.negated_term() {
                    Some(positive) => {
                        write!(f, " - ")?;
                        positive.fmt_prec(f, 2)?;
                    }
                    None => {
                        write!(f, " + ")?;
                        rhs.fmt_prec(f, 2)?;
                    }
                }
            }
            Expr::Sub(lhs, rhs) => {
                lhs.fmt_prec(f, 1)?;
                write!(f, " - ")?;
                rhs.fmt_prec(f, 2)?;
            }
            Expr::Mul(lhs, rhs) => match self.negated_product() {
                Some(positive) => {
                    write!(f, "-")?;
                    positive.fmt_prec(f, 2)?;
                }
                None => {
                    lhs.fmt_prec(f, 2)?;
                    write!(f, "*")?;
                    rhs.fmt_prec(f, 3)?;
                }
            },
            Expr::Div(lhs, rhs) => {
                lhs.fmt_prec(f, 2)?;
                write!(f, "/")?;
                rhs.fmt_prec(f, 3)?;
            }
            Expr::Pow(base, exp) => {
                base.fmt_prec(f, 4)?;
                write!(f, "^")?;
                exp.fmt_prec(f, 3)?;
            }
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }

    /// A product rendered with a leading minus binds like a sum.
    fn effective_precedence(&self) -> u8 {
        if self.negated_product().is_some() {
            1
        } else {
            self.precedence()
        }
    }

    /// LaTeX rendering of the expression, sympy-flavored: rationals as
    /// `\frac`, Greek symbols as commands, products by juxtaposition.
    pub fn to_latex(&self) -> String {
        self.latex_prec(0)
    }

    fn latex_prec(&self, min_prec: u8) -> String {
        let body = match self {
            Expr::Number(n) => {
                if n.is_integer() {
                    format!("{}", n.num())
                } else if n.is_negative() {
                    format!("- \\frac{{{}}}{{{}}}", n.num().abs(), n.den())
                } else {
                    format!("\\frac{{{}}}{{{}}}", n.num(), n.den())
                }
            }
            Expr::Symbol(name) => symbol_to_latex(name),
            Expr::Add(lhs, rhs) => match rhs.negated_term() {
                Some(positive) => {
                    format!("{} - {}", lhs.latex_prec(1), positive.latex_prec(2))
                }
                None => format!("{} + {}", lhs.latex_prec(1), rhs.latex_prec(2)),
            },
            Expr::Sub(lhs, rhs) => {
                format!("{} - {}", lhs.latex_prec(1), rhs.latex_prec(2))
            }
            Expr::Mul(lhs, rhs) => match self.negated_product() {
                Some(positive) => format!("- {}", positive.latex_prec(2)),
                None => {
                    // Juxtaposition unless the right factor is a bare
                    // number, where "2 3" would be unreadable.
                    let sep = if matches!(rhs.as_ref(), Expr::Number(_)) {
                        " \\cdot "
                    } else {
                        " "
                    };
                    format!("{}{}{}", lhs.latex_prec(2), sep, rhs.latex_prec(3))
                }
            },
            Expr::Div(lhs, rhs) => {
                format!("\\frac{{{}}}{{{}}}", lhs.latex_prec(0), rhs.latex_prec(0))
            }
            Expr::Pow(base, exp) => {
                format!("{}^{{{}}}", base.latex_prec(4), exp.latex_prec(0))
            }
        };
        self.wrap(body, min_prec)
    }

    fn wrap(&self, body: String, min_prec: u8) -> String {
        if self.effective_precedence() < min_prec {
            format!("\\left({}\\right)", body)
        } else {
            body
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

fn symbol_to_latex(name: &str) -> String {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if let Some((_, command)) = GREEK_LETTERS.iter().find(|(letter, _)| *letter == ch) {
            return (*command).to_string();
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_reduction() {
        let half = Rational::integer(2).checked_div(&Rational::integer(4)).unwrap();
        assert_eq!(half, Rational { num: 1, den: 2 });
        assert_eq!(half.to_string(), "1/2");

        let neg = Rational::integer(3).checked_div(&Rational::integer(-6)).unwrap();
        assert_eq!(neg, Rational { num: -1, den: 2 });
        assert_eq!(neg.to_string(), "-1/2");
    }

    #[test]
    fn test_rational_from_decimal() {
        assert_eq!(Rational::from_decimal("3", "5").unwrap().to_string(), "7/2");
        assert_eq!(Rational::from_decimal("2", "").unwrap(), Rational::integer(2));
        assert_eq!(Rational::from_decimal("0", "25").unwrap().to_string(), "1/4");
    }

    #[test]
    fn test_rational_arithmetic_is_exact() {
        let third = Rational::integer(1).checked_div(&Rational::integer(3)).unwrap();
        let sum = third.add(&third).add(&third);
        assert!(sum.is_one());
    }

    #[test]
    fn test_rational_division_by_zero() {
        assert!(Rational::integer(1).checked_div(&Rational::integer(0)).is_none());
    }

    #[test]
    fn test_rational_pow() {
        assert_eq!(Rational::integer(2).checked_pow(3).unwrap(), Rational::integer(8));
        assert_eq!(
            Rational::integer(2).checked_pow(-2).unwrap().to_string(),
            "1/4"
        );
        assert!(Rational::integer(0).checked_pow(-1).is_none());
        assert!(Rational::integer(10).checked_pow(100).is_none());
    }

    #[test]
    fn test_simplify_constant_folding() {
        let expr = Expr::integer(2) * Expr::integer(3) + Expr::integer(4);
        assert_eq!(expr.simplify(), Expr::integer(10));

        let pow = Expr::Pow(Box::new(Expr::integer(2)), Box::new(Expr::integer(3)));
        assert_eq!(pow.simplify(), Expr::integer(8));
    }

    #[test]
    fn test_simplify_identities() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");

        let zero_times = Expr::integer(0) * x.clone() + Expr::integer(1) * y.clone();
        assert_eq!(zero_times.simplify(), y);

        let plus_zero = x.clone() + Expr::integer(0);
        assert_eq!(plus_zero.simplify(), x);

        let pow_one = Expr::Pow(Box::new(x.clone()), Box::new(Expr::integer(1)));
        assert_eq!(pow_one.simplify(), x);

        let pow_zero = Expr::Pow(Box::new(x.clone()), Box::new(Expr::integer(0)));
        assert_eq!(pow_zero.simplify(), Expr::integer(1));
    }

    #[test]
    fn test_simplify_keeps_symbolic_division() {
        let x = Expr::symbol("x");
        let div = Expr::Div(Box::new(x.clone()), Box::new(Expr::integer(1)));
        assert_eq!(div.simplify(), x);

        // Division by a zero constant stays unevaluated instead of failing.
        let bad = Expr::Div(Box::new(Expr::integer(1)), Box::new(Expr::integer(0)));
        assert_eq!(bad.simplify(), bad);
    }

    #[test]
    fn test_display_precedence() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");

        let sum_product = x.clone() * y.clone() + Expr::integer(3);
        assert_eq!(sum_product.to_string(), "x*y + 3");

        let product_of_sum = (x.clone() + Expr::integer(1)) * y.clone();
        assert_eq!(product_of_sum.to_string(), "(x + 1)*y");

        let pow = Expr::Pow(
            Box::new(x.clone() + y.clone()),
            Box::new(Expr::integer(2)),
        );
        assert_eq!(pow.to_string(), "(x + y)^2");
    }

    #[test]
    fn test_display_negative_factors() {
        let x = Expr::symbol("x");

        let neg_x = Expr::integer(-1) * x.clone();
        assert_eq!(neg_x.to_string(), "-x");

        let neg_three_x = Expr::integer(-3) * x.clone();
        assert_eq!(neg_three_x.to_string(), "-3*x");

        let sub = Expr::symbol("y") + Expr::integer(-1) * x.clone();
        assert_eq!(sub.to_string(), "y - x");

        let plus_negative = Expr::symbol("y") + Expr::integer(-2);
        assert_eq!(plus_negative.to_string(), "y - 2");
    }

    #[test]
    fn test_latex_rendering() {
        let half = Expr::Number(Rational::from_decimal("0", "5").unwrap());
        assert_eq!(half.to_latex(), "\\frac{1}{2}");

        let alpha = Expr::symbol("α");
        assert_eq!(alpha.to_latex(), "\\alpha");

        let product = Expr::integer(2) * Expr::symbol("x");
        assert_eq!(product.to_latex(), "2 x");

        let pow = Expr::Pow(Box::new(Expr::symbol("x")), Box::new(Expr::integer(2)));
        assert_eq!(pow.to_latex(), "x^{2}");

        let sum = Expr::symbol("a") * Expr::symbol("c") + Expr::symbol("b") * Expr::symbol("d");
        assert_eq!(sum.to_latex(), "a c + b d");
    }

    #[test]
    fn test_greek_table_covers_alphabet() {
        assert_eq!(GREEK_LETTERS.len(), 24);
        assert_eq!(GREEK_LETTERS[0].0, 'α');
        assert_eq!(GREEK_LETTERS[23].0, 'ω');
    }
}
