//! Constant expression folding.
//!
//! A small evaluator for the constant expressions that reach the type
//! layer, chiefly array lengths. Integer arithmetic wraps the way a
//! conversion to the target width would; adjacent string constants
//! concatenate.

/// A constant expression. [`Const::fold`] reduces it to a leaf.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Const {
    Int(i64),
    Str(Box<str>),
    Add(Box<Const>, Box<Const>),
    Sub(Box<Const>, Box<Const>),
    Mul(Box<Const>, Box<Const>),
    /// Conversion of an integer constant to a representable width.
    Truncate {
        value: Box<Const>,
        bits: u32,
        signed: bool,
    },
    /// Anything the evaluator cannot reduce.
    Unknown,
}

impl Const {
    /// Evaluate to a leaf ([`Const::Int`], [`Const::Str`], or
    /// [`Const::Unknown`]). Mixed-kind or unreducible operands yield
    /// [`Const::Unknown`], never a panic.
    pub fn fold(&self) -> Const {
        match self {
            Const::Int(_) | Const::Str(_) | Const::Unknown => self.clone(),
            Const::Add(a, b) => match (a.fold(), b.fold()) {
                (Const::Int(x), Const::Int(y)) => {
                    x.checked_add(y).map_or(Const::Unknown, Const::Int)
                }
                (Const::Str(x), Const::Str(y)) => {
                    let mut s = String::with_capacity(x.len() + y.len());
                    s.push_str(&x);
                    s.push_str(&y);
                    Const::Str(s.into_boxed_str())
                }
                _ => Const::Unknown,
            },
            Const::Sub(a, b) => match (a.fold(), b.fold()) {
                (Const::Int(x), Const::Int(y)) => {
                    x.checked_sub(y).map_or(Const::Unknown, Const::Int)
                }
                _ => Const::Unknown,
            },
            Const::Mul(a, b) => match (a.fold(), b.fold()) {
                (Const::Int(x), Const::Int(y)) => {
                    x.checked_mul(y).map_or(Const::Unknown, Const::Int)
                }
                _ => Const::Unknown,
            },
            Const::Truncate {
                value,
                bits,
                signed,
            } => match value.fold() {
                Const::Int(x) => Const::Int(truncate(x, *bits, *signed)),
                _ => Const::Unknown,
            },
        }
    }
}

/// Reinterpret the low `bits` of `x` as a signed or unsigned value.
fn truncate(x: i64, bits: u32, signed: bool) -> i64 {
    assert!(bits > 0 && bits <= 64, "invalid integer width {bits}");
    if bits == 64 {
        return x;
    }
    let mask = (1u64 << bits) - 1;
    let low = (x as u64) & mask;
    if signed && low & (1u64 << (bits - 1)) != 0 {
        (low | !mask) as i64
    } else {
        low as i64
    }
}
