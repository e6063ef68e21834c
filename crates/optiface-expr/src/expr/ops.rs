//! Operator overloads for variable handles and functions.
//!
//! Sums stay affine until a quadratic operand appears. Products of two
//! affine operands expand into a quadratic function.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::expr::affine::ScalarAffineFunction;
use crate::expr::builder::ExprBuilder;
use crate::expr::quadratic::ScalarQuadraticFunction;
use crate::expr::sum::Summand;
use crate::ids::VariableIndex;

macro_rules! impl_sum_ops {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {$(
        impl Add<$rhs> for $lhs {
            type Output = $out;

            fn add(self, rhs: $rhs) -> $out {
                let mut builder = ExprBuilder::new();
                self.add_to(&mut builder, 1.0);
                rhs.add_to(&mut builder, 1.0);
                <$out>::from_builder(&builder)
            }
        }

        impl Sub<$rhs> for $lhs {
            type Output = $out;

            fn sub(self, rhs: $rhs) -> $out {
                let mut builder = ExprBuilder::new();
                self.add_to(&mut builder, 1.0);
                rhs.add_to(&mut builder, -1.0);
                <$out>::from_builder(&builder)
            }
        }
    )*};
}

impl_sum_ops! {
    VariableIndex, VariableIndex => ScalarAffineFunction;
    VariableIndex, f64 => ScalarAffineFunction;
    f64, VariableIndex => ScalarAffineFunction;
    VariableIndex, ScalarAffineFunction => ScalarAffineFunction;
    ScalarAffineFunction, VariableIndex => ScalarAffineFunction;
    ScalarAffineFunction, ScalarAffineFunction => ScalarAffineFunction;
    ScalarAffineFunction, f64 => ScalarAffineFunction;
    f64, ScalarAffineFunction => ScalarAffineFunction;
    ScalarQuadraticFunction, ScalarQuadraticFunction => ScalarQuadraticFunction;
    ScalarQuadraticFunction, ScalarAffineFunction => ScalarQuadraticFunction;
    ScalarAffineFunction, ScalarQuadraticFunction => ScalarQuadraticFunction;
    ScalarQuadraticFunction, VariableIndex => ScalarQuadraticFunction;
    VariableIndex, ScalarQuadraticFunction => ScalarQuadraticFunction;
    ScalarQuadraticFunction, f64 => ScalarQuadraticFunction;
    f64, ScalarQuadraticFunction => ScalarQuadraticFunction;
}

// ── Scalar products ─────────────────────────────────────────

impl Mul<f64> for VariableIndex {
    type Output = ScalarAffineFunction;

    fn mul(self, rhs: f64) -> ScalarAffineFunction {
        ScalarAffineFunction::term(self, rhs)
    }
}

impl Mul<VariableIndex> for f64 {
    type Output = ScalarAffineFunction;

    fn mul(self, rhs: VariableIndex) -> ScalarAffineFunction {
        ScalarAffineFunction::term(rhs, self)
    }
}

impl Mul<f64> for ScalarAffineFunction {
    type Output = ScalarAffineFunction;

    fn mul(self, rhs: f64) -> ScalarAffineFunction {
        self.scale(rhs)
    }
}

impl Mul<ScalarAffineFunction> for f64 {
    type Output = ScalarAffineFunction;

    fn mul(self, rhs: ScalarAffineFunction) -> ScalarAffineFunction {
        rhs.scale(self)
    }
}

impl Mul<f64> for ScalarQuadraticFunction {
    type Output = ScalarQuadraticFunction;

    fn mul(self, rhs: f64) -> ScalarQuadraticFunction {
        self.scale(rhs)
    }
}

impl Mul<ScalarQuadraticFunction> for f64 {
    type Output = ScalarQuadraticFunction;

    fn mul(self, rhs: ScalarQuadraticFunction) -> ScalarQuadraticFunction {
        rhs.scale(self)
    }
}

impl Div<f64> for ScalarAffineFunction {
    type Output = ScalarAffineFunction;

    fn div(self, rhs: f64) -> ScalarAffineFunction {
        self.scale(rhs.recip())
    }
}

impl Div<f64> for ScalarQuadraticFunction {
    type Output = ScalarQuadraticFunction;

    fn div(self, rhs: f64) -> ScalarQuadraticFunction {
        self.scale(rhs.recip())
    }
}

// ── Affine products ─────────────────────────────────────────

fn product(left: &ScalarAffineFunction, right: &ScalarAffineFunction) -> ScalarQuadraticFunction {
    let mut builder = ExprBuilder::new();
    builder.add_product(left, right);
    ScalarQuadraticFunction::from_builder(&builder)
}

impl Mul<VariableIndex> for VariableIndex {
    type Output = ScalarQuadraticFunction;

    fn mul(self, rhs: VariableIndex) -> ScalarQuadraticFunction {
        ScalarQuadraticFunction::product(self, rhs)
    }
}

impl Mul<ScalarAffineFunction> for VariableIndex {
    type Output = ScalarQuadraticFunction;

    fn mul(self, rhs: ScalarAffineFunction) -> ScalarQuadraticFunction {
        product(&ScalarAffineFunction::var(self), &rhs)
    }
}

impl Mul<VariableIndex> for ScalarAffineFunction {
    type Output = ScalarQuadraticFunction;

    fn mul(self, rhs: VariableIndex) -> ScalarQuadraticFunction {
        product(&self, &ScalarAffineFunction::var(rhs))
    }
}

impl Mul<ScalarAffineFunction> for ScalarAffineFunction {
    type Output = ScalarQuadraticFunction;

    fn mul(self, rhs: ScalarAffineFunction) -> ScalarQuadraticFunction {
        product(&self, &rhs)
    }
}

// ── Negation ────────────────────────────────────────────────

impl Neg for VariableIndex {
    type Output = ScalarAffineFunction;

    fn neg(self) -> ScalarAffineFunction {
        ScalarAffineFunction::term(self, -1.0)
    }
}

impl Neg for ScalarAffineFunction {
    type Output = ScalarAffineFunction;

    fn neg(self) -> ScalarAffineFunction {
        self.scale(-1.0)
    }
}

impl Neg for ScalarQuadraticFunction {
    type Output = ScalarQuadraticFunction;

    fn neg(self) -> ScalarQuadraticFunction {
        self.scale(-1.0)
    }
}

// ── In-place builder updates ────────────────────────────────

impl<S: Summand> AddAssign<S> for ExprBuilder {
    fn add_assign(&mut self, rhs: S) {
        rhs.add_to(self, 1.0);
    }
}

impl<S: Summand> SubAssign<S> for ExprBuilder {
    fn sub_assign(&mut self, rhs: S) {
        rhs.add_to(self, -1.0);
    }
}

impl MulAssign<f64> for ExprBuilder {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale(rhs);
    }
}
