//! Declarative code-unit descriptions.
//!
//! Every catalog field carries one [`CodeUnit`]: an SI prefactor plus small
//! integer exponents over the four scheme base scales, the scale factor `a`
//! (in half steps, so `sqrt(a)` is representable) and the Hubble parameter
//! `h`. A single evaluation routine turns the description into a
//! multiplicative factor; there are no per-field code paths.

use std::fmt;

use crate::cosmology::CosmoContext;
use crate::scheme::UnitScheme;

/// Unit of a simulation quantity, as exponents over the conversion basis.
///
/// The factor for a given scheme and cosmology is
/// `pre * M^mass * L^length * T^time * V^velocity * a^(a_half/2) * h^hubble`
/// where `M, L, T, V` are the scheme base scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeUnit {
    /// SI prefactor (product of the physical constants involved).
    pub pre: f64,
    pub mass: i8,
    pub length: i8,
    pub time: i8,
    pub velocity: i8,
    /// Scale factor exponent in half steps: 2 means one power of `a`.
    pub a_half: i8,
    pub hubble: i8,
}

impl CodeUnit {
    pub const DIMENSIONLESS: CodeUnit = CodeUnit {
        pre: 1.0,
        mass: 0,
        length: 0,
        time: 0,
        velocity: 0,
        a_half: 0,
        hubble: 0,
    };

    /// One power of the scale factor.
    pub const A: CodeUnit = CodeUnit {
        a_half: 2,
        ..CodeUnit::DIMENSIONLESS
    };

    /// Half a power of the scale factor.
    pub const SQRT_A: CodeUnit = CodeUnit {
        a_half: 1,
        ..CodeUnit::DIMENSIONLESS
    };

    pub const fn of_mass(pre: f64) -> Self {
        CodeUnit {
            pre,
            mass: 1,
            ..CodeUnit::DIMENSIONLESS
        }
    }

    pub const fn of_length(pre: f64) -> Self {
        CodeUnit {
            pre,
            length: 1,
            ..CodeUnit::DIMENSIONLESS
        }
    }

    pub const fn of_time(pre: f64) -> Self {
        CodeUnit {
            pre,
            time: 1,
            ..CodeUnit::DIMENSIONLESS
        }
    }

    pub const fn of_velocity(pre: f64) -> Self {
        CodeUnit {
            pre,
            velocity: 1,
            ..CodeUnit::DIMENSIONLESS
        }
    }

    pub const fn mul(self, rhs: Self) -> Self {
        CodeUnit {
            pre: self.pre * rhs.pre,
            mass: self.mass + rhs.mass,
            length: self.length + rhs.length,
            time: self.time + rhs.time,
            velocity: self.velocity + rhs.velocity,
            a_half: self.a_half + rhs.a_half,
            hubble: self.hubble + rhs.hubble,
        }
    }

    pub const fn div(self, rhs: Self) -> Self {
        CodeUnit {
            pre: self.pre / rhs.pre,
            mass: self.mass - rhs.mass,
            length: self.length - rhs.length,
            time: self.time - rhs.time,
            velocity: self.velocity - rhs.velocity,
            a_half: self.a_half - rhs.a_half,
            hubble: self.hubble - rhs.hubble,
        }
    }

    pub const fn powi(self, n: i32) -> Self {
        CodeUnit {
            pre: pow_f64(self.pre, n),
            mass: (self.mass as i32 * n) as i8,
            length: (self.length as i32 * n) as i8,
            time: (self.time as i32 * n) as i8,
            velocity: (self.velocity as i32 * n) as i8,
            a_half: (self.a_half as i32 * n) as i8,
            hubble: (self.hubble as i32 * n) as i8,
        }
    }

    /// Divide by one power of `h`.
    pub const fn per_h(self) -> Self {
        CodeUnit {
            hubble: self.hubble - 1,
            ..self
        }
    }

    /// Multiply by one power of `a` (comoving quantity).
    pub const fn comoving(self) -> Self {
        CodeUnit {
            a_half: self.a_half + 2,
            ..self
        }
    }

    pub const fn is_dimensionless(&self) -> bool {
        self.mass == 0
            && self.length == 0
            && self.time == 0
            && self.velocity == 0
            && self.a_half == 0
            && self.hubble == 0
            && self.pre == 1.0
    }

    /// Evaluate the multiplicative factor for a scheme and cosmology.
    ///
    /// Dimensionless units evaluate to exactly `1.0` for every scheme and
    /// cosmology: `powi(_, 0)` is exactly one, so no rounding can creep in.
    pub fn factor(&self, scheme: UnitScheme, ctx: &CosmoContext) -> f64 {
        let s = scheme.scales();
        self.pre
            * s.mass.powi(self.mass as i32)
            * s.length.powi(self.length as i32)
            * s.time.powi(self.time as i32)
            * s.velocity.powi(self.velocity as i32)
            * half_power(ctx.scale_factor(), self.a_half)
            * ctx.h().powi(self.hubble as i32)
    }
}

/// `a^(half_steps/2)` for `a > 0`.
fn half_power(a: f64, half_steps: i8) -> f64 {
    if half_steps % 2 == 0 {
        a.powi((half_steps / 2) as i32)
    } else {
        a.powi(half_steps as i32).sqrt()
    }
}

// f64::powi is not const; the prefactor exponents are tiny so a loop does.
const fn pow_f64(base: f64, n: i32) -> f64 {
    let m = if n < 0 { -n } else { n };
    let mut acc = 1.0;
    let mut i = 0;
    while i < m {
        acc *= base;
        i += 1;
    }
    if n < 0 { 1.0 / acc } else { acc }
}

impl fmt::Display for CodeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        write!(f, "{:e}", self.pre)?;
        for (sym, exp) in [
            ("M", self.mass),
            ("L", self.length),
            ("T", self.time),
            ("V", self.velocity),
            ("h", self.hubble),
        ] {
            if exp != 0 {
                write!(f, " {sym}^{exp}")?;
            }
        }
        if self.a_half != 0 {
            if self.a_half % 2 == 0 {
                write!(f, " a^{}", self.a_half / 2)?;
            } else {
                write!(f, " a^{}/2", self.a_half)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    fn ctx(a: f64, h: f64) -> CosmoContext {
        CosmoContext::new(a, h).unwrap()
    }

    #[test]
    fn dimensionless_factor_is_exactly_one() {
        let c = ctx(0.3333, 0.704);
        for scheme in UnitScheme::ALL {
            assert_eq!(CodeUnit::DIMENSIONLESS.factor(scheme, &c), 1.0);
        }
    }

    #[test]
    fn comoving_length_matches_hand_written_expression() {
        let c = ctx(0.5, 0.7);
        let ckpc = CodeUnit::of_length(3.086e19).per_h().comoving();
        let got = ckpc.factor(UnitScheme::Si, &c);
        let want = 0.5 * 3.086e19 / 0.7;
        assert!(nearly_equal(got, want, Tolerances::default()));
    }

    #[test]
    fn sqrt_a_factor_uses_exact_sqrt() {
        let c = ctx(0.25, 0.7);
        let v = CodeUnit::of_velocity(1000.0).mul(CodeUnit::SQRT_A);
        // a = 0.25 has an exact square root
        assert_eq!(v.factor(UnitScheme::Si, &c), 1000.0 * 0.5);
    }

    #[test]
    fn powi_cubes_prefactor_and_exponents() {
        let ckpc = CodeUnit::of_length(3.086e19).per_h().comoving();
        let vol = ckpc.powi(3);
        assert_eq!(vol.length, 3);
        assert_eq!(vol.a_half, 6);
        assert_eq!(vol.hubble, -3);
        assert_eq!(vol.pre, 3.086e19 * 3.086e19 * 3.086e19);
    }

    #[test]
    fn negative_powi_inverts() {
        let t = CodeUnit::of_time(2.0).powi(-2);
        assert_eq!(t.time, -2);
        assert_eq!(t.pre, 0.25);
    }

    #[test]
    fn div_cancels_h() {
        let m = CodeUnit::of_mass(1.989e41).per_h();
        let t = CodeUnit::of_time(3.086e16).per_h();
        let rate = m.div(t);
        assert_eq!(rate.hubble, 0);
        assert_eq!(rate.mass, 1);
        assert_eq!(rate.time, -1);
    }

    #[test]
    fn display_reads_like_a_unit() {
        assert_eq!(CodeUnit::DIMENSIONLESS.to_string(), "1");
        let ckpc = CodeUnit::of_length(3.086e19).per_h().comoving();
        let s = ckpc.to_string();
        assert!(s.contains("L^1"));
        assert!(s.contains("h^-1"));
        assert!(s.contains("a^1"));
        let v = CodeUnit::of_velocity(1000.0).mul(CodeUnit::SQRT_A);
        assert!(v.to_string().contains("a^1/2"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn factor_of_product_is_product_of_factors(
            a in 0.01_f64..1.0,
            h in 0.5_f64..0.9,
            pre_x in 0.001_f64..1000.0,
            pre_y in 0.001_f64..1000.0,
        ) {
            let c = CosmoContext::new(a, h).unwrap();
            let x = CodeUnit::of_length(pre_x).per_h().comoving();
            let y = CodeUnit::of_velocity(pre_y).mul(CodeUnit::SQRT_A);
            let combined = x.mul(y).factor(UnitScheme::Cosmology, &c);
            let separate = x.factor(UnitScheme::Cosmology, &c)
                * y.factor(UnitScheme::Cosmology, &c);
            prop_assert!(nearly_equal(combined, separate, Tolerances::default()));
        }

        #[test]
        fn dimensionless_is_one_for_any_cosmology(
            a in 0.001_f64..1.0,
            h in 0.3_f64..1.0,
        ) {
            let c = CosmoContext::new(a, h).unwrap();
            prop_assert_eq!(CodeUnit::DIMENSIONLESS.factor(UnitScheme::Zephyr, &c), 1.0);
        }
    }
}
