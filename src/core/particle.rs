use crate::core::geometry::{norm, norm_sq, Vec2, DIM};
use crate::error::{Error, Result};

/// Display-only RGB marker carried by every particle.
///
/// The engine scales it whenever a particle takes part in a collision; physics never
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Applied after a particle-particle collision (shifts toward blue).
    pub const PARTICLE_HIT: Tint = Tint {
        r: 0.99,
        g: 0.99,
        b: 1.0,
    };

    /// Applied after a wall reflection (shifts toward red).
    pub const WALL_HIT: Tint = Tint {
        r: 1.0,
        g: 0.95,
        b: 0.95,
    };

    /// Parse `0xRRGGBB`, `#RRGGBB` or bare `RRGGBB`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = ["#", "0x", "0X"]
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(*prefix))
            .unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidParam(format!(
                "color '{s}' must have six hex digits"
            )));
        }
        let rgb = u32::from_str_radix(digits, 16)
            .map_err(|_| Error::InvalidParam(format!("color '{s}' is not valid hex")))?;
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Ok(Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        })
    }

    /// Component-wise product.
    #[inline]
    pub fn scaled(self, by: Tint) -> Tint {
        Tint {
            r: self.r * by.r,
            g: self.g * by.g,
            b: self.b * by.b,
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A circular gas particle.
///
/// Fields:
/// - `type_name`: species tag, used only for grouping statistics
/// - `position`: center [x, y], origin at the arena's top-left corner
/// - `velocity`: [vx, vy] in distance per step
/// - `mass`, `radius`: strictly positive
/// - `tint`: display-only collision marker
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    type_name: String,
    position: Vec2,
    velocity: Vec2,
    mass: f64,
    radius: f64,
    tint: Tint,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn new(
        type_name: impl Into<String>,
        position: Vec2,
        velocity: Vec2,
        mass: f64,
        radius: f64,
    ) -> Result<Self> {
        check_positive("mass", mass)?;
        check_positive("radius", radius)?;
        if !position.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            type_name: type_name.into(),
            position,
            velocity,
            mass,
            radius,
            tint: Tint::WHITE,
        })
    }

    /// Builder-style initial tint.
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        check_positive("mass", mass)?;
        self.mass = mass;
        Ok(())
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_positive("radius", radius)?;
        self.radius = radius;
        Ok(())
    }

    #[inline]
    pub fn tint(&self) -> Tint {
        self.tint
    }

    #[inline]
    pub fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }

    /// Multiply the tint by `by`; used by the engine to flag collisions.
    #[inline]
    pub(crate) fn mark(&mut self, by: Tint) {
        self.tint = self.tint.scaled(by);
    }

    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        norm(&self.velocity)
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * norm_sq(&self.velocity)
    }

    /// Linear momentum m v.
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        let mut p = [0.0_f64; DIM];
        for (pk, &vk) in p.iter_mut().zip(self.velocity.iter()) {
            *pk = self.mass * vk;
        }
        p
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParam(format!("{name} must be finite and > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_ok() -> Result<()> {
        let p = Particle::new("Helium", [0.0, 1.0], [2.0, -3.0], 2.0, 0.5)?;
        assert_eq!(p.type_name(), "Helium");
        assert_eq!(p.position(), [0.0, 1.0]);
        assert_eq!(p.velocity(), [2.0, -3.0]);
        assert_eq!(p.mass(), 2.0);
        assert_eq!(p.radius(), 0.5);
        assert_eq!(p.tint(), Tint::WHITE);
        Ok(())
    }

    #[test]
    fn invalid_radius_rejected() {
        let err = Particle::new("x", [0.0, 0.0], [0.0, 0.0], 1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn invalid_mass_rejected() {
        let err = Particle::new("x", [0.0, 0.0], [0.0, 0.0], -1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn non_finite_state_rejected() {
        assert!(Particle::new("x", [f64::NAN, 0.0], [0.0, 0.0], 1.0, 1.0).is_err());
        assert!(Particle::new("x", [0.0, 0.0], [f64::INFINITY, 0.0], 1.0, 1.0).is_err());
    }

    #[test]
    fn setters_validate_mass_and_radius_only() -> Result<()> {
        let mut p = Particle::new("x", [0.0, 0.0], [0.0, 0.0], 1.0, 1.0)?;
        assert!(p.set_mass(0.0).is_err());
        assert!(p.set_radius(-2.0).is_err());
        assert_eq!(p.mass(), 1.0);
        p.set_position([-5.0, 1e6]);
        assert_eq!(p.position(), [-5.0, 1e6]);
        Ok(())
    }

    #[test]
    fn kinetic_energy_and_momentum() -> Result<()> {
        // v = (3,4), |v|^2 = 25; KE = 0.5 * 2 * 25
        let p = Particle::new("x", [0.0, 0.0], [3.0, 4.0], 2.0, 1.0)?;
        assert!((p.kinetic_energy() - 25.0).abs() < 1e-12);
        assert_eq!(p.momentum(), [6.0, 8.0]);
        assert_eq!(p.speed(), 5.0);
        Ok(())
    }

    #[test]
    fn tint_hex_and_marking() -> Result<()> {
        let t = Tint::from_hex("0xFF0000")?;
        assert_eq!(t, Tint { r: 1.0, g: 0.0, b: 0.0 });
        assert_eq!(Tint::from_hex("#00ff00")?.g, 1.0);
        assert!(Tint::from_hex("0xFFF").is_err());
        assert!(Tint::from_hex("zzzzzz").is_err());
        Ok(())
    }

    #[test]
    fn tint_hex_rejects_signs_and_repeated_prefixes() -> Result<()> {
        assert!(Tint::from_hex("+FFFFF").is_err());
        assert!(Tint::from_hex("0x0xFFFFFF").is_err());
        assert!(Tint::from_hex("#0xFFFFFF").is_err());
        assert!(Tint::from_hex("##FFFFFF").is_err());
        assert_eq!(Tint::from_hex(" 0X0000FF ")?.b, 1.0);
        Ok(())
    }

    #[test]
    fn marking_scales_tint() -> Result<()> {

        let mut p = Particle::new("x", [0.0, 0.0], [0.0, 0.0], 1.0, 1.0)?;
        p.mark(Tint::WALL_HIT);
        assert_eq!(p.tint().r, 1.0);
        assert!(p.tint().g < 1.0);
        Ok(())
    }
}
