use std::ops::{Add, Div, Mul, Sub};

/// Three real components of a field sample. Components never mix in the
/// dispersive recurrences; every operator here acts component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartesianVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianVector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add for CartesianVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for CartesianVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for CartesianVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<CartesianVector> for f64 {
    type Output = CartesianVector;

    fn mul(self, rhs: CartesianVector) -> CartesianVector {
        rhs * self
    }
}

impl Div<f64> for CartesianVector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
