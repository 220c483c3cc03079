//! a 2x3 affine transformation matrix

use crate::Fixed;

/// A 2×3 affine transformation matrix, stored as six [`Fixed`] values.
///
/// This is the layout used wherever font binary data embeds a transform
/// (for instance the COLR `Affine2x3` record): four matrix components
/// followed by a translation vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Affine2x3 {
    /// x component of transformed x-basis vector.
    pub xx: Fixed,
    /// y component of transformed x-basis vector.
    pub yx: Fixed,
    /// x component of transformed y-basis vector.
    pub xy: Fixed,
    /// y component of transformed y-basis vector.
    pub yy: Fixed,
    /// Translation in x direction.
    pub dx: Fixed,
    /// Translation in y direction.
    pub dy: Fixed,
}

impl Affine2x3 {
    /// The identity transform.
    pub const IDENTITY: Affine2x3 = Affine2x3 {
        xx: Fixed::ONE,
        yx: Fixed::ZERO,
        xy: Fixed::ZERO,
        yy: Fixed::ONE,
        dx: Fixed::ZERO,
        dy: Fixed::ZERO,
    };

    /// Construct a new transform from components.
    pub const fn new(xx: Fixed, yx: Fixed, xy: Fixed, yy: Fixed, dx: Fixed, dy: Fixed) -> Self {
        Self {
            xx,
            yx,
            xy,
            yy,
            dx,
            dy,
        }
    }

    /// A pure translation.
    pub const fn translate(dx: Fixed, dy: Fixed) -> Self {
        Self {
            xx: Fixed::ONE,
            yx: Fixed::ZERO,
            xy: Fixed::ZERO,
            yy: Fixed::ONE,
            dx,
            dy,
        }
    }

    /// Apply the transform to a point, computed in `f64` to avoid
    /// intermediate fixed-point overflow.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.xx.to_f64() * x + self.xy.to_f64() * y + self.dx.to_f64(),
            self.yx.to_f64() * x + self.yy.to_f64() * y + self.dy.to_f64(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop() {
        let (x, y) = Affine2x3::IDENTITY.transform_point(12.5, -3.0);
        assert_eq!((x, y), (12.5, -3.0));
    }

    #[test]
    fn translate_then_scale() {
        let t = Affine2x3::new(
            Fixed::from_f64(2.0),
            Fixed::ZERO,
            Fixed::ZERO,
            Fixed::from_f64(0.5),
            Fixed::from_f64(10.0),
            Fixed::from_f64(-2.0),
        );
        let (x, y) = t.transform_point(3.0, 4.0);
        assert_eq!((x, y), (16.0, 0.0));
    }
}
