use math::BigUint;

/// Anything that lies on a sharing polynomial as an `(x, y)` point.
pub trait PointSource {
    /// The share index, used as the abscissa.
    fn x(&self) -> u32;

    /// The polynomial's value at [`x`](Self::x).
    fn y(&self) -> &BigUint;
}

impl PointSource for (u32, BigUint) {
    fn x(&self) -> u32 {
        self.0
    }

    fn y(&self) -> &BigUint {
        &self.1
    }
}

impl<T: PointSource + ?Sized> PointSource for &T {
    fn x(&self) -> u32 {
        (**self).x()
    }

    fn y(&self) -> &BigUint {
        (**self).y()
    }
}
