//! Small vector helpers over fixed-size arrays.

/// Fixed spatial dimension (2D arena).
pub const DIM: usize = 2;

/// A 2D vector in arena coordinates `[x, y]`.
pub type Vec2 = [f64; DIM];

#[inline]
pub fn dot(a: &Vec2, b: &Vec2) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn sub(a: &Vec2, b: &Vec2) -> Vec2 {
    let mut out = [0.0_f64; DIM];
    for ((o, &ak), &bk) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = ak - bk;
    }
    out
}

/// `a + s * b`
#[inline]
pub fn add_scaled(a: &Vec2, s: f64, b: &Vec2) -> Vec2 {
    let mut out = *a;
    for (o, &bk) in out.iter_mut().zip(b.iter()) {
        *o += s * bk;
    }
    out
}

#[inline]
pub fn norm_sq(a: &Vec2) -> f64 {
    dot(a, a)
}

#[inline]
pub fn norm(a: &Vec2) -> f64 {
    norm_sq(a).sqrt()
}
