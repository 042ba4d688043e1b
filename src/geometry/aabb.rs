use crate::codec::{ByteReader, ByteWriter, Scalar};
use crate::common::Serialized;
use crate::error::CodecResult;
use num_traits::{Bounded, Float, Num, NumCast};

/// An axis-aligned bounding box in `D` dimensions.
///
/// A box whose `min` exceeds its `max` on any axis is invalid; [`Aabb::empty`] produces such a
/// box so that expanding it by the first point yields a degenerate box around that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<T, const D: usize> {
    pub min: [T; D],
    pub max: [T; D],
}

pub type Aabb2i = Aabb<i32, 2>;
pub type Aabb3i = Aabb<i32, 3>;
pub type Aabb2f = Aabb<f32, 2>;
pub type Aabb3f = Aabb<f32, 3>;

impl<T, const D: usize> Aabb<T, D>
where
    T: Copy + PartialOrd + Bounded,
{
    pub fn new(min: [T; D], max: [T; D]) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: [T::max_value(); D],
            max: [T::min_value(); D],
        }
    }

    pub fn is_valid(&self) -> bool {
        (0..D).all(|i| self.min[i] <= self.max[i])
    }

    pub fn contains_point(&self, p: &[T; D]) -> bool {
        (0..D).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    pub fn intersects(&self, other: &Self) -> bool {
        (0..D).all(|i| other.min[i] <= self.max[i] && other.max[i] >= self.min[i])
    }

    /// The overlap of both boxes, or an empty box if they are disjoint.
    pub fn intersection(&self, other: &Self) -> Self {
        let result = Self {
            min: std::array::from_fn(|i| max_of(self.min[i], other.min[i])),
            max: std::array::from_fn(|i| min_of(self.max[i], other.max[i])),
        };
        if result.is_valid() {
            result
        } else {
            Self::empty()
        }
    }

    pub fn expand_point(&mut self, p: &[T; D]) {
        for i in 0..D {
            self.min[i] = min_of(self.min[i], p[i]);
            self.max[i] = max_of(self.max[i], p[i]);
        }
    }

    pub fn expand(&mut self, other: &Self) {
        for i in 0..D {
            self.min[i] = min_of(self.min[i], other.min[i]);
            self.max[i] = max_of(self.max[i], other.max[i]);
        }
    }
}

impl<T, const D: usize> Aabb<T, D>
where
    T: Copy + PartialOrd + Bounded + Num,
{
    pub fn size(&self) -> [T; D] {
        std::array::from_fn(|i| self.max[i] - self.min[i])
    }

    pub fn volume(&self) -> T {
        self.size().into_iter().fold(T::one(), |acc, s| acc * s)
    }

    pub fn pad(&mut self, amount: T) {
        for i in 0..D {
            self.min[i] = self.min[i] - amount;
            self.max[i] = self.max[i] + amount;
        }
    }
}

impl<T, const D: usize> Aabb<T, D>
where
    T: Float,
{
    pub fn from_center_extents(center: &[T; D], half_extents: &[T; D]) -> Self {
        Self {
            min: std::array::from_fn(|i| center[i] - half_extents[i]),
            max: std::array::from_fn(|i| center[i] + half_extents[i]),
        }
    }

    pub fn center(&self) -> [T; D] {
        let two = T::one() + T::one();
        std::array::from_fn(|i| (self.min[i] + self.max[i]) / two)
    }

    pub fn half_extents(&self) -> [T; D] {
        let two = T::one() + T::one();
        std::array::from_fn(|i| (self.max[i] - self.min[i]) / two)
    }

    /// Slab test. Returns the entry and exit distances along the ray if it hits the box.
    ///
    /// Direction components below `1e-8` in magnitude are treated as parallel to their slab.
    pub fn intersects_ray(&self, origin: &[T; D], dir: &[T; D]) -> Option<(T, T)> {
        let eps = <T as NumCast>::from(PARALLEL_EPSILON).unwrap_or_else(T::epsilon);
        let mut t_min = T::zero();
        let mut t_max = T::max_value();

        for i in 0..D {
            if dir[i].abs() < eps {
                // parallel to this slab
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return None;
                }
                continue;
            }
            let inv = T::one() / dir[i];
            let mut t0 = (self.min[i] - origin[i]) * inv;
            let mut t1 = (self.max[i] - origin[i]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some((t_min, t_max))
    }
}

impl<T, const D: usize> Default for Aabb<T, D>
where
    T: Copy + PartialOrd + Bounded,
{
    fn default() -> Self {
        Self::empty()
    }
}

/// Persisted as the minimum corner followed by the maximum corner.
impl<T, const D: usize> Serialized for Aabb<T, D>
where
    T: Scalar,
    [T; D]: Default,
{
    fn serialize(&self, writer: &mut ByteWriter) {
        writer.write_vector::<D, _>(&self.min);
        writer.write_vector::<D, _>(&self.max);
    }

    fn deserialize(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        reader.try_read(|r| {
            let min = r.read_vector::<D, [T; D]>()?;
            let max = r.read_vector::<D, [T; D]>()?;
            Ok(Self { min, max })
        })
    }
}

const PARALLEL_EPSILON: f64 = 1e-8;

#[inline]
fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[inline]
fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}
