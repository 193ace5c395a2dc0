//! Index types for structure elements.
//!
//! This module provides type-safe index wrappers for vertices, half-edges, and faces.
//! The indices are generic over the underlying integer type, so small shapes can
//! use `u16` ids while the default stays `u32`.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for types that can be used as element indices.
///
/// Implemented for `u16`, `u32`, and `u64`.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The maximum valid index value.
    const MAX: Self;

    /// A sentinel value representing an invalid/null index.
    const INVALID: Self;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics in debug builds if the value is too large for this index type.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check if this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Check whether `count` elements can be addressed with this index type.
    fn fits(count: usize) -> bool {
        count == 0 || count - 1 <= Self::MAX.to_usize()
    }
}

macro_rules! impl_mesh_index {
    ($ty:ty) => {
        impl MeshIndex for $ty {
            const MAX: Self = <$ty>::MAX - 1;
            const INVALID: Self = <$ty>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    v <= <Self as MeshIndex>::MAX as usize,
                    "index {} too large for {}",
                    v,
                    stringify!($ty)
                );
                v as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16);
impl_mesh_index!(u32);
impl_mesh_index!(u64);

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create an invalid/null index.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Get the raw value of the underlying type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(EdgeId, "E");
impl_index_type!(FaceId, "F");

impl<I: MeshIndex> EdgeId<I> {
    /// The slot paired with this one at commit time.
    ///
    /// Twins are always allocated as an even/odd pair, so this is the twin
    /// of any edge in a built structure.
    #[inline]
    pub fn partner(self) -> Self {
        Self::new(self.index() ^ 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v: VertexId = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert!(v.is_valid());

        let invalid: VertexId = VertexId::invalid();
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_small_indices() {
        let e: EdgeId<u16> = EdgeId::new(1000);
        assert_eq!(e.index(), 1000);
        assert_eq!(e.raw(), 1000u16);
    }

    #[test]
    fn test_fits() {
        assert!(u16::fits(0));
        assert!(u16::fits(u16::MAX as usize));
        assert!(!u16::fits(u16::MAX as usize + 1));
        assert!(u32::fits(1 << 20));
    }

    #[test]
    fn test_partner() {
        let e: EdgeId = EdgeId::new(6);
        assert_eq!(e.partner().index(), 7);
        assert_eq!(e.partner().partner(), e);
    }

    #[test]
    fn test_debug_format() {
        let f: FaceId = FaceId::new(3);
        assert_eq!(format!("{:?}", f), "F(3)");

        let invalid: EdgeId = EdgeId::invalid();
        assert_eq!(format!("{:?}", invalid), "E(INVALID)");
    }
}
