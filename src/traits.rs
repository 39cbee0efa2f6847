//! This module defines the element trait shared by the tensor model and the bridge.
//!
//! `Element` ties a native Rust type to its `DataType` tag, to the matching
//! `Values` storage variant and to the matching `DynArray` variant. `Scalar` is
//! the widened, type-erased value used by the cross-type in-place copies.

use crate::bridge::DynArray;
use crate::tensor::Values;
use crate::types::DataType;
use bitvec::prelude::*;
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD};

/// A single cell value, widened so that every supported element type converts
/// into it without loss.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i128),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// A native element type the bridge can store in both a tensor and a `DynArray`.
pub trait Element: Clone + Default + std::fmt::Debug + 'static {
    const DATA_TYPE: DataType;

    /// The flat value buffer, if `values` holds this type. Bit-packed storage has
    /// no slice form and always returns `None`.
    fn slice(values: &Values) -> Option<&[Self]>;
    fn slice_mut(values: &mut Values) -> Option<&mut [Self]>;
    fn into_values(data: Vec<Self>) -> Values;

    fn view(array: &DynArray) -> Option<ArrayViewD<'_, Self>>;
    fn view_mut(array: &mut DynArray) -> Option<ArrayViewMutD<'_, Self>>;
    fn wrap(array: ArrayD<Self>) -> DynArray;

    fn to_scalar(&self) -> Scalar;
    /// Casts a scalar into this type. `None` when a string cell does not parse.
    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

macro_rules! impl_slice_access {
    ($variant:ident) => {
        const DATA_TYPE: DataType = DataType::$variant;

        fn slice(values: &Values) -> Option<&[Self]> {
            match values {
                Values::$variant(v) => Some(v.as_slice()),
                _ => None,
            }
        }

        fn slice_mut(values: &mut Values) -> Option<&mut [Self]> {
            match values {
                Values::$variant(v) => Some(v.as_mut_slice()),
                _ => None,
            }
        }

        fn into_values(data: Vec<Self>) -> Values {
            Values::$variant(data)
        }

        fn view(array: &DynArray) -> Option<ArrayViewD<'_, Self>> {
            match array {
                DynArray::$variant(a) => Some(a.view()),
                _ => None,
            }
        }

        fn view_mut(array: &mut DynArray) -> Option<ArrayViewMutD<'_, Self>> {
            match array {
                DynArray::$variant(a) => Some(a.view_mut()),
                _ => None,
            }
        }

        fn wrap(array: ArrayD<Self>) -> DynArray {
            DynArray::$variant(array)
        }
    };
}

// Numeric casts follow `as` semantics: wrapping for integers, saturating for
// float to int.
macro_rules! impl_int_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            impl_slice_access!($variant);

            fn to_scalar(&self) -> Scalar {
                Scalar::Int(*self as i128)
            }

            fn from_scalar(scalar: &Scalar) -> Option<Self> {
                match scalar {
                    Scalar::Int(v) => Some(*v as $t),
                    Scalar::Float(v) => Some(*v as $t),
                    Scalar::Bool(b) => Some(u8::from(*b) as $t),
                    Scalar::Str(s) => {
                        let s = s.trim();
                        s.parse::<i128>()
                            .map(|v| v as $t)
                            .or_else(|_| s.parse::<f64>().map(|v| v as $t))
                            .ok()
                    }
                }
            }
        }
    };
}

macro_rules! impl_float_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            impl_slice_access!($variant);

            fn to_scalar(&self) -> Scalar {
                Scalar::Float(*self as f64)
            }

            fn from_scalar(scalar: &Scalar) -> Option<Self> {
                match scalar {
                    Scalar::Int(v) => Some(*v as $t),
                    Scalar::Float(v) => Some(*v as $t),
                    Scalar::Bool(b) => Some(u8::from(*b) as $t),
                    Scalar::Str(s) => s.trim().parse::<$t>().ok(),
                }
            }
        }
    };
}

impl_int_element!(u8, UInt8);
impl_int_element!(i8, Int8);
impl_int_element!(u16, UInt16);
impl_int_element!(i16, Int16);
impl_int_element!(u32, UInt32);
impl_int_element!(i32, Int32);
impl_int_element!(u64, UInt64);
impl_int_element!(i64, Int64);
impl_int_element!(isize, Int);
impl_float_element!(f32, Float32);
impl_float_element!(f64, Float64);

impl Element for String {
    impl_slice_access!(String);

    fn to_scalar(&self) -> Scalar {
        Scalar::Str(self.clone())
    }

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        Some(match scalar {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Str(s) => s.clone(),
        })
    }
}

impl Element for bool {
    const DATA_TYPE: DataType = DataType::Bool;

    fn slice(_values: &Values) -> Option<&[Self]> {
        None
    }

    fn slice_mut(_values: &mut Values) -> Option<&mut [Self]> {
        None
    }

    fn into_values(data: Vec<Self>) -> Values {
        Values::Bool(data.into_iter().collect::<BitVec<u8, Lsb0>>())
    }

    fn view(array: &DynArray) -> Option<ArrayViewD<'_, Self>> {
        match array {
            DynArray::Bool(a) => Some(a.view()),
            _ => None,
        }
    }

    fn view_mut(array: &mut DynArray) -> Option<ArrayViewMutD<'_, Self>> {
        match array {
            DynArray::Bool(a) => Some(a.view_mut()),
            _ => None,
        }
    }

    fn wrap(array: ArrayD<Self>) -> DynArray {
        DynArray::Bool(array)
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(b) => Some(*b),
            Scalar::Int(v) => Some(*v != 0),
            Scalar::Float(v) => Some(*v != 0.0),
            Scalar::Str(s) => {
                let s = s.trim();
                s.parse::<bool>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|v| v != 0.0))
            }
        }
    }
}
