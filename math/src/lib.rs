//! Prime field and polynomial arithmetic over arbitrary-precision integers.

pub mod error;
pub mod field;
mod macros;
pub mod poly;
pub mod prelude;

pub use num_bigint::{BigInt, BigUint};

pub use crate::{
    error::{MathError, Result},
    field::{modular_divide, modular_inverse, PrimeField},
    poly::{evaluate, Polynomial},
};
