pub use crate::poly;
pub use crate::{
    error::{MathError, Result},
    field::{modular_divide, modular_inverse, PrimeField},
    poly::{evaluate, Polynomial},
};
pub use num_bigint::{BigInt, BigUint};
