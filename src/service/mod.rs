//! Request validation for part bodies.

mod validation;
pub use validation::{PartValidator, EMPTY_NAME_MESSAGE, PRICE_MESSAGE, PRICE_RANGE_MESSAGE, QUANTITY_MESSAGE};
