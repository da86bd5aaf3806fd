//! Data module - CSV loading and the immutable order table

mod loader;

pub use loader::{
    Dataset, LoadError, COST, CUSTOMER_ID, DELIVERY_TIME, ORDER_ID, PREP_TIME, RATING,
    REQUIRED_COLUMNS,
};
