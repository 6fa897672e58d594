use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sqlx::FromRow;

use crate::database::DatabaseError;

/// Fractional digits kept for prices
pub const PRICE_SCALE: u32 = 2;

/// Product as stored: price in integer hundredths
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub nombre: String,
    pub precio_centimos: i64,
    pub categoria_id: Option<i64>,
}

/// Product as served: price as a JSON number with two decimals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub categoria_id: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
            precio: Decimal::new(row.precio_centimos, PRICE_SCALE),
            categoria_id: row.categoria_id,
        }
    }
}

/// Round a price to two decimals (half away from zero) and express it in hundredths.
pub fn price_to_cents(price: Decimal) -> Result<i64, DatabaseError> {
    let mut rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    i64::try_from(rounded.mantissa()).map_err(|_| DatabaseError::InvalidPrice(price.to_string()))
}
