use std::ops::RangeInclusive;

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::NewRestaurantPizza;

pub const PRICE_RANGE: RangeInclusive<i32> = 1..=30;

/// The only message clients ever see for a rejected association.
pub const GENERIC_VALIDATION_ERROR: &str = "validation errors";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price in whole currency units, between 1 and 30
    pub price: Option<i32>,
    /// Identifier of an existing pizza
    pub pizza_id: Option<i32>,
    /// Identifier of an existing restaurant
    pub restaurant_id: Option<i32>,
}

#[derive(Error, Debug, PartialEq)]
#[error("invalid fields: {}", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

impl CreateRestaurantPizzaRequest {
    pub fn validate(&self) -> Result<NewRestaurantPizza, ValidationError> {
        let mut fields = Vec::new();

        let price = present(self.price);
        match price {
            Some(p) if PRICE_RANGE.contains(&p) => {}
            _ => fields.push("price"),
        }
        let pizza_id = present(self.pizza_id);
        if pizza_id.is_none() {
            fields.push("pizza_id");
        }
        let restaurant_id = present(self.restaurant_id);
        if restaurant_id.is_none() {
            fields.push("restaurant_id");
        }

        match (price, pizza_id, restaurant_id) {
            (Some(price), Some(pizza_id), Some(restaurant_id)) if fields.is_empty() => {
                Ok(NewRestaurantPizza {
                    price,
                    restaurant_id,
                    pizza_id,
                })
            }
            _ => Err(ValidationError { fields }),
        }
    }
}

// Zero counts as missing.
fn present(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        price: Option<i32>,
        pizza_id: Option<i32>,
        restaurant_id: Option<i32>,
    ) -> CreateRestaurantPizzaRequest {
        CreateRestaurantPizzaRequest {
            price,
            pizza_id,
            restaurant_id,
        }
    }

    #[test]
    fn test_valid_request() {
        let new = request(Some(5), Some(2), Some(3)).validate().unwrap();
        assert_eq!(
            new,
            NewRestaurantPizza {
                price: 5,
                restaurant_id: 3,
                pizza_id: 2,
            }
        );
    }

    #[test]
    fn test_missing_fields() {
        let err = CreateRestaurantPizzaRequest::default().validate().unwrap_err();
        assert_eq!(err.fields, vec!["price", "pizza_id", "restaurant_id"]);
    }

    #[test]
    fn test_zero_is_missing() {
        let err = request(Some(0), Some(1), Some(0)).validate().unwrap_err();
        assert_eq!(err.fields, vec!["price", "restaurant_id"]);
    }

    #[test]
    fn test_price_bounds() {
        assert!(request(Some(1), Some(1), Some(1)).validate().is_ok());
        assert!(request(Some(30), Some(1), Some(1)).validate().is_ok());

        let err = request(Some(31), Some(1), Some(1)).validate().unwrap_err();
        assert_eq!(err.fields, vec!["price"]);
        let err = request(Some(-4), Some(1), Some(1)).validate().unwrap_err();
        assert_eq!(err.fields, vec!["price"]);
    }

    #[test]
    fn test_error_message_lists_fields() {
        let err = request(None, None, Some(1)).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid fields: price, pizza_id");
    }
}
