use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::serializer::*;
use crate::store::{self, StoreError};
use crate::validation::CreateRestaurantPizzaRequest;

use super::{AppState, with_connection};

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza added to the restaurant menu", body = CreatedRestaurantPizza),
        (status = 400, description = "Invalid or missing fields", body = ValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedRestaurantPizza>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let new = payload.validate().inspect_err(|e| warn!(error = %e, "rejected restaurant pizza"))?;

    let (created, pizza, restaurant) = with_connection(&state, move |conn| {
        store::create_restaurant_pizza(conn, new).map_err(|e| match e {
            // Dangling references are the client's mistake here, not a missing route.
            StoreError::NotFound(entity) => ApiError::Validation(format!("{entity} not found")),
            other => other.into(),
        })
    })
    .await?;
    info!(restaurant_pizza_id = created.id, "restaurant pizza created");

    Ok((
        StatusCode::CREATED,
        Json(serialize_created_restaurant_pizza(&created, &pizza, &restaurant)),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use diesel::prelude::*;
    use serde_json::{Value, json};

    use crate::DbPool;
    use crate::handlers::testing::{send, test_app};
    use crate::models::{Pizza, Restaurant};
    use crate::schema::restaurant_pizzas;
    use crate::store;

    fn seed(pool: &DbPool) -> (Restaurant, Pizza) {
        let conn = &mut pool.get().unwrap();
        (
            store::create_restaurant(conn, "Sanjay's Pizza", "address2").unwrap(),
            store::create_pizza(conn, "Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard")
                .unwrap(),
        )
    }

    fn association_count(pool: &DbPool) -> i64 {
        let conn = &mut pool.get().unwrap();
        restaurant_pizzas::table
            .count()
            .get_result(conn)
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza() {
        let (app, pool) = test_app();
        let (restaurant, pizza) = seed(&pool);

        let (status, body) = send(
            &app,
            Method::POST,
            "/restaurant_pizzas",
            Some(json!({"price": 5, "pizza_id": pizza.id, "restaurant_id": restaurant.id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 1,
                "price": 5,
                "pizza_id": pizza.id,
                "restaurant_id": restaurant.id,
                "pizza": {
                    "id": pizza.id,
                    "name": "Melanie",
                    "ingredients": "Dough, Sauce, Ricotta, Red peppers, Mustard"
                },
                "restaurant": {
                    "id": restaurant.id,
                    "name": "Sanjay's Pizza",
                    "address": "address2"
                }
            })
        );
        assert_eq!(association_count(&pool), 1);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_validation_errors() {
        let (app, pool) = test_app();
        let (restaurant, pizza) = seed(&pool);

        let bodies = [
            json!({"pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            json!({"price": 0, "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            json!({"price": null, "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            json!({"price": 31, "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            json!({"price": 5, "restaurant_id": restaurant.id}),
            json!({"price": 5, "pizza_id": pizza.id}),
            json!({"price": "five", "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            json!({"price": 5, "pizza_id": 999, "restaurant_id": restaurant.id}),
            json!({"price": 5, "pizza_id": pizza.id, "restaurant_id": 999}),
        ];
        for request in bodies {
            let (status, body) =
                send(&app, Method::POST, "/restaurant_pizzas", Some(request.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "request: {request}");
            let body: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(body, json!({"errors": ["validation errors"]}));
        }

        assert_eq!(association_count(&pool), 0);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_without_json_body() {
        let (app, pool) = test_app();

        let (status, body) = send(&app, Method::POST, "/restaurant_pizzas", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"errors": ["validation errors"]}));
        assert_eq!(association_count(&pool), 0);
    }
}
