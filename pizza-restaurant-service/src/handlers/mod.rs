pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{Router, response::Html, routing::get};
use diesel::SqliteConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::DbPool;
use crate::error::ApiError;
use crate::serializer::*;
use crate::store::StoreError;
use crate::validation::CreateRestaurantPizzaRequest;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

/// Runs `f` on the blocking pool with a connection checked out for this
/// request only.
async fn with_connection<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(StoreError::from)?;
        f(&mut *conn)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking task failed: {e}")))?
}

async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(RestaurantSummary, RestaurantDetail, RestaurantPizzaDetail, PizzaSummary, CreatedRestaurantPizza, CreateRestaurantPizzaRequest, ApiErrorResponse, ValidationErrorResponse)
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant menu endpoints")
    ),
    info(
        title = "Pizza Restaurants API",
        description = "Restaurants, pizzas and the prices restaurants charge for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;


#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::testing::{send, test_app};

    #[tokio::test]
    async fn test_index() {
        let (app, _pool) = test_app();
        let (status, body) = send(&app, Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), "<h1>Code challenge</h1>");
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (app, _pool) = test_app();
        let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"].get("/restaurants/{id}").is_some());
        assert!(doc["paths"].get("/restaurant_pizzas").is_some());
    }
}
