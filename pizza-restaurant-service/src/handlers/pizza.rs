use axum::{Router, extract::State, response::Json, routing::get};
use tracing::instrument;

use crate::error::ApiError;
use crate::serializer::*;
use crate::store;

use super::{AppState, with_connection};

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = Vec<PizzaSummary>),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    let pizzas = with_connection(&state, |conn| Ok(store::list_pizzas(conn)?)).await?;

    Ok(Json(pizzas.iter().map(serialize_pizza_summary).collect()))
}
