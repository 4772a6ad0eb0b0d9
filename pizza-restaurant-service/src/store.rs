use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{SqliteConnection, delete, insert_into, prelude::*};
use thiserror::Error;

use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Unexpected internal error")]
    Internal(#[source] DieselError),
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::UniqueViolation,
                info,
            ) => StoreError::Constraint(info.message().to_string()),
            // Older SQLite builds report constraints without an extended code.
            DieselError::DatabaseError(DatabaseErrorKind::Unknown, info)
                if info.message().contains("constraint failed") =>
            {
                StoreError::Constraint(info.message().to_string())
            }
            other => StoreError::Internal(other),
        }
    }
}

pub fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, StoreError> {
    Ok(restaurants::table
        .select(Restaurant::as_select())
        .order(restaurants::id.asc())
        .load(conn)?)
}

pub fn find_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<Restaurant, StoreError> {
    restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("Restaurant"))
}

pub fn find_pizza(conn: &mut SqliteConnection, id: i32) -> Result<Pizza, StoreError> {
    pizzas::table
        .find(id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("Pizza"))
}

/// Loads a restaurant together with every pizza it sells and the price.
pub fn get_restaurant(
    conn: &mut SqliteConnection,
    id: i32,
) -> Result<(Restaurant, Vec<(RestaurantPizza, Pizza)>), StoreError> {
    let restaurant = find_restaurant(conn, id)?;
    let menu = RestaurantPizza::belonging_to(&restaurant)
        .inner_join(pizzas::table)
        .select((RestaurantPizza::as_select(), Pizza::as_select()))
        .order(restaurant_pizzas::id.asc())
        .load(conn)?;
    Ok((restaurant, menu))
}

/// Removes the restaurant and its associations in one transaction.
/// The write lock is taken up front so a concurrent writer waits instead of
/// failing on lock upgrade.
pub fn delete_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<(), StoreError> {
    conn.immediate_transaction::<_, StoreError, _>(|conn| {
        let restaurant = find_restaurant(conn, id)?;
        delete(RestaurantPizza::belonging_to(&restaurant)).execute(conn)?;
        delete(restaurants::table.find(restaurant.id)).execute(conn)?;
        Ok(())
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, StoreError> {
    Ok(pizzas::table
        .select(Pizza::as_select())
        .order(pizzas::id.asc())
        .load(conn)?)
}

pub fn create_restaurant(
    conn: &mut SqliteConnection,
    name: &str,
    address: &str,
) -> Result<Restaurant, StoreError> {
    Ok(insert_into(restaurants::table)
        .values(NewRestaurant { name, address })
        .returning(Restaurant::as_returning())
        .get_result(conn)?)
}

pub fn create_pizza(
    conn: &mut SqliteConnection,
    name: &str,
    ingredients: &str,
) -> Result<Pizza, StoreError> {
    Ok(insert_into(pizzas::table)
        .values(NewPizza { name, ingredients })
        .returning(Pizza::as_returning())
        .get_result(conn)?)
}

/// Inserts the association after checking both ends exist. Returns the
/// referenced pizza and restaurant alongside the new row.
///
/// Opens its own immediate transaction, so it must not run inside another.
pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    new: NewRestaurantPizza,
) -> Result<(RestaurantPizza, Pizza, Restaurant), StoreError> {
    conn.immediate_transaction::<_, StoreError, _>(|conn| {
        let restaurant = find_restaurant(conn, new.restaurant_id)?;
        let pizza = find_pizza(conn, new.pizza_id)?;
        let created = insert_into(restaurant_pizzas::table)
            .values(&new)
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;
        Ok((created, pizza, restaurant))
    })
}
