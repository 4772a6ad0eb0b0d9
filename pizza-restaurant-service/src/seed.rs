use diesel::{SqliteConnection, delete, insert_into, prelude::*};
use tracing::info;

use crate::models::NewRestaurantPizza;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store::{self, StoreError};

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const MENU: [(usize, usize, i32); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

/// Replaces every row with the fixture data.
pub fn run(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    conn.immediate_transaction::<_, StoreError, _>(|conn| {
        delete(restaurant_pizzas::table).execute(conn)?;
        delete(restaurants::table).execute(conn)?;
        delete(pizzas::table).execute(conn)?;

        let restaurants = RESTAURANTS
            .iter()
            .map(|(name, address)| store::create_restaurant(conn, name, address))
            .collect::<Result<Vec<_>, _>>()?;
        let pizzas = PIZZAS
            .iter()
            .map(|(name, ingredients)| store::create_pizza(conn, name, ingredients))
            .collect::<Result<Vec<_>, _>>()?;

        let menu = MENU
            .iter()
            .map(|&(r, p, price)| NewRestaurantPizza {
                price,
                restaurant_id: restaurants[r].id,
                pizza_id: pizzas[p].id,
            })
            .collect::<Vec<_>>();
        insert_into(restaurant_pizzas::table)
            .values(&menu)
            .execute(conn)?;

        info!(
            restaurants = restaurants.len(),
            pizzas = pizzas.len(),
            restaurant_pizzas = menu.len(),
            "database seeded"
        );
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_pool;

    #[test]
    fn test_seed_is_repeatable() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        run(conn).unwrap();
        run(conn).unwrap();

        let restaurants = store::list_restaurants(conn).unwrap();
        assert_eq!(restaurants.len(), 3);
        assert_eq!(store::list_pizzas(conn).unwrap().len(), 3);

        let (_, menu) = store::get_restaurant(conn, restaurants[2].id).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].0.price, 5);
        assert_eq!(menu[0].1.name, "Melanie");
    }
}
