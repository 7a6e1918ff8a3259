// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cpql_derive::schema;

#[schema]
mod store {
    #[entity(table = "orders")]
    #[relation(name = "customer", kind = "many_to_one", target = "Customer", join_column = "customer_id")]
    pub struct Order {
        #[id]
        pub id: i64,
        pub customer_id: i64,
        pub total: i64,
    }

    #[entity(table = "customers")]
    pub struct Customer {
        #[id]
        pub id: i64,
        pub name: String,
    }

    #[repository(entity = "Order")]
    pub trait OrderRepository {
        #[query("SELECT o FROM Order o JOIN Customer c ON o.customer_id = c.id WHERE c.name = :name")]
        async fn for_customer(&self, name: &str) -> Result<Vec<Order>, sqlx::Error>;

        #[query("UPDATE Order o SET o.total = :total WHERE o.id = :id")]
        async fn set_total(&self, id: i64, total: i64) -> Result<u64, sqlx::Error>;

        #[query("DELETE FROM Order o WHERE o.total = :limit")]
        async fn purge_below(&self, limit: i64) -> Result<u64, sqlx::Error>;

        #[query(native = "SELECT * FROM orders WHERE total > $1")]
        async fn above(&self, min: i64) -> Result<Vec<Order>, sqlx::Error>;
    }

    #[repository(entity = "Customer")]
    pub trait CustomerRepository {
        async fn find_by_name_starting_with(&self, prefix: &str) -> Result<Vec<Customer>, sqlx::Error>;

        async fn exists_by_name(&self, name: &str) -> Result<bool, sqlx::Error>;

        async fn delete_by_name(&self, name: &str) -> Result<u64, sqlx::Error>;
    }
}

fn assert_orders<R: store::OrderRepository>() {}
fn assert_customers<R: store::CustomerRepository>() {}

fn main() {
    assert_orders::<sqlx::PgPool>();
    assert_customers::<sqlx::PgPool>();

    let order = store::Order {
        id: 1,
        customer_id: 7,
        total: 120,
    };
    assert_eq!(order.total, 120);
}
