// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cpql_derive::schema;

#[schema]
mod store {
    #[entity(table = "users", schema = "core")]
    pub struct User {
        #[id]
        pub id: i64,
        #[column(name = "user_name", unique)]
        pub name: String,
        pub email: Option<String>,
    }

    #[repository(entity = "User")]
    pub trait UserRepository {
        #[query("SELECT u FROM User u WHERE u.email = :email")]
        async fn with_email(&self, email: &str) -> Result<Vec<User>, sqlx::Error>;

        #[query("SELECT COUNT(u) FROM User u")]
        async fn total(&self) -> Result<i64, sqlx::Error>;

        async fn find_by_name_containing(&self, part: &str) -> Result<Vec<User>, sqlx::Error>;

        async fn count_by_email_is_null(&self) -> Result<i64, sqlx::Error>;
    }
}

use store::{User, UserRepository};

fn assert_repository<R: UserRepository>() {}

fn main() {
    // The macro implemented the trait for PgPool.
    assert_repository::<sqlx::PgPool>();

    let user = User {
        id: 1,
        name: "ada".to_string(),
        email: None,
    };
    assert_eq!(user, user.clone());
}
