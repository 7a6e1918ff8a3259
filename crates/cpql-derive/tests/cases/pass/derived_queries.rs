// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cpql_derive::schema;

#[schema]
mod store {
    #[entity(table = "people")]
    pub struct Person {
        #[id]
        pub id: i64,
        pub first_name: String,
        pub age: i32,
        pub active: bool,
        pub email: Option<String>,
    }

    #[repository(entity = "Person")]
    pub trait PersonRepository {
        async fn find_by_first_name_containing(&self, part: &str) -> Result<Vec<Person>, sqlx::Error>;

        async fn find_by_age_between(&self, low: i32, high: i32) -> Result<Vec<Person>, sqlx::Error>;

        async fn find_by_active_true(&self) -> Result<Vec<Person>, sqlx::Error>;

        async fn find_by_email_is_null_and_age_greater_than(&self, min: i32) -> Result<Vec<Person>, sqlx::Error>;

        async fn find_by_first_name_ignore_case(&self, first_name: &str) -> Result<Vec<Person>, sqlx::Error>;

        async fn count_by_active_true(&self) -> Result<i64, sqlx::Error>;

        // Built-in override with the canonical signature.
        async fn find_by_id(&self, id: i64) -> Result<Option<Person>, sqlx::Error>;

        fn default_page_size(&self) -> i64 {
            50
        }
    }
}

fn assert_people<R: store::PersonRepository>() {}

fn main() {
    assert_people::<sqlx::PgPool>();

    let person = store::Person {
        id: 1,
        first_name: "Grace".to_string(),
        age: 36,
        active: true,
        email: Some("grace@example.com".to_string()),
    };
    assert!(person.active);
}
