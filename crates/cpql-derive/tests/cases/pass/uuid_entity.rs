// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cpql_derive::schema;

#[schema]
mod store {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    #[entity(table = "events")]
    pub struct Event {
        #[id]
        pub id: Uuid,
        pub name: String,
        #[column(name = "occurred_at")]
        pub at: DateTime<Utc>,
    }

    #[repository(entity = "Event")]
    pub trait EventRepository {
        #[query("SELECT e FROM Event e WHERE e.at > :since ORDER BY e.at")]
        async fn since(&self, since: chrono::DateTime<chrono::Utc>) -> Result<Vec<Event>, sqlx::Error>;

        async fn find_by_name(&self, name: &str) -> Result<Option<Event>, sqlx::Error>;
    }
}

fn assert_events<R: store::EventRepository>() {}

fn main() {
    assert_events::<sqlx::PgPool>();

    let event = store::Event {
        id: uuid::Uuid::nil(),
        name: "deploy".to_string(),
        at: chrono::Utc::now(),
    };
    assert_eq!(event.name, "deploy");
}
