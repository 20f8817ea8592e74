//! DDL for the `reviews` table.
//!
//! There is no migration system: each statement is idempotent and the
//! schema is created on demand by the server (`GET /init-db`, `--init-db`)
//! or the admin tool (`init-db`).

pub const REVIEWS_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        text TEXT NOT NULL,
        rating INTEGER,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reviews_created_at_idx ON reviews (created_at DESC, id DESC)",
];
