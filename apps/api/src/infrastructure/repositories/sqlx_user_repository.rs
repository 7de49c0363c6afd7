use crate::domain::user::{entity::UserRecord, errors::DomainError, repository::UserRepository};
use async_trait::async_trait;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use tracing::{debug, error, info, instrument};

/// Rows per multi-row `INSERT`, keeping bind parameters well under MySQL's limit.
const INSERT_CHUNK_ROWS: usize = 500;

const INSERT_PREFIX: &str =
    "INSERT INTO users (`user`, role, street, city, country1, pincode, state, country2) ";

#[derive(FromRow)]
struct UserRow {
    user: Option<String>,
    role: Option<String>,
    street: Option<String>,
    city: Option<String>,
    country1: Option<String>,
    pincode: Option<String>,
    state: Option<String>,
    country2: Option<String>,
}

impl From<UserRow> for UserRecord {
    fn from(r: UserRow) -> Self {
        UserRecord {
            user: r.user,
            role: r.role,
            street: r.street,
            city: r.city,
            country1: r.country1,
            pincode: r.pincode,
            state: r.state,
            country2: r.country2,
        }
    }
}

pub struct SqlxUserRepository {
    pub pool: MySqlPool,
}

impl SqlxUserRepository {
    /// Creates a new instance of the repository with the provided database pool.
    pub fn new(pool: MySqlPool) -> Self {
        info!("Initializing SqlxUserRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    /// Inserts all records inside a single transaction.
    ///
    /// Records are written in multi-row statements of at most
    /// `INSERT_CHUNK_ROWS` rows. `None` fields are stored as NULL. If any
    /// statement fails the transaction is dropped uncommitted, so the batch
    /// is all-or-nothing.
    ///
    /// # Errors
    /// Returns `DomainError::Persistence` for connectivity issues or rejected
    /// statements
    #[instrument(skip(self, records), fields(rows = records.len()))]
    async fn insert_batch(&self, records: &[UserRecord]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to open insert transaction: {}", e);
            DomainError::Persistence(e.to_string())
        })?;

        let mut inserted = 0;
        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(INSERT_PREFIX);
            builder.push_values(chunk, |mut b, r| {
                b.push_bind(r.user.clone())
                    .push_bind(r.role.clone())
                    .push_bind(r.street.clone())
                    .push_bind(r.city.clone())
                    .push_bind(r.country1.clone())
                    .push_bind(r.pincode.clone())
                    .push_bind(r.state.clone())
                    .push_bind(r.country2.clone());
            });

            let result = builder.build().execute(&mut *tx).await.map_err(|e| {
                error!("Batch insert failed after {} rows: {}", inserted, e);
                DomainError::Persistence(e.to_string())
            })?;
            inserted += result.rows_affected();
            debug!("Inserted chunk of {} rows", chunk.len());
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit insert transaction: {}", e);
            DomainError::Persistence(e.to_string())
        })?;

        info!("Committed {} user rows", inserted);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT `user`, role, street, city, country1, pincode, state, country2 FROM users",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch users: {}", e);
            DomainError::Persistence(e.to_string())
        })?;

        debug!("Retrieved {} users", rows.len());
        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::Persistence(e.to_string()))
    }
}
