//! Document collections
//!
//! A [`Collection`] is a handle to one named set of JSON documents. Every
//! operation is a single statement against the backing store, so each call is
//! atomic on its own. Documents are kept in insertion order.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use sqlx::{PgPool, Postgres, Row, postgres::PgArguments, query::Query};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};

/// Predicate selecting documents for read, update and delete operations
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Matches the document stored under the given identifier
    Id(Uuid),
    /// Case-insensitive literal substring match against any of the fields.
    /// String fields match directly; arrays match when any string element does.
    AnyFieldContains {
        fields: &'static [&'static str],
        needle: String,
    },
}

impl Filter {
    pub fn any_field_contains(fields: &'static [&'static str], needle: impl Into<String>) -> Self {
        Filter::AnyFieldContains {
            fields,
            needle: needle.into(),
        }
    }

    /// SQL predicate over the `id`/`doc` columns. `param` is the placeholder
    /// index the filter's bound value will occupy.
    fn sql_predicate(&self, param: usize) -> DatabaseResult<String> {
        match self {
            Filter::All => Ok("TRUE".to_string()),
            Filter::Id(_) => Ok(format!("id = ${param}")),
            Filter::AnyFieldContains { fields, .. } => {
                if fields.is_empty() {
                    return Ok("FALSE".to_string());
                }
                let mut clauses = Vec::with_capacity(fields.len());
                for field in fields.iter() {
                    validate_name(field)?;
                    clauses.push(format!(
                        "(CASE jsonb_typeof(doc->'{field}') \
                         WHEN 'string' THEN (doc->>'{field}') ~* ${param} \
                         WHEN 'array' THEN EXISTS (\
                           SELECT 1 FROM jsonb_array_elements(doc->'{field}') AS e(v) \
                           WHERE jsonb_typeof(e.v) = 'string' AND (e.v #>> '{{}}') ~* ${param}) \
                         ELSE FALSE END)"
                    ));
                }
                Ok(clauses.join(" OR "))
            }
        }
    }

    fn bind<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            Filter::All => query,
            Filter::Id(id) => query.bind(*id),
            Filter::AnyFieldContains { needle, .. } => query.bind(regex::escape(needle)),
        }
    }

    /// Compile the in-memory form of this filter
    fn matcher(&self) -> DatabaseResult<Matcher> {
        Ok(match self {
            Filter::All => Matcher::All,
            Filter::Id(id) => Matcher::Id(*id),
            Filter::AnyFieldContains { fields, needle } => {
                let pattern = RegexBuilder::new(&regex::escape(needle))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| DatabaseError::Configuration(e.to_string()))?;
                Matcher::AnyFieldContains {
                    fields: *fields,
                    pattern,
                }
            }
        })
    }
}

enum Matcher {
    All,
    Id(Uuid),
    AnyFieldContains {
        fields: &'static [&'static str],
        pattern: Regex,
    },
}

impl Matcher {
    fn matches(&self, document: &StoredDocument) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Id(id) => document.id == *id,
            Matcher::AnyFieldContains { fields, pattern } => fields.iter().any(|field| {
                match document.doc.get(*field) {
                    Some(Value::String(s)) => pattern.is_match(s),
                    Some(Value::Array(items)) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|s| pattern.is_match(s)),
                    _ => false,
                }
            }),
        }
    }
}

/// Collection and table names are restricted to lowercase identifiers so
/// they can be interpolated into SQL.
pub(crate) fn validate_name(name: &str) -> DatabaseResult<()> {
    let valid = !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DatabaseError::Configuration(format!(
            "Invalid collection or field name: {name:?}"
        )))
    }
}

#[derive(Debug, Clone)]
struct StoredDocument {
    id: Uuid,
    doc: Value,
}

/// Process-local document store used when no database server is configured
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<StoredDocument>>>>,
}

#[derive(Clone)]
pub(crate) enum Backend {
    Postgres {
        pool: PgPool,
        query_timeout: Duration,
    },
    Memory(MemoryStore),
}

/// Handle to a named collection of documents
#[derive(Clone)]
pub struct Collection {
    name: String,
    backend: Backend,
}

impl Collection {
    pub(crate) fn new(name: &str, backend: Backend) -> DatabaseResult<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            backend,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return every matching document, in insertion order
    pub async fn find_many<T: DeserializeOwned>(&self, filter: &Filter) -> DatabaseResult<Vec<T>> {
        let docs = match &self.backend {
            Backend::Postgres {
                pool,
                query_timeout,
            } => {
                let sql = format!(
                    "SELECT doc FROM \"{}\" WHERE {} ORDER BY seq",
                    self.name,
                    filter.sql_predicate(1)?
                );
                let rows = bounded(*query_timeout, filter.bind(sqlx::query(&sql)).fetch_all(pool))
                    .await?;
                rows.into_iter()
                    .map(|row| row.get::<Value, _>("doc"))
                    .collect::<Vec<_>>()
            }
            Backend::Memory(store) => {
                let matcher = filter.matcher()?;
                let collections = store.lock()?;
                collections
                    .get(&self.name)
                    .map(|docs| {
                        docs.iter()
                            .filter(|d| matcher.matches(d))
                            .map(|d| d.doc.clone())
                            .collect()
                    })
                    .unwrap_or_default()
            }
        };

        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(DatabaseError::from))
            .collect()
    }

    /// Return the first matching document
    pub async fn find_one<T: DeserializeOwned>(&self, filter: &Filter) -> DatabaseResult<Option<T>> {
        let doc = match &self.backend {
            Backend::Postgres {
                pool,
                query_timeout,
            } => {
                let sql = format!(
                    "SELECT doc FROM \"{}\" WHERE {} ORDER BY seq LIMIT 1",
                    self.name,
                    filter.sql_predicate(1)?
                );
                bounded(
                    *query_timeout,
                    filter.bind(sqlx::query(&sql)).fetch_optional(pool),
                )
                .await?
                .map(|row| row.get::<Value, _>("doc"))
            }
            Backend::Memory(store) => {
                let matcher = filter.matcher()?;
                let collections = store.lock()?;
                collections.get(&self.name).and_then(|docs| {
                    docs.iter()
                        .find(|d| matcher.matches(d))
                        .map(|d| d.doc.clone())
                })
            }
        };

        doc.map(serde_json::from_value)
            .transpose()
            .map_err(DatabaseError::from)
    }

    /// Store a new document under `id`
    pub async fn insert_one<T: Serialize>(&self, id: Uuid, record: &T) -> DatabaseResult<()> {
        let doc = serde_json::to_value(record)?;
        debug!(collection = %self.name, %id, "inserting document");

        match &self.backend {
            Backend::Postgres {
                pool,
                query_timeout,
            } => {
                let sql = format!("INSERT INTO \"{}\" (id, doc) VALUES ($1, $2)", self.name);
                bounded(
                    *query_timeout,
                    sqlx::query(&sql).bind(id).bind(doc).execute(pool),
                )
                .await?;
            }
            Backend::Memory(store) => {
                let mut collections = store.lock()?;
                let docs = collections.entry(self.name.clone()).or_default();
                if docs.iter().any(|d| d.id == id) {
                    return Err(DatabaseError::DuplicateId(id));
                }
                docs.push(StoredDocument { id, doc });
            }
        }

        Ok(())
    }

    /// Overwrite the top-level fields named in `fields` on the first matching
    /// document. Fields absent from `fields` keep their stored values and the
    /// `id` field is never replaced. Returns the updated document, or `None`
    /// if nothing matched.
    pub async fn update_one<P, T>(&self, filter: &Filter, fields: &P) -> DatabaseResult<Option<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let mut patch = match serde_json::to_value(fields)? {
            Value::Object(map) => map,
            _ => {
                return Err(DatabaseError::Configuration(
                    "update field set must serialize to a JSON object".to_string(),
                ));
            }
        };
        patch.remove("id");

        let doc = match &self.backend {
            Backend::Postgres {
                pool,
                query_timeout,
            } => {
                let sql = format!(
                    "UPDATE \"{name}\" SET doc = doc || $1 \
                     WHERE id = (SELECT id FROM \"{name}\" WHERE {predicate} ORDER BY seq LIMIT 1) \
                     RETURNING doc",
                    name = self.name,
                    predicate = filter.sql_predicate(2)?
                );
                let query = sqlx::query(&sql).bind(Value::Object(patch));
                bounded(*query_timeout, filter.bind(query).fetch_optional(pool))
                    .await?
                    .map(|row| row.get::<Value, _>("doc"))
            }
            Backend::Memory(store) => {
                let matcher = filter.matcher()?;
                let mut collections = store.lock()?;
                collections
                    .get_mut(&self.name)
                    .and_then(|docs| docs.iter_mut().find(|d| matcher.matches(d)))
                    .map(|stored| {
                        if let Value::Object(target) = &mut stored.doc {
                            target.extend(patch);
                        }
                        stored.doc.clone()
                    })
            }
        };

        doc.map(serde_json::from_value)
            .transpose()
            .map_err(DatabaseError::from)
    }

    /// Remove the first matching document. Returns the number of documents
    /// deleted (0 or 1).
    pub async fn delete_one(&self, filter: &Filter) -> DatabaseResult<u64> {
        match &self.backend {
            Backend::Postgres {
                pool,
                query_timeout,
            } => {
                let sql = format!(
                    "DELETE FROM \"{name}\" \
                     WHERE id = (SELECT id FROM \"{name}\" WHERE {predicate} ORDER BY seq LIMIT 1)",
                    name = self.name,
                    predicate = filter.sql_predicate(1)?
                );
                let result =
                    bounded(*query_timeout, filter.bind(sqlx::query(&sql)).execute(pool)).await?;
                Ok(result.rows_affected())
            }
            Backend::Memory(store) => {
                let matcher = filter.matcher()?;
                let mut collections = store.lock()?;
                let Some(docs) = collections.get_mut(&self.name) else {
                    return Ok(0);
                };
                match docs.iter().position(|d| matcher.matches(d)) {
                    Some(index) => {
                        docs.remove(index);
                        Ok(1)
                    }
                    None => Ok(0),
                }
            }
        }
    }
}

impl MemoryStore {
    fn lock(
        &self,
    ) -> DatabaseResult<std::sync::MutexGuard<'_, HashMap<String, Vec<StoredDocument>>>> {
        self.collections.lock().map_err(|_| DatabaseError::Poisoned)
    }
}

/// Run a query future under the configured timeout
async fn bounded<F, T>(timeout: Duration, query: F) -> DatabaseResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(timeout, query)
        .await
        .map_err(|_| DatabaseError::Timeout(timeout.as_secs()))?
        .map_err(DatabaseError::Query)
}
