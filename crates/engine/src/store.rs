//! Table-agnostic persistence primitives.
//!
//! Every function here is generic over a sea-orm entity, so recipes and
//! ingredients share one implementation of insert, paging, lookup, partial
//! update and delete. Raw query strings never reach this module: list
//! queries arrive as an already validated [`ListQuery`].

use std::str::FromStr;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    Order, PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    query::{ListQuery, SortDirection},
};

/// Insert a full record. Unique collisions surface as
/// [`EngineError::ExistingKey`] carrying `key`.
pub(crate) async fn insert<A, C>(
    conn: &C,
    record: A,
    key: &str,
) -> ResultEngine<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    record
        .insert(conn)
        .await
        .map_err(|err| EngineError::from_write(err, key))
}

/// Fetch one page: filters (AND-combined), then sort keys in the order
/// given, then limit/offset. Without sort keys the row order is whatever
/// the backend yields.
pub(crate) async fn list_page<E, C>(conn: &C, query: &ListQuery) -> ResultEngine<Vec<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut select = E::find();

    for predicate in &query.filters {
        select = select.filter(Expr::cust(predicate.as_sql()));
    }

    for key in &query.sort {
        let column = E::Column::from_str(&key.field).map_err(|_| {
            EngineError::InvalidQuery(format!("unknown sort field: {}", key.field))
        })?;
        select = match key.direction {
            SortDirection::Asc => select.order_by(column, Order::Asc),
            SortDirection::Desc => select.order_by(column, Order::Desc),
        };
    }

    Ok(select
        .limit(query.limit)
        .offset(query.offset)
        .all(conn)
        .await?)
}

/// Fetch a record by primary key. Absence is `None`, never an error.
pub(crate) async fn get_by_id<E, C>(conn: &C, id: Uuid) -> ResultEngine<Option<E::Model>>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    C: ConnectionTrait,
{
    Ok(E::find_by_id(id).one(conn).await?)
}

/// Apply an already-populated partial update. Returns `None` when the row
/// vanished between the caller's existence check and the write (the update
/// is lost, not an error). Unique collisions surface as
/// [`EngineError::ExistingKey`] carrying `key`.
pub(crate) async fn update_partial<A, C>(
    conn: &C,
    changes: A,
    key: &str,
) -> ResultEngine<Option<<A::Entity as EntityTrait>::Model>>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    match changes.update(conn).await {
        Ok(model) => Ok(Some(model)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(err) => Err(EngineError::from_write(err, key)),
    }
}

/// Delete a record by primary key, returning how many rows went away.
pub(crate) async fn delete_by_id<E, C>(conn: &C, id: Uuid) -> ResultEngine<u64>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    C: ConnectionTrait,
{
    Ok(E::delete_by_id(id).exec(conn).await?.rows_affected)
}
