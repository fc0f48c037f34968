//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::{
        data::NewCartLine,
        records::{CartLineRecord, CartLineUuid, CartLineWithItem},
    },
    catalog::{
        records::CatalogItemUuid,
        repository::{decode_catalog_item, try_get_kind},
    },
    users::records::UserUuid,
};

const LIST_CART_SQL: &str = include_str!("sql/list_cart.sql");
const LOCK_CART_SQL: &str = include_str!("sql/lock_cart.sql");
const UPSERT_LINE_SQL: &str = include_str!("sql/upsert_line.sql");
const GET_LINE_FOR_UPDATE_SQL: &str = include_str!("sql/get_line_for_update.sql");
const SET_QUANTITY_SQL: &str = include_str!("sql/set_quantity.sql");
const DELETE_LINE_SQL: &str = include_str!("sql/delete_line.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const COUNT_LINES_SQL: &str = include_str!("sql/count_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines with their catalog items, most recently added first.
    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineWithItem>, sqlx::Error> {
        query_as::<Postgres, CartLineWithItem>(LIST_CART_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Like [`Self::list_lines`], holding row locks on the lines.
    pub(crate) async fn lock_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineWithItem>, sqlx::Error> {
        query_as::<Postgres, CartLineWithItem>(LOCK_CART_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line or grow the existing one by `line.quantity`.
    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(UPSERT_LINE_SQL)
            .bind(CartLineUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(line.item_kind.as_str())
            .bind(line.item_uuid.into_uuid())
            .bind(i64::from(line.quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_line_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_LINE_FOR_UPDATE_SQL)
            .bind(line.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(SET_QUANTITY_SQL)
            .bind(line.into_uuid())
            .bind(i64::from(quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_SQL)
            .bind(line.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Remove every line the user owns.
    pub(crate) async fn clear(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|error| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(error),
        })
    }
}

pub(crate) fn try_get_quantity(row: &PgRow) -> Result<u32, sqlx::Error> {
    let quantity: i64 = row.try_get("quantity")?;

    u32::try_from(quantity).map_err(|error| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(error),
    })
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            item_kind: try_get_kind(row, "item_kind")?,
            item_uuid: CatalogItemUuid::from_uuid(row.try_get("item_uuid")?),
            quantity: try_get_quantity(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineWithItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            line: CartLineRecord::from_row(row)?,
            item: decode_catalog_item(row, "catalog_")?,
        })
    }
}
