//! Catalog Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::catalog::{
        data::{NewCatalogItem, NewServiceItem, PricingUpdate},
        records::{
            AvailabilityWindow, CatalogItemRecord, CatalogItemUuid, ItemKind, ServiceItemRecord,
            ServiceItemUuid,
        },
    },
};

const LIST_SERVICES_SQL: &str = include_str!("sql/list_services.sql");
const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const UPDATE_PRICING_SQL: &str = include_str!("sql/update_pricing.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");
const LIST_SERVICE_ITEMS_SQL: &str = include_str!("sql/list_service_items.sql");
const CREATE_SERVICE_ITEM_SQL: &str = include_str!("sql/create_service_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Orderable items of one kind at `point_in_time`, in display order.
    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ItemKind,
        point_in_time: Timestamp,
    ) -> Result<Vec<CatalogItemRecord>, sqlx::Error> {
        let sql = match kind {
            ItemKind::Service => LIST_SERVICES_SQL,
            ItemKind::Menu => LIST_MENU_ITEMS_SQL,
        };

        query_as::<Postgres, CatalogItemRecord>(sql)
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    /// A live (not deleted) item, optionally restricted to one kind.
    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
        kind: Option<ItemKind>,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(kind.map(ItemKind::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
        kind: ItemKind,
        new_item: &NewCatalogItem,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(CREATE_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(kind.as_str())
            .bind(&new_item.name)
            .bind(new_item.category.as_deref())
            .bind(new_item.description.as_deref())
            .bind(new_item.image_url.as_deref())
            .bind(amount_to_i64(new_item.base_price, "base_price")?)
            .bind(amount_to_i64(new_item.discount, "discount")?)
            .bind(new_item.serial_number)
            .bind(new_item.available_from.map(SqlxTimestamp::from))
            .bind(new_item.available_until.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_pricing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
        pricing: PricingUpdate,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(UPDATE_PRICING_SQL)
            .bind(item.into_uuid())
            .bind(amount_to_i64(pricing.base_price, "base_price")?)
            .bind(amount_to_i64(pricing.discount, "discount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_service_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: CatalogItemUuid,
    ) -> Result<Vec<ServiceItemRecord>, sqlx::Error> {
        query_as::<Postgres, ServiceItemRecord>(LIST_SERVICE_ITEMS_SQL)
            .bind(service.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_service_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: CatalogItemUuid,
        item: &NewServiceItem,
    ) -> Result<ServiceItemRecord, sqlx::Error> {
        query_as::<Postgres, ServiceItemRecord>(CREATE_SERVICE_ITEM_SQL)
            .bind(ServiceItemUuid::new().into_uuid())
            .bind(service.into_uuid())
            .bind(&item.name)
            .bind(item.description.as_deref())
            .bind(item.image_url.as_deref())
            .bind(amount_to_i64(item.price, "price")?)
            .bind(item.serial_number)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Decode a catalog `kind` column.
pub(crate) fn try_get_kind(row: &PgRow, column: &str) -> Result<ItemKind, sqlx::Error> {
    let kind: String = row.try_get(column)?;

    kind.parse().map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

impl<'r> FromRow<'r, PgRow> for CatalogItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        decode_catalog_item(row, "")
    }
}

/// Decode catalog item columns, each named `{prefix}{column}`.
///
/// Joined queries alias the catalog side with a prefix such as `item_`.
pub(crate) fn decode_catalog_item(row: &PgRow, prefix: &str) -> sqlx::Result<CatalogItemRecord> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(CatalogItemRecord {
        uuid: CatalogItemUuid::from_uuid(row.try_get(column("uuid").as_str())?),
        kind: try_get_kind(row, &column("kind"))?,
        name: row.try_get(column("name").as_str())?,
        category: row.try_get(column("category").as_str())?,
        description: row.try_get(column("description").as_str())?,
        image_url: row.try_get(column("image_url").as_str())?,
        base_price: row.try_get(column("base_price").as_str())?,
        discount: row.try_get(column("discount").as_str())?,
        serial_number: row.try_get(column("serial_number").as_str())?,
        availability: AvailabilityWindow {
            from: row
                .try_get::<Option<SqlxTimestamp>, _>(column("available_from").as_str())?
                .map(SqlxTimestamp::to_jiff),
            until: row
                .try_get::<Option<SqlxTimestamp>, _>(column("available_until").as_str())?
                .map(SqlxTimestamp::to_jiff),
        },
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
        deleted_at: row
            .try_get::<Option<SqlxTimestamp>, _>(column("deleted_at").as_str())?
            .map(SqlxTimestamp::to_jiff),
    })
}

impl<'r> FromRow<'r, PgRow> for ServiceItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ServiceItemUuid::from_uuid(row.try_get("uuid")?),
            service_uuid: CatalogItemUuid::from_uuid(row.try_get("service_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            price: try_get_amount(row, "price")?,
            serial_number: row.try_get("serial_number")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
