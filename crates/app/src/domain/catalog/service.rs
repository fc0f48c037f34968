//! Catalog service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewCatalogItem, NewServiceItem, PricingUpdate},
        errors::CatalogServiceError,
        pricing,
        records::{
            CatalogItemRecord, CatalogItemUuid, ItemKind, ServiceDetails, ServiceItemRecord,
        },
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }

    async fn create_item(
        &self,
        kind: ItemKind,
        item: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        pricing::resolve_unsigned(item.base_price, item.discount)?;

        if let (Some(from), Some(until)) = (item.available_from, item.available_until)
            && from >= until
        {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_item(&mut tx, CatalogItemUuid::new(), kind, &item)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_services(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<CatalogItemRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let services = self
            .repository
            .list_items(&mut tx, ItemKind::Service, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(services)
    }

    async fn list_menu(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<CatalogItemRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_items(&mut tx, ItemKind::Menu, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_service(
        &self,
        service: CatalogItemUuid,
    ) -> Result<ServiceDetails, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let service = self
            .repository
            .get_item(&mut tx, service, Some(ItemKind::Service))
            .await?;

        let items = self
            .repository
            .list_service_items(&mut tx, service.uuid)
            .await?;

        tx.commit().await?;

        Ok(ServiceDetails { service, items })
    }

    async fn get_item(
        &self,
        item: CatalogItemUuid,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_item(&mut tx, item, None).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_service(
        &self,
        service: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        self.create_item(ItemKind::Service, service).await
    }

    async fn create_menu_item(
        &self,
        item: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        self.create_item(ItemKind::Menu, item).await
    }

    async fn add_service_item(
        &self,
        service: CatalogItemUuid,
        item: NewServiceItem,
    ) -> Result<ServiceItemRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .get_item(&mut tx, service, Some(ItemKind::Service))
            .await?;

        let created = self
            .repository
            .create_service_item(&mut tx, service, &item)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_pricing(
        &self,
        item: CatalogItemUuid,
        pricing: PricingUpdate,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        pricing::resolve_unsigned(pricing.base_price, pricing.discount)?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_pricing(&mut tx, item, pricing).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_item(&self, item: CatalogItemUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Services orderable at `point_in_time`, newest first.
    async fn list_services(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<CatalogItemRecord>, CatalogServiceError>;

    /// Menu items orderable at `point_in_time`, by serial number.
    async fn list_menu(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<CatalogItemRecord>, CatalogServiceError>;

    /// A service with its listed items.
    async fn get_service(
        &self,
        service: CatalogItemUuid,
    ) -> Result<ServiceDetails, CatalogServiceError>;

    /// Any live catalog item.
    async fn get_item(
        &self,
        item: CatalogItemUuid,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    async fn create_service(
        &self,
        service: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    async fn create_menu_item(
        &self,
        item: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    async fn add_service_item(
        &self,
        service: CatalogItemUuid,
        item: NewServiceItem,
    ) -> Result<ServiceItemRecord, CatalogServiceError>;

    /// Replace an item's base price and discount.
    async fn update_pricing(
        &self,
        item: CatalogItemUuid,
        pricing: PricingUpdate,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    /// Soft-delete an item. Existing cart lines then fail checkout as stale.
    async fn delete_item(&self, item: CatalogItemUuid) -> Result<(), CatalogServiceError>;
}
