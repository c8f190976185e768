use sqlx::{QueryBuilder, Sqlite};

use super::{
    models::{Ad, AdFields, AdFilter},
    Database,
};
use crate::error::{AppError, Result};

const AD_COLUMNS: &str = "id, ad_type, price, address, area, rooms_count, description, owner_id";

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &AdFilter) {
    query.push(" WHERE 1 = 1");
    if let Some(ad_type) = &filter.ad_type {
        query.push(" AND ad_type = ").push_bind(ad_type.clone());
    }
    if let Some(rooms_count) = filter.rooms_count {
        query.push(" AND rooms_count = ").push_bind(rooms_count);
    }
    if let Some(price_from) = filter.price_from {
        query.push(" AND price >= ").push_bind(price_from);
    }
    if let Some(price_until) = filter.price_until {
        query.push(" AND price <= ").push_bind(price_until);
    }
}

fn address_taken(err: sqlx::Error) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict("Address is already taken".to_string()),
        other => other,
    }
}

impl Database {
    pub async fn create_ad(&self, owner_id: i64, fields: &AdFields) -> Result<i64> {
        let id = sqlx::query(
            r#"
            INSERT INTO advertisements (ad_type, price, address, area, rooms_count, description, owner_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.ad_type)
        .bind(fields.price)
        .bind(&fields.address)
        .bind(fields.area)
        .bind(fields.rooms_count)
        .bind(&fields.description)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(address_taken)?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn get_ad_by_id(&self, id: i64) -> Result<Option<Ad>> {
        let ad = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {AD_COLUMNS} FROM advertisements WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ad)
    }

    pub async fn get_ad_by_address(&self, address: &str) -> Result<Option<Ad>> {
        let ad = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {AD_COLUMNS} FROM advertisements WHERE address = ?"
        ))
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ad)
    }

    /// Returns the number of ads matching `filter` along with the requested page,
    /// newest first.
    pub async fn list_ads(
        &self,
        filter: &AdFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Ad>)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM advertisements");
        push_filters(&mut count, filter);
        let (total,) = count
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT {AD_COLUMNS} FROM advertisements"));
        push_filters(&mut select, filter);
        select
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let ads = select.build_query_as::<Ad>().fetch_all(&self.pool).await?;

        Ok((total, ads))
    }

    /// Replaces every mutable field. The caller is responsible for checking
    /// that the ad exists.
    pub async fn update_ad(&self, id: i64, fields: &AdFields) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE advertisements
            SET ad_type = ?, price = ?, address = ?, area = ?, rooms_count = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.ad_type)
        .bind(fields.price)
        .bind(&fields.address)
        .bind(fields.area)
        .bind(fields.rooms_count)
        .bind(&fields.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(address_taken)?;
        Ok(())
    }

    pub async fn delete_ad(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM advertisements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count_comments(&self, ad_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE ad_id = ?")
            .bind(ad_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::users::tests::new_user;

    pub(crate) fn fields(address: &str, price: i64) -> AdFields {
        AdFields {
            ad_type: "rent".to_string(),
            price,
            address: address.to_string(),
            area: 46.5,
            rooms_count: 2,
            description: "Bright flat near the park".to_string(),
        }
    }

    async fn seeded() -> (Database, i64) {
        let db = Database::in_memory().await.unwrap();
        let owner = db.create_user(&new_user("owner")).await.unwrap();
        (db, owner.id)
    }

    #[tokio::test]
    async fn duplicate_address_is_a_conflict() {
        let (db, owner) = seeded().await;
        db.create_ad(owner, &fields("A1", 100)).await.unwrap();

        let err = db.create_ad(owner, &fields("A1", 200)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn lookup_by_id_and_address() {
        let (db, owner) = seeded().await;
        let id = db.create_ad(owner, &fields("Abay 10", 150)).await.unwrap();

        let ad = db.get_ad_by_id(id).await.unwrap().unwrap();
        assert_eq!(ad.address, "Abay 10");
        assert_eq!(ad.owner_id, owner);

        let ad = db.get_ad_by_address("Abay 10").await.unwrap().unwrap();
        assert_eq!(ad.id, id);
        assert!(db.get_ad_by_address("nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filters_are_conjunctive() {
        let (db, owner) = seeded().await;
        let mut cheap = fields("A1", 100);
        cheap.rooms_count = 1;
        db.create_ad(owner, &cheap).await.unwrap();

        let mid = db.create_ad(owner, &fields("A2", 200)).await.unwrap();

        let mut sale = fields("A3", 250);
        sale.ad_type = "sell".to_string();
        db.create_ad(owner, &sale).await.unwrap();

        db.create_ad(owner, &fields("A4", 900)).await.unwrap();

        let filter = AdFilter {
            ad_type: Some("rent".to_string()),
            rooms_count: Some(2),
            price_from: Some(150),
            price_until: Some(300),
        };
        let (total, ads) = db.list_ads(&filter, 100, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].id, mid);
    }

    #[tokio::test]
    async fn price_bounds_are_inclusive_and_total_ignores_paging() {
        let (db, owner) = seeded().await;
        for (i, price) in [100, 150, 200, 250].into_iter().enumerate() {
            db.create_ad(owner, &fields(&format!("A{i}"), price))
                .await
                .unwrap();
        }

        let filter = AdFilter {
            price_from: Some(150),
            price_until: Some(250),
            ..Default::default()
        };
        let (total, ads) = db.list_ads(&filter, 2, 0).await.unwrap();
        assert_eq!(total, 3);
        let prices: Vec<_> = ads.iter().map(|a| a.price).collect();
        assert_eq!(prices, [250, 200]);
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_delete_removes() {
        let (db, owner) = seeded().await;
        let id = db.create_ad(owner, &fields("A1", 100)).await.unwrap();

        let new_fields = AdFields {
            ad_type: "sell".to_string(),
            price: 50_000,
            address: "B2".to_string(),
            area: 80.0,
            rooms_count: 3,
            description: "Renovated".to_string(),
        };
        db.update_ad(id, &new_fields).await.unwrap();

        let ad = db.get_ad_by_id(id).await.unwrap().unwrap();
        assert_eq!(ad.ad_type, "sell");
        assert_eq!(ad.price, 50_000);
        assert_eq!(ad.address, "B2");
        assert_eq!(ad.rooms_count, 3);
        assert_eq!(ad.description, "Renovated");

        db.delete_ad(id).await.unwrap();
        assert!(db.get_ad_by_id(id).await.unwrap().is_none());
    }
}
