use crate::entities::coupon_codes;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::OnConflict;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Launch promo code, good for one platinum upgrade.
const DEFAULT_COUPON: &str = "crystalcallahan";
const DEFAULT_COUPON_TIER: &str = "platinum";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = chrono::Utc::now().to_rfc3339();

        let insert = Query::insert()
            .into_table(CouponCodes)
            .columns([
                coupon_codes::Column::Code,
                coupon_codes::Column::Tier,
                coupon_codes::Column::IsUsed,
                coupon_codes::Column::CreatedAt,
            ])
            .values_panic([
                DEFAULT_COUPON.into(),
                DEFAULT_COUPON_TIER.into(),
                false.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::column(coupon_codes::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(CouponCodes)
            .and_where(Expr::col(coupon_codes::Column::Code).eq(DEFAULT_COUPON))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
