use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};

use crate::entities::{coupon_codes, prelude::*, users};
use crate::models::account::{CouponStatus, Tier};

pub struct CouponRepository {
    conn: DatabaseConnection,
}

impl CouponRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn status(&self, code: &str) -> Result<CouponStatus> {
        let coupon = CouponCodes::find()
            .filter(coupon_codes::Column::Code.eq(code))
            .one(&self.conn)
            .await
            .context("Failed to query coupon")?;

        Ok(match coupon {
            None => CouponStatus::Unknown,
            Some(c) if c.is_used => CouponStatus::AlreadyUsed,
            Some(c) => CouponStatus::Valid(Tier::parse_or_free(&c.tier)),
        })
    }

    /// Claims the coupon and upgrades the user in one transaction.
    ///
    /// Returns `None` if the code is unknown, already used, or the user does
    /// not exist. The claim is a conditional update, so two concurrent
    /// redemptions cannot both succeed.
    pub async fn redeem(&self, code: &str, user_id: i32) -> Result<Option<Tier>> {
        let txn = self.conn.begin().await?;

        let Some(coupon) = CouponCodes::find()
            .filter(coupon_codes::Column::Code.eq(code))
            .filter(coupon_codes::Column::IsUsed.eq(false))
            .one(&txn)
            .await
            .context("Failed to query coupon")?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let claimed = CouponCodes::update_many()
            .col_expr(coupon_codes::Column::IsUsed, Expr::value(true))
            .filter(coupon_codes::Column::Id.eq(coupon.id))
            .filter(coupon_codes::Column::IsUsed.eq(false))
            .exec(&txn)
            .await
            .context("Failed to claim coupon")?;

        if claimed.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let tier = Tier::parse_or_free(&coupon.tier);
        let upgraded = Users::update_many()
            .col_expr(users::Column::Tier, Expr::value(tier.as_str()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&txn)
            .await
            .context("Failed to update user tier")?;

        if upgraded.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;
        Ok(Some(tier))
    }
}
