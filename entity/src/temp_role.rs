use sea_orm::entity::prelude::*;

/// A time-bound role grant awaiting removal.
///
/// The composite primary key is the identity triple, so a second grant of the same role to
/// the same member in the same guild replaces the row rather than adding one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temp_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_id: i64,
    /// Unix timestamp (seconds, UTC) at which the role must be removed.
    pub expires_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
