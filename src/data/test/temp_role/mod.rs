use crate::{
    data::temp_role::TempRoleRepository,
    model::temp_role::TempRoleKey,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory, fixture};

mod delete;

fn key_of(model: &entity::temp_role::Model) -> TempRoleKey {
    TempRoleKey::new(
        model.guild_id as u64,
        model.user_id as u64,
        model.role_id as u64,
    )
}
