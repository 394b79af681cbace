//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Enum-like columns are stored as plain strings and parsed at the
//! domain boundary.

pub mod oil;
pub mod sale;
pub mod sale_item;
pub mod user;

#[allow(unused_imports)]
pub use oil::{ActiveModel as OilActiveModel, Entity as OilEntity, Model as OilModel};
#[allow(unused_imports)]
pub use sale::{ActiveModel as SaleActiveModel, Entity as SaleEntity, Model as SaleModel};
#[allow(unused_imports)]
pub use sale_item::{
    ActiveModel as SaleItemActiveModel, Entity as SaleItemEntity, Model as SaleItemModel,
};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
