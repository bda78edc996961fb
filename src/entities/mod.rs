//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod inbound_record;
pub mod outbound_record;
pub mod pc_detail;
pub mod pc_model_number;
pub mod product;
pub mod product_type;
pub mod staff;
pub mod vest_detail;

// Re-export specific types to avoid conflicts
pub use inbound_record::{
    Column as InboundRecordColumn, Entity as InboundRecord, Model as InboundRecordModel,
};
pub use outbound_record::{
    Column as OutboundRecordColumn, Entity as OutboundRecord, Model as OutboundRecordModel,
};
pub use pc_detail::{Column as PcDetailColumn, Entity as PcDetail, Model as PcDetailModel};
pub use pc_model_number::{
    Column as PcModelNumberColumn, Entity as PcModelNumber, Model as PcModelNumberModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel, ProductStatus};
pub use product_type::{
    Category, Column as ProductTypeColumn, Entity as ProductType, Model as ProductTypeModel,
};
pub use staff::{Column as StaffColumn, Entity as Staff, Model as StaffModel};
pub use vest_detail::{Column as VestDetailColumn, Entity as VestDetail, Model as VestDetailModel};
