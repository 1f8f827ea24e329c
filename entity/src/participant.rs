use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seminar_id: Uuid,
    pub name: String,
    pub email: String,
    pub registered_at: Option<DateTimeUtc>,
    pub extra_data: Option<Json>,
    pub is_confirmed: Option<bool>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seminar::Entity",
        from = "Column::SeminarId",
        to = "super::seminar::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Seminar,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminar.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
