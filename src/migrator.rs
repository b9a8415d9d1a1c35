use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_table::Migration),
            Box::new(m20240101_000002_create_pets_table::Migration),
            Box::new(m20240101_000003_create_orders_table::Migration),
            Box::new(m20240101_000004_create_order_pets_table::Migration),
        ]
    }
}

mod m20240101_000001_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::FirstName).string().not_null())
                        .col(ColumnDef::new(Customers::LastName).string().not_null())
                        .col(
                            ColumnDef::new(Customers::Email)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Customers::Phone)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Customers::Address)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Customers {
        Table,
        Id,
        FirstName,
        LastName,
        Email,
        Phone,
        Address,
        CreatedAt,
    }
}

mod m20240101_000002_create_pets_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_pets_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Pets::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Pets::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Pets::Name).string().not_null())
                        .col(
                            ColumnDef::new(Pets::Price)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Pets::Kind).string_len(32).not_null())
                        .col(ColumnDef::new(Pets::Color).string().not_null().default(""))
                        .col(ColumnDef::new(Pets::Breed).string().not_null().default(""))
                        .col(
                            ColumnDef::new(Pets::AgeInMonths)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Pets::Description)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Pets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Pets {
        Table,
        Id,
        Name,
        Price,
        Kind,
        Color,
        Breed,
        AgeInMonths,
        Description,
    }
}

mod m20240101_000003_create_orders_table {
    use super::m20240101_000001_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                        .col(
                            ColumnDef::new(Orders::PickupDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::Status)
                                .string_len(32)
                                .not_null()
                                .default("Open"),
                        )
                        .col(ColumnDef::new(Orders::ActualCost).decimal().null())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer_id")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        Id,
        CustomerId,
        PickupDate,
        Status,
        ActualCost,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_order_pets_table {
    use super::m20240101_000002_create_pets_table::Pets;
    use super::m20240101_000003_create_orders_table::Orders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_order_pets_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrderPets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderPets::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderPets::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderPets::PetId).uuid().not_null())
                        .col(
                            ColumnDef::new(OrderPets::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_pets_order_id")
                                .from(OrderPets::Table, OrderPets::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_pets_pet_id")
                                .from(OrderPets::Table, OrderPets::PetId)
                                .to(Pets::Table, Pets::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // A pet appears at most once per order.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_pets_order_pet")
                        .table(OrderPets::Table)
                        .col(OrderPets::OrderId)
                        .col(OrderPets::PetId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_pets_pet_id")
                        .table(OrderPets::Table)
                        .col(OrderPets::PetId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderPets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrderPets {
        Table,
        Id,
        OrderId,
        PetId,
        CreatedAt,
    }
}
