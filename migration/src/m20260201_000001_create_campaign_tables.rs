use sea_orm_migration::prelude::*;

/// Participants (registered players, one code per campaign)
#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    CampaignId,
    Code,
    Name,
    Rut,
    Phone,
    Email,
    Comuna,
    PreferredModel,
    CreatedAt,
}

/// Prize weights (live roulette configuration)
#[derive(DeriveIden)]
enum PrizeWeights {
    Table,
    Id,
    CampaignId,
    Prize,
    Weight,
    UpdatedAt,
}

/// Draws (one allocation per participant)
#[derive(DeriveIden)]
enum Draws {
    Table,
    Id,
    CampaignId,
    ParticipantId,
    Prize,
    DayKey,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Ids are plain `integer` so the same schema runs on Postgres (serial) and
/// SQLite (rowid alias with AUTOINCREMENT).
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::CampaignId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::Code).string_len(16).not_null())
                    .col(ColumnDef::new(Participants::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Participants::Rut).string_len(16).not_null())
                    .col(ColumnDef::new(Participants::Phone).string_len(64).not_null())
                    .col(ColumnDef::new(Participants::Email).string_len(255).null())
                    .col(ColumnDef::new(Participants::Comuna).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Participants::PreferredModel)
                            .string_len(128)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一活动内兑换码唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_participants_campaign_code")
                    .table(Participants::Table)
                    .col(Participants::CampaignId)
                    .col(Participants::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PrizeWeights::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrizeWeights::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PrizeWeights::CampaignId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PrizeWeights::Prize).string_len(32).not_null())
                    .col(ColumnDef::new(PrizeWeights::Weight).double().not_null())
                    .col(
                        ColumnDef::new(PrizeWeights::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // upsert target: (campaign_id, prize)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_prize_weights_campaign_prize")
                    .table(PrizeWeights::Table)
                    .col(PrizeWeights::CampaignId)
                    .col(PrizeWeights::Prize)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Draws::CampaignId).string_len(64).not_null())
                    .col(ColumnDef::new(Draws::ParticipantId).integer().not_null())
                    .col(ColumnDef::new(Draws::Prize).string_len(32).not_null())
                    .col(ColumnDef::new(Draws::DayKey).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Draws::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 每个参与者在同一活动内最多一条抽奖记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_draws_campaign_participant")
                    .table(Draws::Table)
                    .col(Draws::CampaignId)
                    .col(Draws::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 报表按天分组
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_campaign_day_key")
                    .table(Draws::Table)
                    .col(Draws::CampaignId)
                    .col(Draws::DayKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Draws::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PrizeWeights::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
