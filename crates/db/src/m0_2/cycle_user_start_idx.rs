use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::MenstrualCycle;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_cycle_user_start")
        .table(MenstrualCycle::Table)
        .col(MenstrualCycle::UserId)
        .col(MenstrualCycle::StartDate)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_cycle_user_start").table(MenstrualCycle::Table).to_owned()
}

sqlite_operation!(Operation);
