use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::Schedule;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_schedule_user_date")
        .table(Schedule::Table)
        .col(Schedule::UserId)
        .col(Schedule::Date)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_schedule_user_date").table(Schedule::Table).to_owned()
}

sqlite_operation!(Operation);
