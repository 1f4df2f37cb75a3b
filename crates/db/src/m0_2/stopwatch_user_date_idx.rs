use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::StopwatchRecord;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_stopwatch_user_date")
        .table(StopwatchRecord::Table)
        .col(StopwatchRecord::UserId)
        .col(StopwatchRecord::Date)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_stopwatch_user_date").table(StopwatchRecord::Table).to_owned()
}

sqlite_operation!(Operation);
