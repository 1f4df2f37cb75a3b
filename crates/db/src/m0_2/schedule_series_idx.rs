use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::Schedule;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_schedule_series")
        .table(Schedule::Table)
        .col(Schedule::SeriesId)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_schedule_series").table(Schedule::Table).to_owned()
}

sqlite_operation!(Operation);
