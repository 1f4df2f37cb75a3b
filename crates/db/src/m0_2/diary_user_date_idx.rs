use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::Diary;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_diary_user_date")
        .table(Diary::Table)
        .unique()
        .col(Diary::UserId)
        .col(Diary::Date)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_diary_user_date").table(Diary::Table).to_owned()
}

sqlite_operation!(Operation);
