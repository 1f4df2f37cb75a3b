use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::Todo;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_todo_user_date")
        .table(Todo::Table)
        .col(Todo::UserId)
        .col(Todo::Date)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_todo_user_date").table(Todo::Table).to_owned()
}

sqlite_operation!(Operation);
